use crate::api::BookApi;

#[derive(Clone)]
pub struct AppState {
    pub api: BookApi,
}

impl AppState {
    pub fn new(api: BookApi) -> Self {
        Self { api }
    }
}
