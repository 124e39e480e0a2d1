use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::dashboard))
        .route("/explore", get(handlers::explore))
        .route("/my-books", get(handlers::my_books))
        .route("/book-details", get(handlers::book_details))
        .route("/books/:id/progress", post(handlers::update_progress))
        .route("/books/:id/status", post(handlers::update_status))
        .route("/stats", get(handlers::stats))
        .route("/profile", get(handlers::profile))
        .route("/profile/theme", post(handlers::toggle_theme))
        .fallback(handlers::not_found)
        .with_state(state)
}
