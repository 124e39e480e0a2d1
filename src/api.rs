//! Typed client for the book tracker REST API.

use crate::errors::ApiError;
use crate::models::{
    Book, BooksPerMonth, PagesPerMonth, Profile, ReadingState, StatsSummary, UpdateRequest,
};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Deserialize};
use tracing::debug;

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

#[derive(Clone)]
pub struct BookApi {
    client: Client,
    base_url: String,
}

impl BookApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /api/books`, optionally filtered by reading state.
    pub async fn list_books(&self, status: Option<ReadingState>) -> Result<Vec<Book>, ApiError> {
        let mut request = self.client.get(self.url("/api/books"));
        if let Some(status) = status {
            request = request.query(&[("status", status.as_str())]);
        }
        send(request).await
    }

    pub async fn get_book(&self, id: i64) -> Result<Book, ApiError> {
        send(self.client.get(self.url(&format!("/api/books/{id}")))).await
    }

    /// Partial update of the reading status; the response is the new source of truth.
    pub async fn update_book(&self, id: i64, update: &UpdateRequest) -> Result<Book, ApiError> {
        send(
            self.client
                .put(self.url(&format!("/api/books/{id}")))
                .json(update),
        )
        .await
    }

    pub async fn profile(&self) -> Result<Profile, ApiError> {
        send(self.client.get(self.url("/api/profile"))).await
    }

    pub async fn summary(&self) -> Result<StatsSummary, ApiError> {
        send(self.client.get(self.url("/api/stats/summary"))).await
    }

    pub async fn books_per_month(&self) -> Result<Vec<BooksPerMonth>, ApiError> {
        send(self.client.get(self.url("/api/stats/books_per_month"))).await
    }

    pub async fn pages_per_month(&self) -> Result<Vec<PagesPerMonth>, ApiError> {
        send(self.client.get(self.url("/api/stats/pages_read_per_month"))).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ApiError> {
    let response = request.send().await?;
    let status = response.status();
    debug!(%status, url = %response.url(), "book api response");

    if status == StatusCode::NOT_FOUND {
        return Err(ApiError::NotFound);
    }
    if !status.is_success() {
        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message)
            .unwrap_or_else(|| format!("HTTP error! status: {}", status.as_u16()));
        return Err(ApiError::Status { status, message });
    }

    Ok(response.json::<T>().await?)
}
