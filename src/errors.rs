use crate::profile::Theme;
use crate::ui::render_error_page;
use axum::{http::StatusCode, response::Html};
use thiserror::Error;

/// Failure talking to the book API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("not found")]
    NotFound,
    #[error("{message}")]
    Status { status: StatusCode, message: String },
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ApiError {
    /// Short reason suitable for a full-page error line.
    pub fn reason(&self) -> String {
        match self {
            ApiError::NotFound => "Not Found".to_string(),
            ApiError::Status { status, .. } => status
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or_else(|| status.as_str().to_string()),
            ApiError::Transport(err) if err.is_decode() => "invalid response".to_string(),
            ApiError::Transport(_) => "backend unreachable".to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("BOOK_API_URL is not a valid URL: {0}")]
    InvalidApiUrl(String),
    #[error("BOOK_API_URL must use http or https, got {0}")]
    UnsupportedScheme(String),
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
    pub theme: Theme,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
            theme: Theme::default(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
            theme: Theme::default(),
        }
    }

    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            message: message.into(),
            theme: Theme::default(),
        }
    }

    /// Renders the error page in the requester's theme.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn missing_book_id() -> Self {
        Self::bad_request("Error: Book ID is missing in the URL.")
    }

    /// Full-page replacement for a failed book lookup.
    pub fn book_lookup(err: &ApiError) -> Self {
        match err {
            ApiError::NotFound => Self::not_found("Error: Book not found."),
            other => Self::bad_gateway(format!(
                "Error loading book details: {}",
                other.reason()
            )),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Html(render_error_page(self.theme, &self.message))).into_response()
    }
}
