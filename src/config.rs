use crate::errors::ConfigError;
use reqwest::Url;
use std::env;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub api_base_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_values(
            env::var("PORT").ok().as_deref(),
            env::var("BOOK_API_URL").ok().as_deref(),
        )
    }

    pub fn from_values(port: Option<&str>, api_url: Option<&str>) -> Result<Self, ConfigError> {
        let port = port
            .and_then(|value| value.trim().parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        Ok(Self {
            port,
            api_base_url: resolve_api_url(api_url.unwrap_or(DEFAULT_API_URL))?,
        })
    }
}

fn resolve_api_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = Url::parse(trimmed).map_err(|err| ConfigError::InvalidApiUrl(err.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(trimmed.to_string()),
        other => Err(ConfigError::UnsupportedScheme(other.to_string())),
    }
}
