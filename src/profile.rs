use crate::errors::ApiError;
use crate::models::Profile;
use axum::http::{header, HeaderMap};
use tracing::error;

pub const THEME_COOKIE: &str = "theme";
pub const LIGHT_MODE: &str = "light-mode";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileView {
    pub display_name: String,
    pub header_location: String,
    pub info_name: String,
    pub city: String,
    pub country: String,
    pub avatar_url: Option<String>,
}

/// Splits "city, country" once on the first comma. No comma means the whole string is the city.
pub fn split_location(location: Option<&str>) -> (String, String) {
    let Some(location) = location.map(str::trim).filter(|loc| !loc.is_empty()) else {
        return ("N/A".to_string(), "N/A".to_string());
    };
    match location.split_once(',') {
        Some((city, country)) => (city.trim().to_string(), non_empty_or_na(country)),
        None => (location.to_string(), "N/A".to_string()),
    }
}

fn non_empty_or_na(value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        "N/A".to_string()
    } else {
        value.to_string()
    }
}

pub fn profile_view(result: Result<Profile, ApiError>) -> ProfileView {
    match result {
        Ok(profile) => {
            let username = profile.username.as_deref().filter(|name| !name.is_empty());
            let (city, country) = split_location(profile.location.as_deref());
            ProfileView {
                display_name: username.unwrap_or("User").to_string(),
                header_location: profile
                    .location
                    .clone()
                    .filter(|loc| !loc.trim().is_empty())
                    .unwrap_or_else(|| "N/A".to_string()),
                info_name: username.unwrap_or("N/A").to_string(),
                city,
                country,
                avatar_url: profile.profile_picture_url.filter(|url| !url.is_empty()),
            }
        }
        Err(err) => {
            error!("error fetching user profile: {err}");
            ProfileView {
                display_name: "Error".to_string(),
                header_location: "Could not load location".to_string(),
                info_name: "Error".to_string(),
                city: "Error".to_string(),
                country: "Error".to_string(),
                avatar_url: None,
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Reads the theme cookie; anything but `light-mode` means the dark default.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let light = headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .any(|(name, value)| name == THEME_COOKIE && value == LIGHT_MODE);
        if light { Theme::Light } else { Theme::Dark }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn html_class(self) -> &'static str {
        match self {
            Theme::Dark => "",
            Theme::Light => LIGHT_MODE,
        }
    }

    /// `Set-Cookie` value that stores this theme; dark removes the cookie.
    pub fn set_cookie(self) -> String {
        match self {
            Theme::Light => format!("{THEME_COOKIE}={LIGHT_MODE}; Path=/; Max-Age=31536000; SameSite=Lax"),
            Theme::Dark => format!("{THEME_COOKIE}=; Path=/; Max-Age=0; SameSite=Lax"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn location_with_comma_splits_into_city_and_country() {
        assert_eq!(
            split_location(Some("Paris, France")),
            ("Paris".to_string(), "France".to_string())
        );
        assert_eq!(
            split_location(Some("Springfield, IL, USA")),
            ("Springfield".to_string(), "IL, USA".to_string())
        );
    }

    #[test]
    fn location_without_comma_is_the_city() {
        assert_eq!(
            split_location(Some("Paris")),
            ("Paris".to_string(), "N/A".to_string())
        );
        assert_eq!(split_location(None), ("N/A".to_string(), "N/A".to_string()));
        assert_eq!(
            split_location(Some("  ")),
            ("N/A".to_string(), "N/A".to_string())
        );
    }

    #[test]
    fn missing_fields_fall_back() {
        let view = profile_view(Ok(Profile::default()));
        assert_eq!(view.display_name, "User");
        assert_eq!(view.info_name, "N/A");
        assert_eq!(view.header_location, "N/A");
        assert_eq!(view.avatar_url, None);
    }

    #[test]
    fn failed_fetch_shows_error_everywhere() {
        let view = profile_view(Err(ApiError::NotFound));
        assert_eq!(view.display_name, "Error");
        assert_eq!(view.header_location, "Could not load location");
        assert_eq!(view.country, "Error");
    }

    #[test]
    fn theme_round_trips_through_cookie_header() {
        let mut headers = HeaderMap::new();
        assert_eq!(Theme::from_headers(&headers), Theme::Dark);

        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("session=abc; theme=light-mode"),
        );
        assert_eq!(Theme::from_headers(&headers), Theme::Light);
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert!(Theme::Light.set_cookie().starts_with("theme=light-mode;"));
        assert!(Theme::Dark.set_cookie().contains("Max-Age=0"));
    }
}
