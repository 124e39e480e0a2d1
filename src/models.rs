use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadingState {
    WantToRead,
    CurrentlyReading,
    Read,
}

impl ReadingState {
    pub const ALL: [ReadingState; 3] = [
        ReadingState::WantToRead,
        ReadingState::CurrentlyReading,
        ReadingState::Read,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ReadingState::WantToRead => "want_to_read",
            ReadingState::CurrentlyReading => "currently_reading",
            ReadingState::Read => "read",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ReadingState::WantToRead => "Want to Read",
            ReadingState::CurrentlyReading => "Currently Reading",
            ReadingState::Read => "Read",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|state| state.as_str() == value.trim())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingStatus {
    pub status: ReadingState,
    #[serde(default)]
    pub current_page: Option<u32>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub rating: Option<u8>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub finish_date: Option<NaiveDate>,
    #[serde(default)]
    pub added_date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl ReadingStatus {
    /// The backend stores a nullable page; null means nothing read yet.
    pub fn current_page(&self) -> u32 {
        self.current_page.unwrap_or(0)
    }

    /// Date used to order the recently-read view.
    pub fn recency_date(&self) -> Option<NaiveDate> {
        self.finish_date.or(self.added_date)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub publication_year: Option<i32>,
    #[serde(default)]
    pub cover_image_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub publisher: Option<String>,
    #[serde(default)]
    pub isbn: Option<String>,
    #[serde(default)]
    pub page_count: Option<u32>,
    #[serde(default)]
    pub reading_status: Option<ReadingStatus>,
}

impl Book {
    /// Page count when the backend knows a non-zero one.
    pub fn total_pages(&self) -> Option<u32> {
        self.page_count.filter(|pages| *pages > 0)
    }

    pub fn state(&self) -> Option<ReadingState> {
        self.reading_status.as_ref().map(|rs| rs.status)
    }

    pub fn current_page(&self) -> u32 {
        self.reading_status
            .as_ref()
            .map(ReadingStatus::current_page)
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateRequest {
    pub current_page: u32,
    pub status: ReadingState,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub profile_picture_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsSummary {
    #[serde(default)]
    pub total_books_read: Option<u64>,
    #[serde(default)]
    pub total_pages_read: Option<u64>,
    #[serde(default)]
    pub average_rating: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BooksPerMonth {
    pub month_year: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagesPerMonth {
    pub month_year: String,
    pub total_pages: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartPoint {
    pub label: String,
    pub value: u64,
}

impl From<BooksPerMonth> for ChartPoint {
    fn from(point: BooksPerMonth) -> Self {
        Self {
            label: point.month_year,
            value: point.count,
        }
    }
}

impl From<PagesPerMonth> for ChartPoint {
    fn from(point: PagesPerMonth) -> Self {
        Self {
            label: point.month_year,
            value: point.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn book_decodes_backend_payload_with_nulls() {
        let book: Book = serde_json::from_value(serde_json::json!({
            "id": 7,
            "title": "Dune",
            "author": "Frank Herbert",
            "cover_image_url": null,
            "publication_year": 1965,
            "isbn": null,
            "page_count": 412,
            "description": null,
            "genre": "Science Fiction",
            "reading_status": {
                "id": 3,
                "user_id": 1,
                "status": "currently_reading",
                "current_page": null,
                "rating": null,
                "start_date": null,
                "finish_date": null,
                "added_date": "2024-02-11",
                "notes": null
            }
        }))
        .expect("decode book");

        assert_eq!(book.total_pages(), Some(412));
        assert_eq!(book.state(), Some(ReadingState::CurrentlyReading));
        assert_eq!(book.current_page(), 0);
        let status = book.reading_status.expect("status");
        assert_eq!(
            status.recency_date(),
            NaiveDate::from_ymd_opt(2024, 2, 11)
        );
    }

    #[test]
    fn zero_page_count_is_unknown() {
        let book: Book = serde_json::from_value(serde_json::json!({
            "id": 1,
            "title": "Untitled",
            "author": "Anon",
            "page_count": 0
        }))
        .expect("decode book");
        assert_eq!(book.total_pages(), None);
        assert_eq!(book.state(), None);
    }

    #[test]
    fn reading_state_parses_wire_names() {
        assert_eq!(
            ReadingState::parse(" read "),
            Some(ReadingState::Read)
        );
        assert_eq!(ReadingState::parse("finished"), None);
        let json = serde_json::to_string(&UpdateRequest {
            current_page: 12,
            status: ReadingState::WantToRead,
        })
        .expect("encode");
        assert_eq!(json, r#"{"current_page":12,"status":"want_to_read"}"#);
    }
}
