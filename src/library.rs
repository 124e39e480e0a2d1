//! List loading: empty/error outcomes, the recently-read ordering and the
//! explore page's featured set and search.

use crate::errors::ApiError;
use crate::models::Book;
use std::cmp::Reverse;
use tracing::error;

pub const RECENTLY_READ_LIMIT: usize = 4;
pub const FEATURED_LIMIT: usize = 6;

pub const LOAD_ERROR: &str = "Error loading books.";
pub const EMPTY_CURRENTLY_READING: &str = "No books currently being read.";
pub const EMPTY_RECENTLY_READ: &str = "No books recently read.";
pub const EMPTY_WANT_TO_READ: &str = "No books on your want-to-read list.";
pub const EMPTY_SEARCH: &str = "No books found.";

/// What a list container ends up showing. Never a mix of old and new content.
#[derive(Debug, Clone, PartialEq)]
pub enum ListOutcome {
    Books(Vec<Book>),
    Empty(&'static str),
    Failed(&'static str),
}

impl ListOutcome {
    pub fn from_books(books: Vec<Book>, empty_message: &'static str) -> Self {
        if books.is_empty() {
            ListOutcome::Empty(empty_message)
        } else {
            ListOutcome::Books(books)
        }
    }

    /// Collapses a fetch result, logging the failure that gets replaced by inline text.
    pub fn from_result(
        list: &str,
        result: Result<Vec<Book>, ApiError>,
        empty_message: &'static str,
    ) -> Self {
        match result {
            Ok(books) => Self::from_books(books, empty_message),
            Err(err) => {
                error!("error fetching {list} books: {err}");
                ListOutcome::Failed(LOAD_ERROR)
            }
        }
    }
}

/// Newest first by finish date, falling back to the added date; undated books go last.
pub fn sort_recently_read(books: &mut [Book]) {
    books.sort_by_key(|book| {
        Reverse(
            book.reading_status
                .as_ref()
                .and_then(|rs| rs.recency_date()),
        )
    });
}

pub fn recently_read(mut books: Vec<Book>) -> Vec<Book> {
    sort_recently_read(&mut books);
    books.truncate(RECENTLY_READ_LIMIT);
    books
}

pub fn featured(mut books: Vec<Book>) -> Vec<Book> {
    books.truncate(FEATURED_LIMIT);
    books
}

/// Case-insensitive match of `term` against title or author. A blank term matches everything.
pub fn search(books: &[Book], term: &str) -> Vec<Book> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return books.to_vec();
    }
    books
        .iter()
        .filter(|book| {
            book.title.to_lowercase().contains(&term) || book.author.to_lowercase().contains(&term)
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ReadingState, ReadingStatus};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    fn read_book(
        id: i64,
        title: &str,
        finish: Option<NaiveDate>,
        added: Option<NaiveDate>,
    ) -> Book {
        Book {
            id,
            title: title.into(),
            author: format!("Author {id}"),
            genre: None,
            publication_year: None,
            cover_image_url: None,
            description: None,
            publisher: None,
            isbn: None,
            page_count: Some(200),
            reading_status: Some(ReadingStatus {
                status: ReadingState::Read,
                current_page: Some(200),
                format: None,
                rating: None,
                start_date: None,
                finish_date: finish,
                added_date: added,
                notes: None,
            }),
        }
    }

    fn ids(books: &[Book]) -> Vec<i64> {
        books.iter().map(|b| b.id).collect()
    }

    #[test]
    fn recently_read_orders_by_finish_then_added() {
        let books = vec![
            read_book(1, "B1", date(2023, 5, 1), date(2023, 1, 1)),
            read_book(2, "B2", None, date(2023, 6, 1)),
            read_book(3, "B3", date(2023, 7, 1), None),
        ];
        assert_eq!(ids(&recently_read(books)), vec![3, 2, 1]);
    }

    #[test]
    fn recently_read_caps_and_puts_undated_last() {
        let books = vec![
            read_book(1, "undated", None, None),
            read_book(2, "a", date(2022, 1, 1), None),
            read_book(3, "b", date(2022, 2, 1), None),
            read_book(4, "c", date(2022, 3, 1), None),
            read_book(5, "d", date(2022, 4, 1), None),
        ];
        assert_eq!(ids(&recently_read(books)), vec![5, 4, 3, 2]);
    }

    #[test]
    fn featured_keeps_first_six() {
        let books: Vec<Book> = (1..=9).map(|id| read_book(id, "x", None, None)).collect();
        assert_eq!(ids(&featured(books)), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn search_matches_title_or_author_case_insensitively() {
        let mut books = vec![
            read_book(1, "The Hobbit", None, None),
            read_book(2, "Emma", None, None),
        ];
        books[1].author = "Jane AUSTEN".into();

        assert_eq!(ids(&search(&books, "  hobbit ")), vec![1]);
        assert_eq!(ids(&search(&books, "austen")), vec![2]);
        assert_eq!(ids(&search(&books, "")), vec![1, 2]);
        assert!(search(&books, "tolstoy").is_empty());
    }

    #[test]
    fn outcome_distinguishes_empty_and_failure() {
        assert_eq!(
            ListOutcome::from_result("read", Ok(Vec::new()), EMPTY_RECENTLY_READ),
            ListOutcome::Empty(EMPTY_RECENTLY_READ)
        );
        let failed = ListOutcome::from_result(
            "read",
            Err(ApiError::Status {
                status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                message: "down".into(),
            }),
            EMPTY_RECENTLY_READ,
        );
        assert_eq!(failed, ListOutcome::Failed(LOAD_ERROR));
    }
}
