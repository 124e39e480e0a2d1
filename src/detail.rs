//! Request planning for the book-details mutations. Nothing here talks to the
//! network; handlers send whatever these functions decide.

use crate::models::{Book, ReadingState, UpdateRequest};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageInputError {
    #[error("Please enter a valid page number.")]
    Invalid,
}

pub fn parse_page_input(raw: &str) -> Result<u32, PageInputError> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| PageInputError::Invalid)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressPlan {
    Send(UpdateRequest),
    /// The page is past the end of the book and the user has not confirmed it yet.
    ConfirmOverflow { requested: u32, total: u32 },
}

/// Progress updates keep the current status; they never flip it to `read`.
pub fn plan_progress_update(book: &Book, page: u32, overflow_confirmed: bool) -> ProgressPlan {
    if let Some(total) = book.total_pages() {
        if page > total && !overflow_confirmed {
            return ProgressPlan::ConfirmOverflow {
                requested: page,
                total,
            };
        }
    }

    ProgressPlan::Send(UpdateRequest {
        current_page: page,
        status: book.state().unwrap_or(ReadingState::CurrentlyReading),
    })
}

pub fn plan_status_update(book: &Book, status: ReadingState) -> UpdateRequest {
    let current_page = match status {
        ReadingState::Read => book.total_pages().unwrap_or_else(|| book.current_page()),
        ReadingState::WantToRead => 0,
        ReadingState::CurrentlyReading => book.current_page(),
    };
    UpdateRequest {
        current_page,
        status,
    }
}

/// Whether to offer a separate "mark as read" action for a finished book.
pub fn offers_completion(book: &Book) -> bool {
    matches!(
        (book.state(), book.total_pages()),
        (Some(ReadingState::CurrentlyReading), Some(total)) if book.current_page() >= total
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReadingStatus;

    fn book(page_count: Option<u32>, status: Option<(ReadingState, u32)>) -> Book {
        Book {
            id: 9,
            title: "Middlemarch".into(),
            author: "George Eliot".into(),
            genre: None,
            publication_year: None,
            cover_image_url: None,
            description: None,
            publisher: None,
            isbn: None,
            page_count,
            reading_status: status.map(|(status, page)| ReadingStatus {
                status,
                current_page: Some(page),
                format: None,
                rating: None,
                start_date: None,
                finish_date: None,
                added_date: None,
                notes: None,
            }),
        }
    }

    #[test]
    fn page_input_must_be_a_non_negative_integer() {
        assert_eq!(parse_page_input(" 42 "), Ok(42));
        assert_eq!(parse_page_input("0"), Ok(0));
        assert_eq!(parse_page_input("-3"), Err(PageInputError::Invalid));
        assert_eq!(parse_page_input("12.5"), Err(PageInputError::Invalid));
        assert_eq!(parse_page_input("abc"), Err(PageInputError::Invalid));
        assert_eq!(parse_page_input(""), Err(PageInputError::Invalid));
    }

    #[test]
    fn overflow_needs_confirmation() {
        let b = book(Some(300), Some((ReadingState::CurrentlyReading, 10)));
        assert_eq!(
            plan_progress_update(&b, 301, false),
            ProgressPlan::ConfirmOverflow {
                requested: 301,
                total: 300
            }
        );
        assert_eq!(
            plan_progress_update(&b, 301, true),
            ProgressPlan::Send(UpdateRequest {
                current_page: 301,
                status: ReadingState::CurrentlyReading
            })
        );
    }

    #[test]
    fn progress_keeps_status_even_at_the_last_page() {
        let b = book(Some(300), Some((ReadingState::CurrentlyReading, 10)));
        assert_eq!(
            plan_progress_update(&b, 300, false),
            ProgressPlan::Send(UpdateRequest {
                current_page: 300,
                status: ReadingState::CurrentlyReading
            })
        );
    }

    #[test]
    fn progress_without_status_defaults_to_currently_reading() {
        let b = book(None, None);
        assert_eq!(
            plan_progress_update(&b, 5000, false),
            ProgressPlan::Send(UpdateRequest {
                current_page: 5000,
                status: ReadingState::CurrentlyReading
            })
        );
    }

    #[test]
    fn want_to_read_always_resets_page() {
        for page in [0, 1, 250, 999] {
            let b = book(Some(300), Some((ReadingState::Read, page)));
            assert_eq!(
                plan_status_update(&b, ReadingState::WantToRead).current_page,
                0
            );
        }
    }

    #[test]
    fn read_forces_total_pages_when_known() {
        for page in [0, 120, 300, 450] {
            let b = book(Some(300), Some((ReadingState::CurrentlyReading, page)));
            assert_eq!(plan_status_update(&b, ReadingState::Read).current_page, 300);
        }
        let unknown = book(None, Some((ReadingState::CurrentlyReading, 77)));
        assert_eq!(
            plan_status_update(&unknown, ReadingState::Read).current_page,
            77
        );
    }

    #[test]
    fn currently_reading_preserves_page() {
        let b = book(Some(300), Some((ReadingState::WantToRead, 12)));
        assert_eq!(
            plan_status_update(&b, ReadingState::CurrentlyReading),
            UpdateRequest {
                current_page: 12,
                status: ReadingState::CurrentlyReading
            }
        );
    }

    #[test]
    fn completion_offered_only_for_finished_current_reads() {
        assert!(offers_completion(&book(
            Some(300),
            Some((ReadingState::CurrentlyReading, 300))
        )));
        assert!(!offers_completion(&book(
            Some(300),
            Some((ReadingState::CurrentlyReading, 299))
        )));
        assert!(!offers_completion(&book(
            Some(300),
            Some((ReadingState::Read, 300))
        )));
        assert!(!offers_completion(&book(
            None,
            Some((ReadingState::CurrentlyReading, 300))
        )));
    }
}
