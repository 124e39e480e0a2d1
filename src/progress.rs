use crate::models::{Book, ReadingState};

/// `round(current / total * 100)` with halves rounded up; `None` when the total is unknown.
pub fn progress_percent(current: u32, total: u32) -> Option<u32> {
    if total == 0 {
        return None;
    }
    let current = u64::from(current);
    let total = u64::from(total);
    let percent = (current * 200 + total) / (total * 2);
    Some(u32::try_from(percent).unwrap_or(u32::MAX))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressView {
    pub percent_text: String,
    /// Bar width in percent, always within 0..=100.
    pub bar_width: u32,
    pub pages_text: String,
    /// Value pre-filled into the page input.
    pub current_page: Option<u32>,
    pub status: ReadingState,
}

pub fn progress_view(book: &Book) -> ProgressView {
    let Some(rs) = book.reading_status.as_ref() else {
        return ProgressView {
            percent_text: "N/A".to_string(),
            bar_width: 0,
            pages_text: "No progress tracked.".to_string(),
            current_page: None,
            status: ReadingState::WantToRead,
        };
    };

    let current = rs.current_page();
    match book
        .total_pages()
        .and_then(|total| progress_percent(current, total).map(|pct| (total, pct)))
    {
        Some((total, percent)) => ProgressView {
            percent_text: format!("{percent}%"),
            bar_width: percent.min(100),
            pages_text: format!("{current} / {total} pages read"),
            current_page: Some(current),
            status: rs.status,
        },
        None => ProgressView {
            percent_text: "N/A".to_string(),
            bar_width: 0,
            pages_text: format!("{current} pages read (total pages unknown)"),
            current_page: Some(current),
            status: rs.status,
        },
    }
}
