use crate::errors::ApiError;
use crate::models::{ChartPoint, StatsSummary};
use tracing::error;

/// Smallest bar height, in percent, so zero months stay visible.
pub const MIN_BAR_HEIGHT: f64 = 5.0;

pub const EMPTY_CHART: &str = "No data available for this chart.";
pub const CHART_ERROR: &str = "Error loading chart.";

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: u64,
    /// Height in percent of the chart area.
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartView {
    Bars(Vec<Bar>),
    Empty(&'static str),
    Failed(&'static str),
}

pub fn chart_view<T: Into<ChartPoint>>(chart: &str, result: Result<Vec<T>, ApiError>) -> ChartView {
    match result {
        Ok(points) => {
            let points: Vec<ChartPoint> = points
                .into_iter()
                .map(|point| {
                    let point: ChartPoint = point.into();
                    ChartPoint {
                        label: month_label(&point.label),
                        value: point.value,
                    }
                })
                .collect();
            if points.is_empty() {
                ChartView::Empty(EMPTY_CHART)
            } else {
                ChartView::Bars(scale_bars(&points))
            }
        }
        Err(err) => {
            error!("error fetching {chart}: {err}");
            ChartView::Failed(CHART_ERROR)
        }
    }
}

/// Largest value in the series, never below 1.
pub fn max_value(points: &[ChartPoint]) -> u64 {
    points.iter().map(|p| p.value).fold(1, u64::max)
}

pub fn scale_bars(points: &[ChartPoint]) -> Vec<Bar> {
    let max = max_value(points) as f64;
    points
        .iter()
        .map(|point| Bar {
            label: point.label.clone(),
            value: point.value,
            height: (point.value as f64 / max * 100.0).max(MIN_BAR_HEIGHT),
        })
        .collect()
}

/// "Jan 2024" -> "Jan".
pub fn month_label(month_year: &str) -> String {
    month_year
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_string()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryView {
    pub books_read: String,
    pub pages_read: String,
    pub average_rating: String,
}

/// One decimal, halves rounded up.
fn format_rating(rating: f64) -> String {
    format!("{:.1}", (rating * 10.0).round() / 10.0)
}

pub fn summary_view(result: Result<StatsSummary, ApiError>) -> SummaryView {
    match result {
        Ok(summary) => SummaryView {
            books_read: summary.total_books_read.unwrap_or(0).to_string(),
            pages_read: summary.total_pages_read.unwrap_or(0).to_string(),
            average_rating: summary
                .average_rating
                .map(format_rating)
                .unwrap_or_else(|| "N/A".to_string()),
        },
        Err(err) => {
            error!("error fetching summary statistics: {err}");
            SummaryView {
                books_read: "Error".to_string(),
                pages_read: "Error".to_string(),
                average_rating: "Error".to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BooksPerMonth;

    fn point(label: &str, value: u64) -> ChartPoint {
        ChartPoint {
            label: label.to_string(),
            value,
        }
    }

    #[test]
    fn tallest_bar_is_full_height_and_others_scale() {
        let bars = scale_bars(&[point("Jan", 2), point("Feb", 8), point("Mar", 6)]);
        let heights: Vec<f64> = bars.iter().map(|b| b.height).collect();
        assert!((heights[1] - 100.0).abs() < 1e-9);
        assert!((heights[0] - 25.0).abs() < 1e-9);
        assert!((heights[2] - 75.0).abs() < 1e-9);
    }

    #[test]
    fn small_and_zero_values_get_minimum_height() {
        let bars = scale_bars(&[point("Jan", 0), point("Feb", 1), point("Mar", 100)]);
        assert_eq!(bars[0].height, MIN_BAR_HEIGHT);
        assert_eq!(bars[1].height, MIN_BAR_HEIGHT);
        assert_eq!(bars[2].height, 100.0);
    }

    #[test]
    fn all_zero_series_uses_floor_of_one() {
        let points = [point("Jan", 0), point("Feb", 0)];
        assert_eq!(max_value(&points), 1);
        assert!(scale_bars(&points)
            .iter()
            .all(|bar| bar.height == MIN_BAR_HEIGHT));
    }

    #[test]
    fn chart_view_labels_months_and_handles_empty() {
        let view = chart_view(
            "books per month",
            Ok(vec![
                BooksPerMonth {
                    month_year: "Jan 2024".into(),
                    count: 3,
                },
                BooksPerMonth {
                    month_year: "Feb 2024".into(),
                    count: 0,
                },
            ]),
        );
        let ChartView::Bars(bars) = view else {
            panic!("expected bars");
        };
        assert_eq!(bars[0].label, "Jan");
        assert_eq!(bars[1].label, "Feb");

        let empty = chart_view::<BooksPerMonth>("books per month", Ok(Vec::new()));
        assert_eq!(empty, ChartView::Empty(EMPTY_CHART));
    }

    #[test]
    fn summary_fallbacks() {
        let view = summary_view(Ok(StatsSummary {
            total_books_read: Some(12),
            total_pages_read: None,
            average_rating: Some(4.26),
        }));
        assert_eq!(view.books_read, "12");
        assert_eq!(view.pages_read, "0");
        assert_eq!(view.average_rating, "4.3");

        let tie = summary_view(Ok(StatsSummary {
            average_rating: Some(4.25),
            ..StatsSummary::default()
        }));
        assert_eq!(tie.average_rating, "4.3");
        assert_eq!(format_rating(3.0), "3.0");

        let missing = summary_view(Ok(StatsSummary::default()));
        assert_eq!(missing.average_rating, "N/A");

        let failed = summary_view(Err(ApiError::NotFound));
        assert_eq!(failed.books_read, "Error");
    }
}
