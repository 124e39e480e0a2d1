use crate::detail::{parse_page_input, plan_progress_update, plan_status_update, ProgressPlan};
use crate::errors::{ApiError, AppError};
use crate::library::{
    self, ListOutcome, EMPTY_CURRENTLY_READING, EMPTY_RECENTLY_READ, EMPTY_SEARCH,
    EMPTY_WANT_TO_READ,
};
use crate::models::{Book, ReadingState, UpdateRequest};
use crate::nav::book_details_href;
use crate::profile::{profile_view, Theme};
use crate::state::AppState;
use crate::stats::{chart_view, summary_view};
use crate::ui::{self, Notice};
use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use tracing::{error, info, warn};

#[derive(Debug, Deserialize)]
pub struct ExploreQuery {
    #[serde(default)]
    pub q: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DetailQuery {
    #[serde(default)]
    pub book_id: Option<String>,
    #[serde(default)]
    pub notice: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ProgressForm {
    #[serde(default)]
    pub current_page: String,
    #[serde(default)]
    pub confirm_overflow: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StatusForm {
    #[serde(default)]
    pub status: String,
}

pub async fn dashboard(State(state): State<AppState>, headers: HeaderMap) -> Html<String> {
    let theme = Theme::from_headers(&headers);
    let (currently, read) = tokio::join!(
        state.api.list_books(Some(ReadingState::CurrentlyReading)),
        state.api.list_books(Some(ReadingState::Read)),
    );

    let currently = ListOutcome::from_result("currently reading", currently, EMPTY_CURRENTLY_READING);
    let recent = ListOutcome::from_result(
        "recently read",
        read.map(library::recently_read),
        EMPTY_RECENTLY_READ,
    );
    Html(ui::render_dashboard(theme, &currently, &recent))
}

pub async fn explore(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ExploreQuery>,
) -> Html<String> {
    let theme = Theme::from_headers(&headers);
    let term = query.q.unwrap_or_default();
    let featured = state
        .api
        .list_books(None)
        .await
        .map(library::featured)
        .map(|books| library::search(&books, &term));
    let outcome = ListOutcome::from_result("featured", featured, EMPTY_SEARCH);
    Html(ui::render_explore(theme, term.trim(), &outcome))
}

pub async fn my_books(State(state): State<AppState>, headers: HeaderMap) -> Html<String> {
    let theme = Theme::from_headers(&headers);
    let books = state.api.list_books(Some(ReadingState::WantToRead)).await;
    let outcome = ListOutcome::from_result("want to read", books, EMPTY_WANT_TO_READ);
    Html(ui::render_my_books(theme, &outcome))
}

pub async fn book_details(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<DetailQuery>,
) -> Result<Html<String>, AppError> {
    let theme = Theme::from_headers(&headers);
    let id = parse_book_id(query.book_id.as_deref()).map_err(|err| err.with_theme(theme))?;
    let book = load_book(&state, id, theme).await?;
    let notice = query.notice.as_deref().and_then(Flash::parse).map(Flash::notice);
    Ok(Html(ui::render_book_details(theme, &book, notice.as_ref())))
}

pub async fn update_progress(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(raw_id): Path<String>,
    Form(form): Form<ProgressForm>,
) -> Result<Response, AppError> {
    let theme = Theme::from_headers(&headers);
    let id = parse_book_id(Some(&raw_id)).map_err(|err| err.with_theme(theme))?;
    let book = load_book(&state, id, theme).await?;

    let page = match parse_page_input(&form.current_page) {
        Ok(page) => page,
        Err(err) => {
            warn!(book_id = id, input = %form.current_page, "rejected page input");
            let notice = Notice::Error(err.to_string());
            let html = ui::render_book_details(theme, &book, Some(&notice));
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(html)).into_response());
        }
    };

    let confirmed = form.confirm_overflow.as_deref() == Some("yes");
    let update = match plan_progress_update(&book, page, confirmed) {
        ProgressPlan::Send(update) => update,
        ProgressPlan::ConfirmOverflow { requested, total } => {
            let notice = Notice::ConfirmOverflow { requested, total };
            return Ok(Html(ui::render_book_details(theme, &book, Some(&notice))).into_response());
        }
    };

    apply_update(
        &state,
        theme,
        id,
        &update,
        Flash::ProgressUpdated,
        "Failed to update progress",
    )
    .await
}

pub async fn update_status(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(raw_id): Path<String>,
    Form(form): Form<StatusForm>,
) -> Result<Response, AppError> {
    let theme = Theme::from_headers(&headers);
    let id = parse_book_id(Some(&raw_id)).map_err(|err| err.with_theme(theme))?;
    let book = load_book(&state, id, theme).await?;

    let Some(status) = ReadingState::parse(&form.status) else {
        warn!(book_id = id, status = %form.status, "rejected status");
        let notice = Notice::Error("Please choose a valid status.".to_string());
        let html = ui::render_book_details(theme, &book, Some(&notice));
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(html)).into_response());
    };

    let update = plan_status_update(&book, status);
    apply_update(
        &state,
        theme,
        id,
        &update,
        Flash::StatusUpdated,
        "Failed to update status",
    )
    .await
}

/// Confirmation carried across the redirect that follows a successful update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flash {
    ProgressUpdated,
    StatusUpdated,
}

impl Flash {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "progress-updated" => Some(Self::ProgressUpdated),
            "status-updated" => Some(Self::StatusUpdated),
            _ => None,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::ProgressUpdated => "progress-updated",
            Self::StatusUpdated => "status-updated",
        }
    }

    fn notice(self) -> Notice {
        let text = match self {
            Self::ProgressUpdated => "Progress updated successfully!",
            Self::StatusUpdated => "Status updated successfully!",
        };
        Notice::Success(text.to_string())
    }
}

/// Sends the update. Success redirects to the details page so a reload
/// re-reads the book instead of repeating the PUT; failure renders in place
/// from whatever the backend now holds.
async fn apply_update(
    state: &AppState,
    theme: Theme,
    id: i64,
    update: &UpdateRequest,
    flash: Flash,
    failure: &str,
) -> Result<Response, AppError> {
    match state.api.update_book(id, update).await {
        Ok(_) => {
            info!(
                book_id = id,
                page = update.current_page,
                status = update.status.as_str(),
                "book updated"
            );
            let target = format!("{}&notice={}", book_details_href(id), flash.as_str());
            Ok(Redirect::to(&target).into_response())
        }
        Err(err) => {
            error!(book_id = id, "{failure}: {err}");
            let reason = match &err {
                ApiError::NotFound => "Reading status not found for this book".to_string(),
                other => other.to_string(),
            };
            let current = load_book(state, id, theme).await?;
            let notice = Notice::Error(format!("{failure}: {reason}"));
            Ok(Html(ui::render_book_details(theme, &current, Some(&notice))).into_response())
        }
    }
}

pub async fn stats(State(state): State<AppState>, headers: HeaderMap) -> Html<String> {
    let theme = Theme::from_headers(&headers);
    let (summary, books, pages) = tokio::join!(
        state.api.summary(),
        state.api.books_per_month(),
        state.api.pages_per_month(),
    );
    Html(ui::render_stats(
        theme,
        &summary_view(summary),
        &chart_view("books per month", books),
        &chart_view("pages per month", pages),
    ))
}

pub async fn profile(State(state): State<AppState>, headers: HeaderMap) -> Html<String> {
    let theme = Theme::from_headers(&headers);
    let view = profile_view(state.api.profile().await);
    Html(ui::render_profile(theme, &view))
}

pub async fn toggle_theme(headers: HeaderMap) -> impl IntoResponse {
    let theme = Theme::from_headers(&headers).toggled();
    (
        [(header::SET_COOKIE, theme.set_cookie())],
        Redirect::to("/profile"),
    )
}

pub async fn not_found(headers: HeaderMap) -> AppError {
    AppError::not_found("Page not found.").with_theme(Theme::from_headers(&headers))
}

fn parse_book_id(raw: Option<&str>) -> Result<i64, AppError> {
    raw.map(str::trim)
        .filter(|id| !id.is_empty())
        .and_then(|id| id.parse::<i64>().ok())
        .ok_or_else(|| {
            error!("book id not found in request");
            AppError::missing_book_id()
        })
}

async fn load_book(state: &AppState, id: i64, theme: Theme) -> Result<Book, AppError> {
    state.api.get_book(id).await.map_err(|err| {
        error!(book_id = id, "error fetching book details: {err}");
        AppError::book_lookup(&err).with_theme(theme)
    })
}
