use crate::detail::offers_completion;
use crate::library::ListOutcome;
use crate::models::{Book, ReadingState};
use crate::nav::{book_details_href, destination, BRAND, NAV_LINKS};
use crate::profile::{ProfileView, Theme};
use crate::progress::progress_view;
use crate::stats::{ChartView, SummaryView};

pub const DEFAULT_COVER: &str = "https://via.placeholder.com/150x225.png?text=No+Cover";

/// Message shown above the book-details controls after a form post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
    ConfirmOverflow { requested: u32, total: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardStyle {
    /// Cover, title and author.
    Detailed,
    /// Cover and title.
    Compact,
}

pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn or_na(value: Option<String>) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .map(|v| escape_html(&v))
        .unwrap_or_else(|| "N/A".to_string())
}

fn nav_html(active: &str) -> String {
    let links: String = NAV_LINKS
        .iter()
        .map(|link| {
            let class = if link.href == active { " class=\"active\"" } else { "" };
            format!(r#"<a href="{}"{class}>{}</a>"#, link.href, link.text)
        })
        .collect();
    let home = destination(BRAND).unwrap_or("/");
    format!(
        r#"<header class="site-header">
      <a class="brand" href="{home}">{BRAND}</a>
      <nav class="site-nav">{links}</nav>
    </header>"#
    )
}

fn layout(theme: Theme, title: &str, active: &str, content: &str) -> String {
    let class = theme.html_class();
    let title = escape_html(title);
    let nav = nav_html(active);
    format!(
        r#"<!DOCTYPE html>
<html lang="en" class="{class}">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{title} - {BRAND}</title>
  <style>{STYLES}</style>
</head>
<body>
  <main class="app">
    {nav}
    {content}
  </main>
</body>
</html>
"#
    )
}

/// Full-page replacement used when a page cannot be rendered at all.
pub fn render_error_page(theme: Theme, message: &str) -> String {
    let content = format!(
        r#"<p class="page-error">{}</p>"#,
        escape_html(message)
    );
    layout(theme, "Error", "", &content)
}

pub fn book_card(book: &Book, style: CardStyle) -> String {
    let cover = escape_html(book.cover_image_url.as_deref().unwrap_or(DEFAULT_COVER));
    let href = book_details_href(book.id);
    let title = escape_html(&book.title);
    let author = match style {
        CardStyle::Detailed => format!(r#"<p class="card-author">{}</p>"#, escape_html(&book.author)),
        CardStyle::Compact => String::new(),
    };
    format!(
        r#"<a class="book-card" href="{href}" data-book-id="{id}">
          <div class="cover" style="background-image: url('{cover}')"></div>
          <p class="card-title">{title}</p>{author}
        </a>"#,
        id = book.id
    )
}

/// Container body for a list: cards, an empty message or an inline error.
pub fn list_html(outcome: &ListOutcome, style: CardStyle) -> String {
    match outcome {
        ListOutcome::Books(books) => books.iter().map(|book| book_card(book, style)).collect(),
        ListOutcome::Empty(message) => format!(r#"<p class="muted">{message}</p>"#),
        ListOutcome::Failed(message) => format!(r#"<p class="inline-error">{message}</p>"#),
    }
}

fn list_section(id: &str, heading: &str, outcome: &ListOutcome, style: CardStyle) -> String {
    format!(
        r#"<section class="list">
      <h2>{heading}</h2>
      <div id="{id}" class="book-grid">{}</div>
    </section>"#,
        list_html(outcome, style)
    )
}

pub fn render_dashboard(theme: Theme, currently: &ListOutcome, recent: &ListOutcome) -> String {
    let content = format!(
        "{}\n{}",
        list_section(
            "currently-reading-container",
            "Currently Reading",
            currently,
            CardStyle::Detailed
        ),
        list_section(
            "recently-read-container",
            "Recently Read",
            recent,
            CardStyle::Compact
        )
    );
    layout(theme, "Home", "/", &content)
}

pub fn render_explore(theme: Theme, term: &str, featured: &ListOutcome) -> String {
    let term = escape_html(term);
    let content = format!(
        r#"<section class="search">
      <form method="get" action="/explore" class="search-form">
        <input id="search-explore-input" type="search" name="q" value="{term}" placeholder="Search by title or author" />
        <button type="submit">Search</button>
        <a class="clear" href="/explore">Clear</a>
      </form>
    </section>
    {}"#,
        list_section(
            "featured-books-container",
            "Featured Books",
            featured,
            CardStyle::Compact
        )
    );
    layout(theme, "Explore", "/explore", &content)
}

pub fn render_my_books(theme: Theme, want_to_read: &ListOutcome) -> String {
    let content = list_section(
        "want-to-read-container",
        "Want to Read",
        want_to_read,
        CardStyle::Detailed,
    );
    layout(theme, "My Books", "/my-books", &content)
}

fn notice_html(book_id: i64, notice: Option<&Notice>) -> String {
    match notice {
        None => String::new(),
        Some(Notice::Success(message)) => {
            format!(r#"<p class="notice ok" role="status">{}</p>"#, escape_html(message))
        }
        Some(Notice::Error(message)) => {
            format!(r#"<p class="notice error" role="alert">{}</p>"#, escape_html(message))
        }
        Some(Notice::ConfirmOverflow { requested, total }) => format!(
            r#"<form id="confirm-overflow-form" class="notice warn" method="post" action="/books/{book_id}/progress">
          <p>Current page ({requested}) is greater than total pages ({total}). Do you want to proceed?</p>
          <input type="hidden" name="current_page" value="{requested}" />
          <input type="hidden" name="confirm_overflow" value="yes" />
          <button type="submit">Proceed</button>
          <a href="{}">Cancel</a>
        </form>"#,
            book_details_href(book_id)
        ),
    }
}

pub fn render_book_details(theme: Theme, book: &Book, notice: Option<&Notice>) -> String {
    let id = book.id;
    let title = escape_html(&book.title);
    let progress = progress_view(book);
    let cover = escape_html(book.cover_image_url.as_deref().unwrap_or(DEFAULT_COVER));
    let genre = or_na(book.genre.clone());
    let year = or_na(book.publication_year.map(|y| y.to_string()));
    let current_page = progress
        .current_page
        .map(|page| page.to_string())
        .unwrap_or_default();
    let options: String = ReadingState::ALL
        .iter()
        .map(|state| {
            let selected = if *state == progress.status { " selected" } else { "" };
            format!(
                r#"<option value="{}"{selected}>{}</option>"#,
                state.as_str(),
                state.label()
            )
        })
        .collect();
    let completion = if offers_completion(book) {
        format!(
            r#"<form id="mark-read-form" class="notice ok" method="post" action="/books/{id}/status">
          <p>You have finished the book!</p>
          <input type="hidden" name="status" value="read" />
          <button type="submit">Mark as Read</button>
        </form>"#
        )
    } else {
        String::new()
    };

    let content = format!(
        r#"<nav class="breadcrumb"><a href="/my-books">My Books</a> / <span id="breadcrumb-book-title">{title}</span></nav>
    <section class="book-header">
      <div id="book-cover-image" class="cover large" style="background-image: url('{cover}')"></div>
      <div>
        <h1 id="book-title">{title}</h1>
        <p id="book-author" class="muted">{author}</p>
        <p id="book-category-year" class="muted">{genre} · {year}</p>
      </div>
    </section>
    <section class="progress">
      <h2>Reading Progress</h2>
      <p id="progress-percentage" class="value">{percent}</p>
      <div class="bar-track"><div id="progress-bar" class="bar-fill" style="width: {width}%"></div></div>
      <p id="progress-pages" class="muted">{pages}</p>
      {notice}
      {completion}
      <form id="update-progress-form" method="post" action="/books/{id}/progress">
        <label for="currentPageInput">Current page</label>
        <input id="currentPageInput" name="current_page" value="{current_page}" inputmode="numeric" />
        <button id="updateProgressBtn" type="submit">Update Progress</button>
      </form>
      <form id="update-status-form" method="post" action="/books/{id}/status">
        <label for="statusDropdown">Status</label>
        <select id="statusDropdown" name="status">{options}</select>
        <button id="updateStatusBtn" type="submit">Update Status</button>
      </form>
    </section>
    <section class="about">
      <h2>About the Book</h2>
      <p id="book-description">{description}</p>
    </section>
    <section class="edition">
      <h2>My Edition</h2>
      <dl>
        <dt>Format</dt><dd id="edition-format">{format}</dd>
        <dt>Pages</dt><dd id="edition-pages">{page_count}</dd>
        <dt>Publisher</dt><dd id="edition-publisher">{publisher}</dd>
        <dt>Published</dt><dd id="edition-published-year">{year}</dd>
      </dl>
    </section>"#,
        author = escape_html(&book.author),
        percent = progress.percent_text,
        width = progress.bar_width,
        pages = progress.pages_text,
        notice = notice_html(id, notice),
        description = book
            .description
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .map(escape_html)
            .unwrap_or_else(|| "No description available.".to_string()),
        format = or_na(book.reading_status.as_ref().and_then(|rs| rs.format.clone())),
        page_count = or_na(book.total_pages().map(|p| p.to_string())),
        publisher = or_na(book.publisher.clone()),
    );
    layout(theme, &book.title, "", &content)
}

fn chart_html(id: &str, heading: &str, chart: &ChartView) -> String {
    let body = match chart {
        ChartView::Bars(bars) => {
            let columns: String = bars
                .iter()
                .map(|bar| {
                    format!(
                        r#"<div class="chart-col" title="{value}">
            <div class="chart-bar" style="height: {height:.1}%"></div>
            <p class="chart-label">{label}</p>
          </div>"#,
                        value = bar.value,
                        height = bar.height,
                        label = escape_html(&bar.label)
                    )
                })
                .collect();
            columns
        }
        ChartView::Empty(message) => format!(r#"<p class="muted">{message}</p>"#),
        ChartView::Failed(message) => format!(r#"<p class="inline-error">{message}</p>"#),
    };
    format!(
        r#"<section class="chart-area">
      <h2>{heading}</h2>
      <div id="{id}" class="chart">{body}</div>
    </section>"#
    )
}

pub fn render_stats(
    theme: Theme,
    summary: &SummaryView,
    books_per_month: &ChartView,
    pages_per_month: &ChartView,
) -> String {
    let content = format!(
        r#"<section class="panel">
      <div class="stat"><span class="label">Books read</span><span id="stats-books-read" class="value">{books}</span></div>
      <div class="stat"><span class="label">Pages read</span><span id="stats-total-pages-read" class="value">{pages}</span></div>
      <div class="stat"><span class="label">Average rating</span><span id="stats-average-rating" class="value">{rating}</span></div>
    </section>
    {books_chart}
    {pages_chart}"#,
        books = escape_html(&summary.books_read),
        pages = escape_html(&summary.pages_read),
        rating = escape_html(&summary.average_rating),
        books_chart = chart_html("books-per-month-chart", "Books Read per Month", books_per_month),
        pages_chart = chart_html("pages-per-month-chart", "Pages Read per Month", pages_per_month),
    );
    layout(theme, "Stats", "/stats", &content)
}

pub fn render_profile(theme: Theme, profile: &ProfileView) -> String {
    let avatar = profile
        .avatar_url
        .as_deref()
        .map(|url| {
            format!(
                r#"<div class="avatar" style="background-image: url('{}')"></div>"#,
                escape_html(url)
            )
        })
        .unwrap_or_else(|| r#"<div class="avatar"></div>"#.to_string());
    let theme_label = match theme {
        Theme::Dark => "Switch to light mode",
        Theme::Light => "Switch to dark mode",
    };
    let content = format!(
        r#"<section class="profile-header">
      {avatar}
      <div>
        <h1 id="profile-header-name">{name}</h1>
        <p id="profile-header-location" class="muted">{location}</p>
      </div>
    </section>
    <section class="info">
      <h2>Information</h2>
      <dl>
        <dt>Name</dt><dd id="info-name">{info_name}</dd>
        <dt>City</dt><dd id="info-city">{city}</dd>
        <dt>Country</dt><dd id="info-country">{country}</dd>
      </dl>
    </section>
    <section class="settings">
      <h2>Settings</h2>
      <form id="settings-theme" method="post" action="/profile/theme">
        <button type="submit">{theme_label}</button>
      </form>
    </section>"#,
        name = escape_html(&profile.display_name),
        location = escape_html(&profile.header_location),
        info_name = escape_html(&profile.info_name),
        city = escape_html(&profile.city),
        country = escape_html(&profile.country),
    );
    layout(theme, "Profile", "/profile", &content)
}

const STYLES: &str = r#"
    :root {
      --bg: #14191f;
      --card: #1d242c;
      --raised: #2b3540;
      --ink: #ffffff;
      --muted: #9dacbe;
      --accent: #dce8f3;
      --error: #f87171;
      --ok: #4ade80;
      --warn: #facc15;
    }

    html.light-mode {
      --bg: #f0f0f0;
      --card: #ffffff;
      --raised: #e5e7eb;
      --ink: #1f2937;
      --muted: #4b5563;
      --accent: #2f4858;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
    }

    a {
      color: inherit;
    }

    .app {
      width: min(960px, 100%);
      margin: 0 auto;
      padding: 24px 18px 48px;
      display: grid;
      gap: 28px;
    }

    .site-header {
      display: flex;
      align-items: center;
      justify-content: space-between;
      border-bottom: 1px solid var(--raised);
      padding-bottom: 14px;
    }

    .brand {
      font-weight: 700;
      font-size: 1.2rem;
      text-decoration: none;
    }

    .site-nav {
      display: flex;
      gap: 24px;
    }

    .site-nav a {
      text-decoration: none;
      color: var(--muted);
    }

    .site-nav a.active {
      color: var(--ink);
    }

    h1, h2 {
      margin: 0 0 10px;
    }

    .muted {
      color: var(--muted);
    }

    .book-grid {
      display: grid;
      grid-template-columns: repeat(auto-fill, minmax(158px, 1fr));
      gap: 14px;
    }

    .book-card {
      display: flex;
      flex-direction: column;
      gap: 8px;
      text-decoration: none;
    }

    .cover {
      width: 100%;
      aspect-ratio: 3 / 4;
      background-size: cover;
      background-position: center;
      border-radius: 12px;
      background-color: var(--raised);
    }

    .cover.large {
      width: 180px;
    }

    .card-title {
      margin: 0;
      font-weight: 500;
    }

    .card-author {
      margin: 0;
      color: var(--muted);
      font-size: 0.9rem;
    }

    .book-header, .profile-header {
      display: flex;
      gap: 24px;
      align-items: flex-end;
    }

    .bar-track {
      height: 8px;
      background: var(--raised);
      border-radius: 999px;
      overflow: hidden;
    }

    .bar-fill {
      height: 100%;
      background: var(--accent);
    }

    form {
      display: flex;
      flex-wrap: wrap;
      align-items: center;
      gap: 10px;
      margin: 12px 0;
    }

    input, select, button {
      font: inherit;
      border-radius: 10px;
      border: 1px solid var(--raised);
      padding: 8px 12px;
      background: var(--card);
      color: var(--ink);
    }

    button {
      cursor: pointer;
      background: var(--raised);
      font-weight: 600;
    }

    .notice {
      border-radius: 12px;
      padding: 10px 14px;
      background: var(--card);
    }

    .notice.error, .inline-error, .page-error {
      color: var(--error);
    }

    .notice.ok {
      color: var(--ok);
    }

    .notice.warn {
      color: var(--warn);
    }

    .page-error {
      text-align: center;
      padding: 32px;
    }

    dl {
      display: grid;
      grid-template-columns: 140px 1fr;
      gap: 8px 16px;
    }

    dt {
      color: var(--muted);
    }

    dd {
      margin: 0;
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
      gap: 16px;
    }

    .stat {
      background: var(--card);
      border-radius: 18px;
      padding: 18px;
      display: grid;
      gap: 8px;
    }

    .stat .label {
      font-size: 0.85rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: var(--muted);
    }

    .stat .value {
      font-size: 1.7rem;
      font-weight: 600;
    }

    .chart {
      display: grid;
      grid-auto-flow: column;
      grid-auto-columns: 1fr;
      align-items: end;
      gap: 10px;
      min-height: 180px;
    }

    .chart-col {
      display: flex;
      flex-direction: column;
      justify-content: flex-end;
      height: 180px;
    }

    .chart-bar {
      width: 100%;
      background: var(--raised);
      border-top: 2px solid var(--muted);
    }

    .chart-label {
      margin: 6px 0 0;
      text-align: center;
      font-size: 13px;
      font-weight: 700;
      color: var(--muted);
    }

    .avatar {
      width: 128px;
      height: 128px;
      border-radius: 50%;
      background-size: cover;
      background-position: center;
      background-color: var(--raised);
    }

    @media (max-width: 600px) {
      .site-nav {
        gap: 12px;
        flex-wrap: wrap;
      }
      .book-header, .profile-header {
        flex-direction: column;
        align-items: flex-start;
      }
    }
"#;
