pub const BRAND: &str = "BookTracker";
pub const HOME: &str = "/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    pub text: &'static str,
    pub href: &'static str,
}

pub const NAV_LINKS: &[NavLink] = &[
    NavLink { text: "Home", href: "/" },
    NavLink { text: "My Books", href: "/my-books" },
    NavLink { text: "Explore", href: "/explore" },
    NavLink { text: "Stats", href: "/stats" },
    NavLink { text: "Community", href: "/profile" },
];

/// Page a header link points at, matched on its visible text.
pub fn destination(text: &str) -> Option<&'static str> {
    let text = text.trim();
    if text == BRAND {
        return Some(HOME);
    }
    NAV_LINKS
        .iter()
        .find(|link| link.text == text)
        .map(|link| link.href)
}

pub fn book_details_href(id: i64) -> String {
    format!("/book-details?book_id={id}")
}
