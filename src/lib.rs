pub mod api;
pub mod app;
pub mod config;
pub mod detail;
pub mod errors;
pub mod handlers;
pub mod library;
pub mod models;
pub mod nav;
pub mod profile;
pub mod progress;
pub mod stats;
pub mod ui;
pub mod state;

pub use api::BookApi;
pub use app::router;
pub use config::Config;
pub use state::AppState;
