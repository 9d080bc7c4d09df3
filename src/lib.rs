//! Bookcat
//!
//! A single-user book catalog and loan manager: books are added, edited,
//! selected, filtered and lent out, with state kept in a key-value blob store
//! and a local REST JSON API driving the screens.

use std::sync::Arc;

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
