//! Biblio - Bibliographic Catalog Server
//!
//! A Rust REST API server for a small bibliographic catalog: Authors and
//! Books related many-to-many, with JWT-gated mutations.

use std::sync::Arc;

pub mod api;
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
