//! Campreserv Booking Desk Service
//!
//! Staff-facing REST service that owns the booking flow: draft lifecycle,
//! availability filtering, pricing, validation and reservation submission
//! against the Campreserv core API.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod store;
pub mod upstream;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
