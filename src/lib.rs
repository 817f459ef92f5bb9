//! Translation Service Library
//!
//! Multi-tenant key/value translation store with API-key authentication.

use std::sync::Arc;

use crate::security::Authenticator;
use crate::service::TranslationService;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: TranslationService,
    pub authenticator: Arc<Authenticator>,
}

pub mod api;
pub mod app;
pub mod config;
pub mod errors;
pub mod security;
pub mod service;
pub mod store;

pub use errors::{internal_error, ApiError};
