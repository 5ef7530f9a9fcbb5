// src/lib.rs
use std::sync::Arc;

pub mod catalog;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod services;
pub mod session;

pub use errors::AdsmithError;

use crate::services::GenerationClient;

#[derive(Clone)]
pub struct AppState {
    pub generation_client: Arc<GenerationClient>,
}
