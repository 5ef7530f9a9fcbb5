// src/services/mod.rs
pub mod gemini;
pub mod generation_client;
pub mod prompt_composer;

pub use gemini::{GeminiClient, GenerationService};
pub use generation_client::{GenerationClient, RetryPolicy};
