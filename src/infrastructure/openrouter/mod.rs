//! OpenRouter completion adapter.

pub mod client;
pub mod types;

pub use client::{OpenRouterClient, API_KEY_ENV};
