pub mod config;
pub mod error;

// Provider access and search logic
pub mod provider;
pub mod search;

// HTTP surface
pub mod api;
pub mod web;

pub mod cli;

// Utilities
pub mod utils;

// Re-exports
pub use config::Settings;
pub use error::{Error, Result};
