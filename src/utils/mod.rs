// src/utils/mod.rs
pub mod error;
pub mod logging;

pub use error::{AppError, ScanError}; // Re-export main error types for convenience
