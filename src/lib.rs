// src/lib.rs
//! Scans a page for currency amounts laid out in two-column target regions,
//! classifies each amount by the marker badges on its row, and totals them.

pub mod aggregate;
pub mod config;
pub mod document;
pub mod extractors;
pub mod models;
pub mod report;
pub mod scanner;
pub mod service;
pub mod source;
pub mod utils;

pub use aggregate::{Aggregator, CategoryTotal, ColumnRules, ColumnSummary, Policy, ScanResult};
pub use config::ScanConfig;
pub use document::{DocumentNode, Matcher};
pub use models::{Category, ClassifiedValue, Column};
pub use scanner::Scanner;
pub use service::PageHandle;
pub use utils::error::{NodeError, ScanError};
