// src/utils/error.rs
use thiserror::Error;

/// The only two outcomes a scan can fail with.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScanError {
    /// No target region was located. This is an expected outcome, not a fault.
    #[error("No target elements found on this page")]
    NoTargetFound,

    /// Something went wrong while walking the tree or reading text.
    #[error("Error reading elements: {0}")]
    ExtractionFailed(String),
}

/// Faults raised by a document tree while it is being read.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NodeError {
    #[error("node is no longer attached to the document: {0}")]
    Detached(String),

    #[error("could not read text content: {0}")]
    Unreadable(String),
}

impl From<NodeError> for ScanError {
    fn from(err: NodeError) -> Self {
        ScanError::ExtractionFailed(err.to_string())
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid currency pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

// Errors raised while fetching or reading the page to scan
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP error: {0}")]
    Http(reqwest::StatusCode),

    #[error("Access denied by remote host")]
    Forbidden,

    #[error("Page not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ServiceError {
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error("page context is no longer available")]
    ContextClosed,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Could not load page: {0}")]
    Source(#[from] SourceError),

    #[error("Scan failed: {0}")]
    Service(#[from] ServiceError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
