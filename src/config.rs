// src/config.rs
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::aggregate::{ColumnRules, Policy};
use crate::document::Matcher;
use crate::extractors::{CategoryMarker, CurrencyFormat};
use crate::models::Category;
use crate::utils::error::ConfigError;

/// Default structural markers of the scanned page.
pub const TARGET_MARKER: &str = "h-[27.3rem]";
pub const COLUMN_CLASS: &str = "w-1/2";
pub const ROW_CLASSES: [&str; 3] = ["flex", "items-center", "h-10"];
pub const CRASH_MARKER_CLASS: &str = "crash-bg-btn";
pub const MOON_MARKER_CLASS: &str = "moon-bg-btn";

/// Everything a scan needs to know about the page layout and the totals policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    pub target: Matcher,
    pub column: Matcher,
    pub row: Matcher,
    /// Text-bearing leaves inside a row.
    pub text: Matcher,
    /// Checked in order; the first marker present in a row decides its category.
    pub markers: Vec<CategoryMarker>,
    pub columns: ColumnRules,
    pub currency: CurrencyFormat,
    pub policy: Policy,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            target: Matcher::class_contains(TARGET_MARKER),
            column: Matcher::classes(Some("div"), &[COLUMN_CLASS]),
            row: Matcher::classes(Some("div"), &ROW_CLASSES),
            text: Matcher::tag("span"),
            markers: vec![
                CategoryMarker {
                    category: Category::Crash,
                    matcher: Matcher::classes(None, &[CRASH_MARKER_CLASS]),
                },
                CategoryMarker {
                    category: Category::Moon,
                    matcher: Matcher::classes(None, &[MOON_MARKER_CLASS]),
                },
            ],
            columns: ColumnRules::default(),
            currency: CurrencyFormat::default(),
            policy: Policy::default(),
        }
    }
}

impl ScanConfig {
    /// Loads a JSON config file. Missing fields fall back to the defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        tracing::info!("Loading scan config from {}", path.display());
        let raw = std::fs::read_to_string(path)?;
        let config: ScanConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.columns.validate()?;
        if let Some(marker) = self.markers.iter().find(|m| !m.category.is_special()) {
            return Err(ConfigError::Invalid(format!(
                "marker {} maps to the normal category",
                marker.matcher.describe()
            )));
        }
        Ok(())
    }
}
