// src/scanner.rs
//! The scan pipeline: locate regions, extract each column, aggregate.

use scraper::Html;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::aggregate::{Aggregator, Policy, ScanResult};
use crate::config::ScanConfig;
use crate::document::DocumentNode;
use crate::extractors::{CurrencyPattern, SectionLocator, ValueExtractor};
use crate::models::Column;
use crate::utils::error::{ConfigError, ScanError};

pub struct Scanner {
    config: ScanConfig,
    pattern: CurrencyPattern,
    aggregator: Aggregator,
}

impl Scanner {
    pub fn new(config: ScanConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let pattern = CurrencyPattern::new(&config.currency)?;
        let aggregator = Aggregator::new(config.policy, config.columns);
        Ok(Self {
            config,
            pattern,
            aggregator,
        })
    }

    pub fn policy(&self) -> Policy {
        self.aggregator.policy()
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Parses `html` and scans it. Nothing is cached between calls.
    pub fn scan_html(&self, html: &str) -> Result<ScanResult, ScanError> {
        let document = Html::parse_document(html);
        if !document.errors.is_empty() {
            tracing::trace!("HTML parser reported {} recoverable error(s)", document.errors.len());
        }
        self.scan(document.root_element())
    }

    /// Runs the whole pipeline over the tree rooted at `root`.
    ///
    /// Tree faults and panics escaping the traversal come back as
    /// [`ScanError::ExtractionFailed`].
    pub fn scan<N: DocumentNode>(&self, root: N) -> Result<ScanResult, ScanError> {
        match panic::catch_unwind(AssertUnwindSafe(|| self.run(root))) {
            Ok(outcome) => outcome,
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                tracing::error!("Scan aborted: {}", message);
                Err(ScanError::ExtractionFailed(message))
            }
        }
    }

    fn run<N: DocumentNode>(&self, root: N) -> Result<ScanResult, ScanError> {
        let regions = SectionLocator::new(&self.config.target, &self.config.column).locate(root);
        if regions.is_empty() {
            tracing::info!(
                "No elements matching {} found",
                self.config.target.describe()
            );
            return Err(ScanError::NoTargetFound);
        }

        let extractor = ValueExtractor::new(
            &self.config.row,
            &self.config.text,
            &self.config.markers,
            &self.pattern,
        )
        .skip_marked_rows(self.policy().excludes_marked_rows());

        let mut values = Vec::new();
        for region in &regions {
            let Some(columns) = region.columns else {
                continue;
            };
            for column in Column::ALL {
                values.extend(extractor.extract(columns[column.index()], region.index, column)?);
            }
        }

        tracing::info!(
            "Read {} value(s) from {} target element(s)",
            values.len(),
            regions.len()
        );
        Ok(self.aggregator.aggregate(&values, regions.len()))
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown fault during traversal".to_string()
    }
}
