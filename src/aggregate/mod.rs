// src/aggregate/mod.rs
//! Pools classified values per column and computes category totals.
//!
//! Three combination policies exist; exactly one governs a given
//! [`ScanResult`], and the result records which one it was.

use serde::{Deserialize, Serialize};

use crate::models::{Category, ClassifiedValue, Column};
use crate::utils::error::ConfigError;

/// How special-category values combine with normal ones.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum Policy {
    /// Net = sum(Normal) - sum(special). Special values are tracked separately.
    #[default]
    #[value(name = "net", alias = "a")]
    NetWithSubtraction,
    /// Marked rows are dropped before extraction. Net = sum(Normal).
    #[value(name = "exclude", alias = "b")]
    Exclusion,
    /// Normal and special totals are reported side by side with no net value.
    #[value(name = "breakdown", alias = "c")]
    FullBreakdown,
}

impl Policy {
    /// Whether rows bearing any marker must be dropped at extraction time.
    pub fn excludes_marked_rows(self) -> bool {
        self == Policy::Exclusion
    }
}

/// Which special category is valid in which column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRules {
    pub left: Category,
    pub right: Category,
}

impl Default for ColumnRules {
    fn default() -> Self {
        Self {
            left: Category::Crash,
            right: Category::Moon,
        }
    }
}

impl ColumnRules {
    pub fn special_for(&self, column: Column) -> Category {
        match column {
            Column::Left => self.left,
            Column::Right => self.right,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for column in Column::ALL {
            if !self.special_for(column).is_special() {
                return Err(ConfigError::Invalid(format!(
                    "{} column needs a special category, got normal",
                    column
                )));
            }
        }
        Ok(())
    }
}

/// Values of one category in one column, with their sum.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: Category,
    pub values: Vec<f64>,
    pub sum: f64,
}

impl CategoryTotal {
    fn new(category: Category, values: Vec<f64>) -> Self {
        let sum = sum(&values);
        Self {
            category,
            values,
            sum,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSummary {
    pub column: Column,
    pub special_category: Category,
    pub normal: CategoryTotal,
    /// `None` when special categories are not tracked.
    pub special: Option<CategoryTotal>,
    /// Values whose row carried a marker that belongs to the other column.
    pub off_column: Vec<CategoryTotal>,
    /// `None` under the full breakdown policy.
    pub net_sum: Option<f64>,
}

impl ColumnSummary {
    /// The value list shown to the user: normal values only.
    pub fn reported_values(&self) -> &[f64] {
        &self.normal.values
    }

    pub fn special_sum(&self) -> f64 {
        self.special.as_ref().map_or(0.0, |s| s.sum)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    pub policy: Policy,
    pub left: ColumnSummary,
    pub right: ColumnSummary,
    pub elements_found: usize,
}

impl ScanResult {
    pub fn column(&self, column: Column) -> &ColumnSummary {
        match column {
            Column::Left => &self.left,
            Column::Right => &self.right,
        }
    }
}

/// Plain left-to-right accumulation. Starts at `+0.0` so an empty list sums to
/// exactly zero.
pub fn sum(values: &[f64]) -> f64 {
    values.iter().fold(0.0, |acc, v| acc + v)
}

pub struct Aggregator {
    policy: Policy,
    rules: ColumnRules,
}

impl Aggregator {
    pub fn new(policy: Policy, rules: ColumnRules) -> Self {
        Self { policy, rules }
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    pub fn rules(&self) -> &ColumnRules {
        &self.rules
    }

    /// `values` must already be in region order, then extraction order.
    pub fn aggregate(&self, values: &[ClassifiedValue], elements_found: usize) -> ScanResult {
        let result = ScanResult {
            policy: self.policy,
            left: self.summarize(values, Column::Left),
            right: self.summarize(values, Column::Right),
            elements_found,
        };
        tracing::debug!(
            "Aggregated {} value(s) under {:?}: left net {:?}, right net {:?}",
            values.len(),
            self.policy,
            result.left.net_sum,
            result.right.net_sum
        );
        result
    }

    fn summarize(&self, values: &[ClassifiedValue], column: Column) -> ColumnSummary {
        let special_category = self.rules.special_for(column);
        let pick = |category: Category| -> Vec<f64> {
            values
                .iter()
                .filter(|v| v.column == column && v.category == category)
                .map(|v| v.value)
                .collect()
        };

        let normal = CategoryTotal::new(Category::Normal, pick(Category::Normal));

        if self.policy == Policy::Exclusion {
            let dropped = values
                .iter()
                .filter(|v| v.column == column && v.category.is_special())
                .count();
            if dropped > 0 {
                tracing::warn!(
                    "Ignoring {} marked value(s) in {} column under exclusion policy",
                    dropped,
                    column
                );
            }
            let net_sum = Some(normal.sum);
            return ColumnSummary {
                column,
                special_category,
                normal,
                special: None,
                off_column: Vec::new(),
                net_sum,
            };
        }

        let special = CategoryTotal::new(special_category, pick(special_category));

        // Only specials can be off-column; keep them in first-seen order
        let mut off_column: Vec<CategoryTotal> = Vec::new();
        for v in values.iter().filter(|v| {
            v.column == column && v.category.is_special() && v.category != special_category
        }) {
            if !off_column.iter().any(|t| t.category == v.category) {
                tracing::debug!(
                    "{} marker found in {} column; tracked apart from its totals",
                    v.category,
                    column
                );
                off_column.push(CategoryTotal::new(v.category, pick(v.category)));
            }
        }

        let net_sum = match self.policy {
            Policy::NetWithSubtraction => Some(normal.sum - special.sum),
            _ => None,
        };

        ColumnSummary {
            column,
            special_category,
            normal,
            special: Some(special),
            off_column,
            net_sum,
        }
    }
}
