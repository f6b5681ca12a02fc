// src/report.rs
//! Rendering of scan results for the command line.

use serde::Serialize;

use crate::aggregate::{ColumnSummary, Policy, ScanResult};
use crate::models::Column;
use crate::utils::error::ScanError;

/// `$` followed by two decimals, no thousands separators.
pub fn format_amount(value: f64) -> String {
    format!("${:.2}", value)
}

fn column_title(column: Column) -> &'static str {
    match column {
        Column::Left => "Left column",
        Column::Right => "Right column",
    }
}

fn join_amounts(values: &[f64]) -> String {
    if values.is_empty() {
        return "No values found".to_string();
    }
    values
        .iter()
        .map(|v| format_amount(*v))
        .collect::<Vec<_>>()
        .join(", ")
}

fn render_column(summary: &ColumnSummary, policy: Policy, out: &mut Vec<String>) {
    let title = column_title(summary.column);
    let values = summary.reported_values();
    out.push(format!("{} values: {}", title, join_amounts(values)));

    match policy {
        // An empty column shows a flat $0.00, whatever was subtracted
        Policy::NetWithSubtraction if values.is_empty() => {
            out.push(format!("{} sum: {}", title, format_amount(0.0)));
        }
        Policy::NetWithSubtraction => {
            let mut line = format!(
                "{} sum: {}",
                title,
                format_amount(summary.net_sum.unwrap_or(0.0))
            );
            let subtracted = summary.special_sum();
            if subtracted > 0.0 {
                line.push_str(&format!(
                    " ({} subtracted: {})",
                    summary.special_category,
                    format_amount(subtracted)
                ));
            }
            out.push(line);
        }
        Policy::Exclusion => {
            out.push(format!(
                "{} sum: {}",
                title,
                format_amount(summary.net_sum.unwrap_or(0.0))
            ));
        }
        Policy::FullBreakdown => {
            let special_values = summary
                .special
                .as_ref()
                .map_or(&[][..], |s| s.values.as_slice());
            out.push(format!(
                "{} {} values: {}",
                title,
                summary.special_category,
                join_amounts(special_values)
            ));
            out.push(format!(
                "{} normal sum: {}",
                title,
                format_amount(summary.normal.sum)
            ));
            out.push(format!(
                "{} {} sum: {}",
                title,
                summary.special_category,
                format_amount(summary.special_sum())
            ));
        }
    }

    for stray in &summary.off_column {
        out.push(format!(
            "{} {} values (not counted): {}",
            title,
            stray.category,
            format_amount(stray.sum)
        ));
    }
}

pub fn render_text(result: &ScanResult) -> String {
    let mut out = Vec::new();
    render_column(&result.left, result.policy, &mut out);
    render_column(&result.right, result.policy, &mut out);
    out.push(format!(
        "Successfully read {} element(s)",
        result.elements_found
    ));
    out.push(format!(
        "Found {} normal values in left column, {} normal values in right column",
        result.left.reported_values().len(),
        result.right.reported_values().len()
    ));
    out.join("\n")
}

pub fn render_error(err: &ScanError) -> String {
    format!("Error: {}", err)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport<'a> {
    scanned_at: String,
    result: &'a ScanResult,
}

pub fn render_json(result: &ScanResult) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonReport {
        scanned_at: chrono::Utc::now().to_rfc3339(),
        result,
    })
}
