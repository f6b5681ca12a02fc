// src/document/matcher.rs
use serde::{Deserialize, Serialize};

use super::DocumentNode;

/// A structural predicate over a single element.
///
/// Matchers are plain data so they can be loaded from a config file and
/// tested without any particular tree behind them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Matcher {
    /// The `class` attribute contains `value` as a substring (`[class*=...]`).
    ClassContains { value: String },
    /// Every listed class token is present, and the tag matches when given
    /// (`div.flex.items-center`).
    Classes {
        #[serde(default)]
        tag: Option<String>,
        classes: Vec<String>,
    },
    /// Tag name only.
    Tag { name: String },
}

impl Matcher {
    pub fn class_contains(value: impl Into<String>) -> Self {
        Matcher::ClassContains { value: value.into() }
    }

    pub fn classes(tag: Option<&str>, classes: &[&str]) -> Self {
        Matcher::Classes {
            tag: tag.map(str::to_string),
            classes: classes.iter().map(|c| c.to_string()).collect(),
        }
    }

    pub fn tag(name: impl Into<String>) -> Self {
        Matcher::Tag { name: name.into() }
    }

    pub fn matches<N: DocumentNode>(&self, node: &N) -> bool {
        match self {
            Matcher::ClassContains { value } => node
                .class_attr()
                .map_or(false, |attr| attr.contains(value.as_str())),
            Matcher::Classes { tag, classes } => {
                if let Some(tag) = tag {
                    if !node.tag_name().eq_ignore_ascii_case(tag) {
                        return false;
                    }
                }
                let attr = node.class_attr().unwrap_or("");
                classes
                    .iter()
                    .all(|wanted| attr.split_ascii_whitespace().any(|c| c == wanted))
            }
            Matcher::Tag { name } => node.tag_name().eq_ignore_ascii_case(name),
        }
    }

    /// Short human-readable form for log lines.
    pub fn describe(&self) -> String {
        match self {
            Matcher::ClassContains { value } => format!("[class*=\"{}\"]", value),
            Matcher::Classes { tag, classes } => {
                format!("{}.{}", tag.as_deref().unwrap_or(""), classes.join("."))
            }
            Matcher::Tag { name } => name.clone(),
        }
    }
}
