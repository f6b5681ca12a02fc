// src/models.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of a column inside a target region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Left,
    Right,
}

impl Column {
    pub const ALL: [Column; 2] = [Column::Left, Column::Right];

    pub fn index(self) -> usize {
        match self {
            Column::Left => 0,
            Column::Right => 1,
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Column::Left => write!(f, "left"),
            Column::Right => write!(f, "right"),
        }
    }
}

/// Classification tag assigned to a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Normal,
    Crash,
    Moon,
}

impl Category {
    pub fn is_special(self) -> bool {
        self != Category::Normal
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Normal => write!(f, "normal"),
            Category::Crash => write!(f, "crash"),
            Category::Moon => write!(f, "moon"),
        }
    }
}

/// A parsed, strictly positive amount together with where it came from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClassifiedValue {
    pub value: f64,
    pub category: Category,
    /// Index of the target region in document order.
    pub region: usize,
    pub column: Column,
}
