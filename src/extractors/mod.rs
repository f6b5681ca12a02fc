// src/extractors/mod.rs
pub mod currency;
pub mod locator;
pub mod values;

// Re-export key extraction types for convenience
pub use currency::{CurrencyFormat, CurrencyPattern};
pub use locator::{SectionLocator, TargetRegion};
pub use values::{CategoryMarker, ValueExtractor};
