// src/extractors/currency.rs
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::utils::error::ConfigError;

// Symbol, digit groups with optional thousands separators, optional fraction.
// Greedy `[\d,]+` means `\.?\d*` behaves like an optional `.digits` tail.
static DEFAULT_CURRENCY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$[\d,]+(?:\.\d*)?").expect("Failed to compile DEFAULT_CURRENCY_RE")
});

/// How currency amounts are written on the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyFormat {
    pub symbol: char,
    pub thousands_separator: char,
    pub decimal_point: char,
    /// When false, bare digit groups are picked up as well.
    pub symbol_required: bool,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self {
            symbol: '$',
            thousands_separator: ',',
            decimal_point: '.',
            symbol_required: true,
        }
    }
}

/// Compiled currency token pattern.
#[derive(Debug, Clone)]
pub struct CurrencyPattern {
    regex: Regex,
    format: CurrencyFormat,
}

impl Default for CurrencyPattern {
    fn default() -> Self {
        Self {
            regex: DEFAULT_CURRENCY_RE.clone(),
            format: CurrencyFormat::default(),
        }
    }
}

impl CurrencyPattern {
    pub fn new(format: &CurrencyFormat) -> Result<Self, ConfigError> {
        if *format == CurrencyFormat::default() {
            return Ok(Self::default());
        }
        if format.thousands_separator == format.decimal_point {
            return Err(ConfigError::Invalid(format!(
                "thousands separator and decimal point are both '{}'",
                format.decimal_point
            )));
        }
        if format.symbol.is_ascii_digit()
            || format.thousands_separator.is_ascii_digit()
            || format.decimal_point.is_ascii_digit()
        {
            return Err(ConfigError::Invalid(
                "currency symbol and separators must not be digits".to_string(),
            ));
        }

        let symbol = regex::escape(&format.symbol.to_string());
        let separator = regex::escape(&format.thousands_separator.to_string());
        let decimal = regex::escape(&format.decimal_point.to_string());
        let optional = if format.symbol_required { "" } else { "?" };
        let pattern = format!(r"{symbol}{optional}[\d{separator}]+(?:{decimal}\d*)?");

        tracing::debug!("Compiled currency pattern: {}", pattern);
        Ok(Self {
            regex: Regex::new(&pattern)?,
            format: format.clone(),
        })
    }

    pub fn format(&self) -> &CurrencyFormat {
        &self.format
    }

    /// All non-overlapping currency tokens in `text`, left to right.
    pub fn tokens<'a>(&'a self, text: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.regex.find_iter(text).map(|m| m.as_str())
    }

    /// Parses a single token. Returns `None` for anything that is not a
    /// finite, strictly positive number.
    pub fn parse_token(&self, token: &str) -> Option<f64> {
        let cleaned: String = token
            .chars()
            .filter(|&c| c != self.format.symbol && c != self.format.thousands_separator)
            .map(|c| if c == self.format.decimal_point { '.' } else { c })
            .collect();

        match cleaned.parse::<f64>() {
            Ok(num) if num.is_finite() && num > 0.0 => Some(num),
            Ok(num) => {
                tracing::trace!("Discarding non-positive token '{}' ({})", token, num);
                None
            }
            Err(_) => {
                tracing::trace!("Discarding unparseable token '{}'", token);
                None
            }
        }
    }

    /// Every positive amount found in `text`, in match order.
    pub fn values(&self, text: &str) -> Vec<f64> {
        self.tokens(text)
            .filter_map(|token| self.parse_token(token))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thousands_and_fraction() {
        let p = CurrencyPattern::default();
        assert_eq!(p.values("$1,234.56"), vec![1234.56]);
        assert_eq!(p.values("$1,000"), vec![1000.0]);
        assert_eq!(p.values("$12."), vec![12.0]);
    }

    #[test]
    fn test_multiple_tokens_left_to_right() {
        let p = CurrencyPattern::default();
        let tokens: Vec<&str> = p.tokens("won $5.25, then $1,000.10 and $3").collect();
        assert_eq!(tokens, vec!["$5.25", "$1,000.10", "$3"]);
        assert_eq!(p.values("won $5.25, then $1,000.10 and $3"), vec![5.25, 1000.10, 3.0]);
    }

    #[test]
    fn test_zero_and_garbage_are_dropped() {
        let p = CurrencyPattern::default();
        assert!(p.values("Bonus: $0.00 today").is_empty());
        assert!(p.values("$,,,").is_empty());
        assert!(p.values("no money here 42").is_empty());
        assert_eq!(p.parse_token("$0"), None);
    }

    #[test]
    fn test_overflowing_token_is_dropped() {
        let p = CurrencyPattern::default();
        let huge = format!("${}", "9".repeat(400));
        assert_eq!(p.tokens(&huge).count(), 1);
        assert_eq!(p.parse_token(&huge), None);
        assert!(p.values(&format!("{} and $2.00", huge)) == vec![2.0]);
    }

    #[test]
    fn test_parse_is_idempotent_on_display_form() {
        let p = CurrencyPattern::default();
        for token in ["$1,234.56", "$0.01", "$999,999,999.99", "$7", "$3.14159"] {
            let first = p.parse_token(token).unwrap();
            let again = p.parse_token(&format!("${}", first)).unwrap();
            assert!((first - again).abs() < 1e-9, "{} -> {} -> {}", token, first, again);
        }
    }

    #[test]
    fn test_symbol_optional_format() {
        let format = CurrencyFormat {
            symbol_required: false,
            ..CurrencyFormat::default()
        };
        let p = CurrencyPattern::new(&format).unwrap();
        assert_eq!(p.values("1,250.50 and $20"), vec![1250.5, 20.0]);
    }

    #[test]
    fn test_european_format() {
        let format = CurrencyFormat {
            symbol: '€',
            thousands_separator: '.',
            decimal_point: ',',
            symbol_required: true,
        };
        let p = CurrencyPattern::new(&format).unwrap();
        assert_eq!(p.values("€1.234,50"), vec![1234.5]);
    }

    #[test]
    fn test_conflicting_separators_rejected() {
        let format = CurrencyFormat {
            thousands_separator: '.',
            ..CurrencyFormat::default()
        };
        assert!(matches!(
            CurrencyPattern::new(&format),
            Err(ConfigError::Invalid(_))
        ));
    }
}
