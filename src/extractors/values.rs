// src/extractors/values.rs
use serde::{Deserialize, Serialize};

use crate::document::{self, DocumentNode, Matcher};
use crate::extractors::currency::CurrencyPattern;
use crate::models::{Category, ClassifiedValue, Column};
use crate::utils::error::NodeError;

/// A marker element that puts its row into `category`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryMarker {
    pub category: Category,
    pub matcher: Matcher,
}

/// Walks the rows of one column and turns currency tokens into classified values.
pub struct ValueExtractor<'c> {
    row: &'c Matcher,
    text: &'c Matcher,
    markers: &'c [CategoryMarker],
    pattern: &'c CurrencyPattern,
    skip_marked_rows: bool,
}

impl<'c> ValueExtractor<'c> {
    pub fn new(
        row: &'c Matcher,
        text: &'c Matcher,
        markers: &'c [CategoryMarker],
        pattern: &'c CurrencyPattern,
    ) -> Self {
        Self {
            row,
            text,
            markers,
            pattern,
            skip_marked_rows: false,
        }
    }

    /// Drop rows carrying any marker before reading their text.
    pub fn skip_marked_rows(mut self, skip: bool) -> Self {
        self.skip_marked_rows = skip;
        self
    }

    /// Category of a row: the first configured marker found anywhere below
    /// the row wins; no marker means `Normal`. The column is not consulted.
    pub fn classify_row<N: DocumentNode>(&self, row: N) -> Category {
        self.markers
            .iter()
            .find(|marker| document::contains_match(row, &marker.matcher))
            .map(|marker| marker.category)
            .unwrap_or(Category::Normal)
    }

    pub fn extract<N: DocumentNode>(
        &self,
        column_node: N,
        region: usize,
        column: Column,
    ) -> Result<Vec<ClassifiedValue>, NodeError> {
        let mut values = Vec::new();
        let mut skipped = 0usize;

        for row in document::select_all(column_node, self.row, false) {
            let category = self.classify_row(row);
            if self.skip_marked_rows && category.is_special() {
                skipped += 1;
                continue;
            }

            for span in document::select_all(row, self.text, false) {
                let text = span.text_content()?;
                for value in self.pattern.values(&text) {
                    tracing::trace!(
                        "region {} {} column: {} -> {}",
                        region,
                        column,
                        value,
                        category
                    );
                    values.push(ClassifiedValue {
                        value,
                        category,
                        region,
                        column,
                    });
                }
            }
        }

        tracing::debug!(
            "Extracted {} value(s) from region {} {} column ({} marked row(s) skipped)",
            values.len(),
            region,
            column,
            skipped
        );
        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    struct Fixture {
        row: Matcher,
        text: Matcher,
        markers: Vec<CategoryMarker>,
        pattern: CurrencyPattern,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                row: Matcher::classes(Some("div"), &["flex", "items-center", "h-10"]),
                text: Matcher::tag("span"),
                markers: vec![
                    CategoryMarker {
                        category: Category::Crash,
                        matcher: Matcher::classes(None, &["crash-bg-btn"]),
                    },
                    CategoryMarker {
                        category: Category::Moon,
                        matcher: Matcher::classes(None, &["moon-bg-btn"]),
                    },
                ],
                pattern: CurrencyPattern::default(),
            }
        }

        fn extractor(&self) -> ValueExtractor<'_> {
            ValueExtractor::new(&self.row, &self.text, &self.markers, &self.pattern)
        }
    }

    fn column_of(doc: &Html) -> scraper::ElementRef<'_> {
        document::select_all(doc.root_element(), &Matcher::classes(Some("div"), &["w-1/2"]), true)[0]
    }

    const MIXED: &str = r#"
        <div class="w-1/2">
          <div class="flex items-center h-10"><span>$10.00</span><span>x $2.50</span></div>
          <div class="flex items-center h-10"><button class="crash-bg-btn">C</button><span>$50.00</span></div>
          <div class="flex items-center h-10"><span>$0.00</span><span>pending</span></div>
          <div class="flex items-center h-12"><span>$99.00</span></div>
          <div class="flex items-center h-10"><i class="moon-bg-btn"></i><span>$7</span></div>
        </div>
    "#;

    #[test]
    fn test_extracts_in_document_order_with_categories() {
        let doc = Html::parse_fragment(MIXED);
        let fixture = Fixture::new();
        let values = fixture
            .extractor()
            .extract(column_of(&doc), 0, Column::Left)
            .unwrap();

        let got: Vec<(f64, Category)> = values.iter().map(|v| (v.value, v.category)).collect();
        assert_eq!(
            got,
            vec![
                (10.0, Category::Normal),
                (2.5, Category::Normal),
                (50.0, Category::Crash),
                (7.0, Category::Moon),
            ]
        );
        assert!(values.iter().all(|v| v.region == 0 && v.column == Column::Left));
    }

    #[test]
    fn test_skip_marked_rows() {
        let doc = Html::parse_fragment(MIXED);
        let fixture = Fixture::new();
        let values = fixture
            .extractor()
            .skip_marked_rows(true)
            .extract(column_of(&doc), 3, Column::Right)
            .unwrap();

        let got: Vec<f64> = values.iter().map(|v| v.value).collect();
        assert_eq!(got, vec![10.0, 2.5]);
        assert!(values.iter().all(|v| v.category == Category::Normal && v.region == 3));
    }

    #[test]
    fn test_crash_marker_wins_over_moon() {
        let doc = Html::parse_fragment(
            r#"<div class="flex items-center h-10"><b class="moon-bg-btn"></b><b class="crash-bg-btn"></b></div>"#,
        );
        let fixture = Fixture::new();
        let row = document::select_all(doc.root_element(), &fixture.row, true)[0];
        assert_eq!(fixture.extractor().classify_row(row), Category::Crash);
    }

    #[test]
    fn test_marker_on_row_itself_is_ignored() {
        // markers are looked up below the row, as querySelector does
        let doc = Html::parse_fragment(
            r#"<div class="flex items-center h-10 crash-bg-btn"><span>$4.00</span></div>"#,
        );
        let fixture = Fixture::new();
        let row = document::select_all(doc.root_element(), &fixture.row, true)[0];
        assert_eq!(fixture.extractor().classify_row(row), Category::Normal);
    }

    #[test]
    fn test_nested_spans_are_read_per_span() {
        let doc = Html::parse_fragment(
            r#"<div class="w-1/2"><div class="flex items-center h-10"><span>Total <span>$5</span></span></div></div>"#,
        );
        let fixture = Fixture::new();
        let values = fixture
            .extractor()
            .extract(column_of(&doc), 0, Column::Left)
            .unwrap();
        assert_eq!(values.iter().map(|v| v.value).collect::<Vec<_>>(), vec![5.0, 5.0]);
    }
}
