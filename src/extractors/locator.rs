// src/extractors/locator.rs
use crate::document::{self, DocumentNode, Matcher};

/// A located target region and, when it has at least two, its first two columns.
#[derive(Debug, Clone, Copy)]
pub struct TargetRegion<N> {
    /// Position among all target regions, in document order.
    pub index: usize,
    pub node: N,
    /// `[left, right]`; `None` when fewer than two columns were found.
    pub columns: Option<[N; 2]>,
}

/// Finds target regions and their column pairs.
pub struct SectionLocator<'c> {
    target: &'c Matcher,
    column: &'c Matcher,
}

impl<'c> SectionLocator<'c> {
    pub fn new(target: &'c Matcher, column: &'c Matcher) -> Self {
        Self { target, column }
    }

    /// Every element under (and including) `root` matching the target marker,
    /// in document order.
    pub fn locate<N: DocumentNode>(&self, root: N) -> Vec<TargetRegion<N>> {
        let regions: Vec<TargetRegion<N>> = document::select_all(root, self.target, true)
            .into_iter()
            .enumerate()
            .map(|(index, node)| TargetRegion {
                index,
                node,
                columns: self.columns_of(node),
            })
            .collect();

        tracing::debug!(
            "Located {} target region(s) matching {}",
            regions.len(),
            self.target.describe()
        );
        regions
    }

    fn columns_of<N: DocumentNode>(&self, region: N) -> Option<[N; 2]> {
        let mut found = region.subtree().filter(|node| self.column.matches(node));
        match (found.next(), found.next()) {
            (Some(left), Some(right)) => Some([left, right]),
            _ => {
                tracing::debug!(
                    "Target region has fewer than two {} columns, skipping",
                    self.column.describe()
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn matchers() -> (Matcher, Matcher) {
        (
            Matcher::class_contains("h-[27.3rem]"),
            Matcher::classes(Some("div"), &["w-1/2"]),
        )
    }

    #[test]
    fn test_locates_regions_in_document_order() {
        let html = r#"
            <body>
              <div class="h-[27.3rem] first"><div class="w-1/2">L</div><div class="w-1/2">R</div></div>
              <p>between</p>
              <div class="rounded md:h-[27.3rem] second"><div class="w-1/2">L</div></div>
            </body>
        "#;
        let doc = Html::parse_document(html);
        let (target, column) = matchers();
        let regions = SectionLocator::new(&target, &column).locate(doc.root_element());

        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].index, 0);
        assert!(regions[0].node.value().classes().any(|c| c == "first"));
        assert!(regions[0].columns.is_some());
        assert_eq!(regions[1].index, 1);
        assert!(regions[1].columns.is_none(), "single column region must be skipped");
    }

    #[test]
    fn test_takes_first_two_columns_only() {
        let html = r#"
            <div class="h-[27.3rem]">
              <div class="w-1/2" id="a"></div>
              <div class="w-1/2" id="b"></div>
              <div class="w-1/2" id="c"></div>
            </div>
        "#;
        let doc = Html::parse_document(html);
        let (target, column) = matchers();
        let regions = SectionLocator::new(&target, &column).locate(doc.root_element());

        let [left, right] = regions[0].columns.unwrap();
        assert_eq!(left.value().attr("id"), Some("a"));
        assert_eq!(right.value().attr("id"), Some("b"));
    }

    #[test]
    fn test_no_regions() {
        let doc = Html::parse_document("<body><div class='w-1/2'></div></body>");
        let (target, column) = matchers();
        assert!(SectionLocator::new(&target, &column)
            .locate(doc.root_element())
            .is_empty());
    }
}
