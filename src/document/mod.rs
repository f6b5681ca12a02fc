// src/document/mod.rs
//! Read-only access to a page-like element tree.
//!
//! The scan pipeline only ever talks to [`DocumentNode`], so any tree the
//! host can hand over (parsed HTML, a live DOM bridge, a test fixture) can be
//! scanned as long as it can report tag names, class attributes, descendants
//! and text.

pub mod matcher;

use crate::utils::error::NodeError;
use scraper::ElementRef;

pub use matcher::Matcher;

/// An element of a document tree.
pub trait DocumentNode: Copy {
    /// Lower-case tag name, e.g. `div`.
    fn tag_name(&self) -> &str;

    /// Raw value of the `class` attribute, if present.
    fn class_attr(&self) -> Option<&str>;

    /// Descendant elements in document order, excluding `self`.
    fn subtree(&self) -> Box<dyn Iterator<Item = Self> + '_>;

    /// Concatenated text of all descendant text nodes (DOM `textContent`).
    fn text_content(&self) -> Result<String, NodeError>;
}

impl<'a> DocumentNode for ElementRef<'a> {
    fn tag_name(&self) -> &str {
        self.value().name()
    }

    fn class_attr(&self) -> Option<&str> {
        self.value().attr("class")
    }

    fn subtree(&self) -> Box<dyn Iterator<Item = Self> + '_> {
        // ego_tree's descendants() yields the node itself first
        Box::new((**self).descendants().skip(1).filter_map(ElementRef::wrap))
    }

    fn text_content(&self) -> Result<String, NodeError> {
        Ok(self.text().collect::<String>())
    }
}

/// All elements under `root` accepted by `matcher`, in document order.
/// With `include_root`, `root` itself is tested first (document-level queries);
/// without it only descendants are considered (element-level queries).
pub fn select_all<N: DocumentNode>(root: N, matcher: &Matcher, include_root: bool) -> Vec<N> {
    let head = if include_root { Some(root) } else { None };
    head.into_iter()
        .chain(root.subtree())
        .filter(|node| matcher.matches(node))
        .collect()
}

/// Whether any descendant of `root` is accepted by `matcher`.
pub fn contains_match<N: DocumentNode>(root: N, matcher: &Matcher) -> bool {
    root.subtree().any(|node| matcher.matches(&node))
}
