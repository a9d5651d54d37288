//! Header styling on scroll.

use crate::config::HeaderConfig;
use crate::dom::{Document, Element};

/// Whether `offset` is past the scrolled threshold. The boundary itself
/// counts as not scrolled.
#[must_use]
pub fn is_scrolled(offset: f64, threshold: f64) -> bool {
    offset > threshold
}

/// Toggles the scrolled class on the page header.
pub struct HeaderStyler;

impl HeaderStyler {
    /// Styles the header for the current offset and re-evaluates on every
    /// scroll event.
    ///
    /// Returns the header handle, or `None` when the page has no header (in
    /// which case no listener is registered).
    pub fn attach<D: Document>(doc: &D, config: &HeaderConfig) -> Option<D::Element> {
        let header = doc.element_by_id(&config.element_id)?;

        let handler_doc = doc.clone();
        let handler_header = header.clone();
        let class = config.scrolled_class.clone();
        let threshold = config.scroll_threshold;

        Self::apply(&header, doc.scroll_y(), &class, threshold);

        let registered = doc.on_scroll(Box::new(move || {
            Self::apply(&handler_header, handler_doc.scroll_y(), &class, threshold);
        }));
        if let Err(e) = registered {
            log::warn!("Header scroll listener not registered: {}", e);
        }

        Some(header)
    }

    fn apply<E: Element>(header: &E, offset: f64, class: &str, threshold: f64) {
        let result = if is_scrolled(offset, threshold) {
            header.add_class(class)
        } else {
            header.remove_class(class)
        };
        if let Err(e) = result {
            log::warn!("Failed to toggle header class '{}': {}", class, e);
        }
    }
}
