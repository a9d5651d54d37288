//! Same-page anchor scrolling.
//!
//! Links whose `href` starts with `#` scroll so the target sits right under
//! the fixed header instead of behind it. Smooth in normal mode, an instant
//! jump in lite mode. Links with nothing to scroll to keep the browser's
//! default behavior.

use crate::config::{AnchorConfig, HeaderConfig};
use crate::dom::{ClickOutcome, Document, Element, ScrollMode};
use crate::network::NetworkProfile;

/// Scroll offset that aligns a target's top with the header's bottom edge.
#[must_use]
pub fn scroll_target(target_top: f64, header_height: f64) -> f64 {
    target_top - header_height
}

/// Scroll style for the given profile.
#[must_use]
pub fn scroll_mode(profile: &NetworkProfile) -> ScrollMode {
    if profile.lite_mode {
        ScrollMode::Jump
    } else {
        ScrollMode::Smooth
    }
}

/// Resolves an anchor `href` to its target element.
///
/// Empty and bare `#` hrefs resolve to nothing, as do hrefs that are not
/// valid selectors.
pub fn resolve_target<D: Document>(doc: &D, href: &str) -> Option<D::Element> {
    if href.is_empty() || href == "#" {
        return None;
    }

    match doc.query_selector(href) {
        Ok(target) => target,
        Err(e) => {
            log::debug!("Anchor '{}' is not a selector: {}", href, e);
            None
        }
    }
}

/// Intercepts same-page anchor links.
pub struct SmoothAnchorScroller;

impl SmoothAnchorScroller {
    /// Binds every anchor link. Returns the number of links bound.
    pub fn attach<D: Document>(
        doc: &D,
        profile: &NetworkProfile,
        config: &AnchorConfig,
        header: &HeaderConfig,
    ) -> usize {
        let links = match doc.query_selector_all(&config.selector) {
            Ok(links) => links,
            Err(e) => {
                log::warn!("Anchor links not collected: {}", e);
                return 0;
            }
        };

        let header = doc.element_by_id(&header.element_id);
        let mode = scroll_mode(profile);
        let mut bound = 0;

        for link in links {
            let handler_doc = doc.clone();
            let handler_link = link.clone();
            let header = header.clone();

            let registered = link.on_click(Box::new(move || {
                // Read at click time; the page may have rewritten it.
                let Some(href) = handler_link.attribute("href") else {
                    return ClickOutcome::Default;
                };
                let Some(target) = resolve_target(&handler_doc, &href) else {
                    return ClickOutcome::Default;
                };

                let header_height = header.as_ref().map_or(0.0, Element::offset_height);
                let top = scroll_target(target.offset_top(), header_height);
                log::debug!("Scrolling to '{}' at {} ({})", href, top, mode);
                handler_doc.scroll_to(top, mode);
                ClickOutcome::PreventDefault
            }));

            match registered {
                Ok(()) => bound += 1,
                Err(e) => log::warn!("Anchor link not bound: {}", e),
            }
        }

        bound
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeDocument;

    const LITE: NetworkProfile = NetworkProfile {
        lite_mode: true,
        poor_network: false,
    };

    fn attach(doc: &FakeDocument, profile: &NetworkProfile) -> usize {
        SmoothAnchorScroller::attach(
            doc,
            profile,
            &AnchorConfig::default(),
            &HeaderConfig::default(),
        )
    }

    #[test]
    fn test_offsets_by_header_height() {
        let doc = FakeDocument::new();
        doc.add("header").with_id("header").at(0.0, 80.0);
        let link = doc.add("a").with_attr("href", "#section1");
        doc.add("section").with_id("section1").at(500.0, 400.0);

        assert_eq!(attach(&doc, &NetworkProfile::FULL), 1);
        assert_eq!(link.click(), ClickOutcome::PreventDefault);
        assert_eq!(doc.scroll_requests(), vec![(420.0, ScrollMode::Smooth)]);
    }

    #[test]
    fn test_lite_mode_jumps() {
        let doc = FakeDocument::new();
        doc.add("header").with_id("header").at(0.0, 80.0);
        let link = doc.add("a").with_attr("href", "#section1");
        doc.add("section").with_id("section1").at(500.0, 400.0);

        attach(&doc, &LITE);
        link.click();
        assert_eq!(doc.scroll_requests(), vec![(420.0, ScrollMode::Jump)]);
    }

    #[test]
    fn test_without_header() {
        let doc = FakeDocument::new();
        let link = doc.add("a").with_attr("href", "#contact");
        doc.add("footer").with_id("contact").at(2400.0, 300.0);

        attach(&doc, &NetworkProfile::FULL);
        link.click();
        assert_eq!(doc.scroll_requests(), vec![(2400.0, ScrollMode::Smooth)]);
    }

    #[test]
    fn test_placeholder_and_missing_targets_keep_default() {
        let doc = FakeDocument::new();
        let bare = doc.add("a").with_attr("href", "#");
        let missing = doc.add("a").with_attr("href", "#nowhere");
        let invalid = doc.add("a").with_attr("href", "#1st-floor");

        assert_eq!(attach(&doc, &NetworkProfile::FULL), 3);
        assert_eq!(bare.click(), ClickOutcome::Default);
        assert_eq!(missing.click(), ClickOutcome::Default);
        assert_eq!(invalid.click(), ClickOutcome::Default);
        assert!(doc.scroll_requests().is_empty());

        bare.set_attribute("href", "").unwrap();
        assert_eq!(bare.click(), ClickOutcome::Default);
        assert!(doc.scroll_requests().is_empty());
    }

    #[test]
    fn test_links_to_same_target() {
        let doc = FakeDocument::new();
        doc.add("header").with_id("header").at(0.0, 64.0);
        let first = doc.add("a").with_attr("href", "#services");
        let second = doc.add("a").with_attr("href", "#services");
        doc.add("section").with_id("services").at(900.0, 500.0);

        assert_eq!(attach(&doc, &NetworkProfile::FULL), 2);
        first.click();
        second.click();
        assert_eq!(
            doc.scroll_requests(),
            vec![(836.0, ScrollMode::Smooth), (836.0, ScrollMode::Smooth)]
        );
    }

    #[test]
    fn test_other_links_untouched() {
        let doc = FakeDocument::new();
        let external = doc.add("a").with_attr("href", "https://maps.example.com");
        assert_eq!(attach(&doc, &NetworkProfile::FULL), 0);
        assert_eq!(external.click_handler_count(), 0);
    }
}
