//! Mobile navigation menu.
//!
//! State machine with a single owner:
//!
//! ```text
//! Closed --open control--> Open
//! Open --close control | overlay | menu link--> Closed
//! ```
//!
//! Opening locks page scroll by hiding overflow on `<body>`; closing clears
//! the inline override again.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use crate::config::MenuConfig;
use crate::dom::{ClickOutcome, Document, Element};

/// Open/closed state of the menu panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuState {
    /// Panel hidden, page scrolls
    #[default]
    Closed,
    /// Panel shown, page scroll locked
    Open,
}

impl fmt::Display for MenuState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closed => write!(f, "closed"),
            Self::Open => write!(f, "open"),
        }
    }
}

struct MenuInner<E> {
    panel: E,
    body: Option<E>,
    open_class: String,
    state: Cell<MenuState>,
}

/// Handle to an attached mobile menu. Clones share state.
pub struct MobileMenu<E: Element> {
    inner: Rc<MenuInner<E>>,
}

impl<E: Element> Clone for MobileMenu<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<E: Element> MobileMenu<E> {
    /// Wires the open control, close control, overlay, and every menu link.
    ///
    /// Returns `None` without registering anything when the panel itself is
    /// missing. Missing controls are skipped individually.
    pub fn attach<D>(doc: &D, config: &MenuConfig) -> Option<Self>
    where
        D: Document<Element = E>,
    {
        let Some(panel) = doc.element_by_id(&config.panel_id) else {
            log::debug!("No menu panel '#{}'", config.panel_id);
            return None;
        };

        let menu = Self {
            inner: Rc::new(MenuInner {
                panel,
                body: doc.body(),
                open_class: config.open_class.clone(),
                state: Cell::new(MenuState::Closed),
            }),
        };

        if let Some(button) = doc.element_by_id(&config.open_button_id) {
            menu.bind(&button, MenuState::Open);
        }
        if let Some(button) = doc.element_by_id(&config.close_button_id) {
            menu.bind(&button, MenuState::Closed);
        }
        if let Some(overlay) = doc.element_by_id(&config.overlay_id) {
            menu.bind(&overlay, MenuState::Closed);
        }

        match doc.query_selector_all(&config.link_selector) {
            Ok(links) => {
                for link in &links {
                    menu.bind(link, MenuState::Closed);
                }
            }
            Err(e) => log::warn!("Menu links not bound: {}", e),
        }

        Some(menu)
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> MenuState {
        self.inner.state.get()
    }

    /// Shows the panel and locks page scroll. Idempotent.
    pub fn open(&self) {
        self.transition(MenuState::Open);
    }

    /// Hides the panel and restores page scroll. Idempotent.
    pub fn close(&self) {
        self.transition(MenuState::Closed);
    }

    fn bind(&self, trigger: &E, target: MenuState) {
        let menu = self.clone();
        // Never suppresses the default action: a menu link that is also an
        // anchor still gets its own scroll handler.
        let registered = trigger.on_click(Box::new(move || {
            menu.transition(target);
            ClickOutcome::Default
        }));
        if let Err(e) = registered {
            log::warn!("Menu trigger not bound: {}", e);
        }
    }

    fn transition(&self, target: MenuState) {
        let inner = &self.inner;
        let (class_result, overflow) = match target {
            MenuState::Open => (inner.panel.add_class(&inner.open_class), "hidden"),
            MenuState::Closed => (inner.panel.remove_class(&inner.open_class), ""),
        };
        if let Err(e) = class_result {
            log::warn!("Failed to update menu panel class: {}", e);
        }

        if let Some(body) = &inner.body {
            if let Err(e) = body.set_style("overflow", overflow) {
                log::warn!("Failed to update page scroll lock: {}", e);
            }
        }

        if inner.state.replace(target) != target {
            log::debug!("Mobile menu {}", target);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeDocument, FakeElement};

    struct Page {
        doc: FakeDocument,
        panel: FakeElement,
        open_btn: FakeElement,
        close_btn: FakeElement,
        overlay: FakeElement,
        links: Vec<FakeElement>,
    }

    fn page() -> Page {
        let doc = FakeDocument::new();
        let panel = doc.add("nav").with_id("mobile-menu");
        let open_btn = doc.add("button").with_id("menu-open-btn");
        let close_btn = doc.add("button").with_id("menu-close-btn");
        let overlay = doc.add("div").with_id("menu-overlay");
        let links = (0..3)
            .map(|i| {
                doc.add("a")
                    .with_class("menu-link")
                    .with_attr("href", &format!("#s{i}"))
            })
            .collect();
        Page {
            doc,
            panel,
            open_btn,
            close_btn,
            overlay,
            links,
        }
    }

    fn body_overflow(doc: &FakeDocument) -> Option<String> {
        doc.body().and_then(|b| b.style("overflow"))
    }

    #[test]
    fn test_open_and_close() {
        let p = page();
        let menu = MobileMenu::attach(&p.doc, &MenuConfig::default()).unwrap();
        assert_eq!(menu.state(), MenuState::Closed);

        p.open_btn.click();
        assert_eq!(menu.state(), MenuState::Open);
        assert!(p.panel.has_class("open"));
        assert_eq!(body_overflow(&p.doc).as_deref(), Some("hidden"));

        p.close_btn.click();
        assert_eq!(menu.state(), MenuState::Closed);
        assert!(!p.panel.has_class("open"));
        assert_eq!(body_overflow(&p.doc), None);
    }

    #[test]
    fn test_overlay_and_links_close() {
        let p = page();
        let menu = MobileMenu::attach(&p.doc, &MenuConfig::default()).unwrap();

        p.open_btn.click();
        p.overlay.click();
        assert_eq!(menu.state(), MenuState::Closed);

        for link in &p.links {
            p.open_btn.click();
            assert_eq!(menu.state(), MenuState::Open);
            assert_eq!(link.click(), ClickOutcome::Default);
            assert_eq!(menu.state(), MenuState::Closed);
            assert_eq!(body_overflow(&p.doc), None);
        }
    }

    #[test]
    fn test_open_is_idempotent() {
        let p = page();
        let menu = MobileMenu::attach(&p.doc, &MenuConfig::default()).unwrap();

        p.open_btn.click();
        p.open_btn.click();
        assert_eq!(menu.state(), MenuState::Open);
        assert!(p.panel.has_class("open"));

        menu.close();
        menu.close();
        assert_eq!(menu.state(), MenuState::Closed);
    }

    #[test]
    fn test_missing_parts() {
        let doc = FakeDocument::new();
        let open_btn = doc.add("button").with_id("menu-open-btn");
        assert!(MobileMenu::attach(&doc, &MenuConfig::default()).is_none());
        assert_eq!(open_btn.click_handler_count(), 0);

        let doc = FakeDocument::new();
        let panel = doc.add("nav").with_id("mobile-menu");
        let open_btn = doc.add("button").with_id("menu-open-btn");
        let menu = MobileMenu::attach(&doc, &MenuConfig::default()).unwrap();
        open_btn.click();
        assert!(panel.has_class("open"));
        assert_eq!(menu.state(), MenuState::Open);
    }
}
