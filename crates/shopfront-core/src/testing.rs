//! In-memory [`Document`] for exercising controllers without a browser.
//!
//! The fake keeps a flat list of page elements with explicit geometry, runs
//! registered handlers synchronously, and computes intersection ratios from
//! the scroll offset and viewport height the same way a browser would, root
//! margin included.
//!
//! ```ignore
//! use shopfront_core::testing::FakeDocument;
//! use shopfront_core::dom::Element;
//!
//! let doc = FakeDocument::new();
//! let header = doc.add("header").with_id("header").at(0.0, 80.0);
//! header.add_class("sticky").unwrap();
//! assert!(header.has_class("sticky"));
//! ```

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use crate::config::RootMargin;
use crate::dom::{
    ClickHandler, ClickOutcome, Document, Element, IntersectionCallback, IntersectionEntry,
    IntersectionOptions, Observation, ScrollHandler, ScrollMode,
};
use crate::error::{DomError, DomResult};

/// Viewport height used by [`FakeDocument::new`].
pub const DEFAULT_VIEWPORT_HEIGHT: f64 = 800.0;

#[derive(Default)]
struct Node {
    tag: String,
    classes: RefCell<Vec<String>>,
    attributes: RefCell<BTreeMap<String, String>>,
    styles: RefCell<BTreeMap<String, String>>,
    text: RefCell<String>,
    children: RefCell<Vec<FakeElement>>,
    offset_top: Cell<f64>,
    offset_height: Cell<f64>,
    click_handlers: RefCell<Vec<ClickHandler>>,
}

/// Element handle of a [`FakeDocument`].
#[derive(Clone)]
pub struct FakeElement(Rc<Node>);

impl FakeElement {
    fn new(tag: &str) -> Self {
        Self(Rc::new(Node {
            tag: tag.to_ascii_lowercase(),
            ..Node::default()
        }))
    }

    /// Sets the `id` attribute.
    pub fn with_id(self, id: &str) -> Self {
        self.0
            .attributes
            .borrow_mut()
            .insert("id".to_string(), id.to_string());
        self
    }

    /// Adds a class.
    pub fn with_class(self, class: &str) -> Self {
        let _ = self.add_class(class);
        self
    }

    /// Sets an attribute.
    pub fn with_attr(self, name: &str, value: &str) -> Self {
        let _ = self.set_attribute(name, value);
        self
    }

    /// Places the element at `top` with the given rendered height.
    pub fn at(self, top: f64, height: f64) -> Self {
        self.0.offset_top.set(top);
        self.0.offset_height.set(height);
        self
    }

    /// Lowercase tag name.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.0.tag
    }

    /// Inline style value, if set.
    #[must_use]
    pub fn style(&self, property: &str) -> Option<String> {
        self.0.styles.borrow().get(property).cloned()
    }

    /// Text content set via [`Element::set_text`].
    #[must_use]
    pub fn text(&self) -> String {
        self.0.text.borrow().clone()
    }

    /// Current children.
    #[must_use]
    pub fn children(&self) -> Vec<FakeElement> {
        self.0.children.borrow().clone()
    }

    /// Number of registered click handlers.
    #[must_use]
    pub fn click_handler_count(&self) -> usize {
        self.0.click_handlers.borrow().len()
    }

    /// Dispatches a click to every handler in registration order.
    ///
    /// Returns [`ClickOutcome::PreventDefault`] if any handler suppressed the
    /// default action.
    pub fn click(&self) -> ClickOutcome {
        let mut handlers = std::mem::take(&mut *self.0.click_handlers.borrow_mut());
        let mut outcome = ClickOutcome::Default;
        for handler in &mut handlers {
            if handler() == ClickOutcome::PreventDefault {
                outcome = ClickOutcome::PreventDefault;
            }
        }

        let mut slot = self.0.click_handlers.borrow_mut();
        let added = std::mem::take(&mut *slot);
        *slot = handlers;
        slot.extend(added);
        outcome
    }

    fn id(&self) -> Option<String> {
        self.attribute("id")
    }
}

impl PartialEq for FakeElement {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for FakeElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FakeElement")
            .field("tag", &self.0.tag)
            .field("id", &self.id())
            .field("classes", &self.0.classes.borrow())
            .finish()
    }
}

impl Element for FakeElement {
    fn add_class(&self, class: &str) -> DomResult<()> {
        let mut classes = self.0.classes.borrow_mut();
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
        }
        Ok(())
    }

    fn remove_class(&self, class: &str) -> DomResult<()> {
        self.0.classes.borrow_mut().retain(|c| c != class);
        Ok(())
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.classes.borrow().iter().any(|c| c == class)
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.attributes.borrow().get(name).cloned()
    }

    fn set_attribute(&self, name: &str, value: &str) -> DomResult<()> {
        self.0
            .attributes
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn set_style(&self, property: &str, value: &str) -> DomResult<()> {
        let mut styles = self.0.styles.borrow_mut();
        if value.is_empty() {
            styles.remove(property);
        } else {
            styles.insert(property.to_string(), value.to_string());
        }
        Ok(())
    }

    fn set_text(&self, text: &str) {
        self.0.children.borrow_mut().clear();
        *self.0.text.borrow_mut() = text.to_string();
    }

    fn clear(&self) {
        self.0.children.borrow_mut().clear();
        self.0.text.borrow_mut().clear();
    }

    fn append(&self, child: &Self) -> DomResult<()> {
        if child == self {
            return Err(DomError::operation("appendChild", "cannot append a node to itself"));
        }
        self.0.children.borrow_mut().push(child.clone());
        Ok(())
    }

    fn offset_top(&self) -> f64 {
        self.0.offset_top.get()
    }

    fn offset_height(&self) -> f64 {
        self.0.offset_height.get()
    }

    fn on_click(&self, handler: ClickHandler) -> DomResult<()> {
        self.0.click_handlers.borrow_mut().push(handler);
        Ok(())
    }
}

struct ObservedTarget {
    element: FakeElement,
    notified: bool,
    intersecting: bool,
    met: bool,
}

struct FakeObserver {
    options: IntersectionOptions,
    targets: Vec<ObservedTarget>,
    callback: IntersectionCallback<FakeElement>,
}

struct DomState {
    elements: RefCell<Vec<FakeElement>>,
    body: FakeElement,
    scroll_y: Cell<f64>,
    viewport_height: Cell<f64>,
    scroll_requests: RefCell<Vec<(f64, ScrollMode)>>,
    scroll_handlers: RefCell<Vec<ScrollHandler>>,
    intersection_supported: Cell<bool>,
    observer_registration_fails: Cell<bool>,
    observers: RefCell<Vec<FakeObserver>>,
}

/// In-memory document.
#[derive(Clone)]
pub struct FakeDocument(Rc<DomState>);

impl FakeDocument {
    /// Creates an empty page scrolled to the top, with intersection
    /// observation available.
    #[must_use]
    pub fn new() -> Self {
        Self(Rc::new(DomState {
            elements: RefCell::new(Vec::new()),
            body: FakeElement::new("body"),
            scroll_y: Cell::new(0.0),
            viewport_height: Cell::new(DEFAULT_VIEWPORT_HEIGHT),
            scroll_requests: RefCell::new(Vec::new()),
            scroll_handlers: RefCell::new(Vec::new()),
            intersection_supported: Cell::new(true),
            observer_registration_fails: Cell::new(false),
            observers: RefCell::new(Vec::new()),
        }))
    }

    /// Appends a new element to the page.
    pub fn add(&self, tag: &str) -> FakeElement {
        let element = FakeElement::new(tag);
        self.0.elements.borrow_mut().push(element.clone());
        element
    }

    /// Toggles intersection observation support.
    pub fn set_intersection_supported(&self, supported: bool) {
        self.0.intersection_supported.set(supported);
    }

    /// Makes observer registration fail even though support is reported.
    pub fn fail_observer_registration(&self) {
        self.0.observer_registration_fails.set(true);
    }

    /// Sets the viewport height.
    pub fn set_viewport_height(&self, height: f64) {
        self.0.viewport_height.set(height);
    }

    /// Simulates the user scrolling to `y`: updates the offset, dispatches
    /// scroll handlers, then delivers intersection changes.
    pub fn scroll(&self, y: f64) {
        self.0.scroll_y.set(y);

        let mut handlers = std::mem::take(&mut *self.0.scroll_handlers.borrow_mut());
        for handler in &mut handlers {
            handler();
        }
        let mut slot = self.0.scroll_handlers.borrow_mut();
        let added = std::mem::take(&mut *slot);
        *slot = handlers;
        slot.extend(added);
        drop(slot);

        self.deliver_intersections();
    }

    /// Programmatic scrolls requested through [`Document::scroll_to`].
    #[must_use]
    pub fn scroll_requests(&self) -> Vec<(f64, ScrollMode)> {
        self.0.scroll_requests.borrow().clone()
    }

    /// Number of registered scroll handlers.
    #[must_use]
    pub fn scroll_handler_count(&self) -> usize {
        self.0.scroll_handlers.borrow().len()
    }

    /// Number of registered intersection observers.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.0.observers.borrow().len()
    }

    /// Number of elements still being observed across all observers.
    #[must_use]
    pub fn observed_count(&self) -> usize {
        self.0.observers.borrow().iter().map(|o| o.targets.len()).sum()
    }

    fn visible_ratio(&self, element: &FakeElement, margin: &RootMargin) -> f64 {
        let scroll_y = self.0.scroll_y.get();
        let root_top = scroll_y - margin.top;
        let root_bottom = scroll_y + self.0.viewport_height.get() + margin.bottom;

        let top = element.offset_top();
        let height = element.offset_height();
        if height <= 0.0 {
            return if top >= root_top && top <= root_bottom { 1.0 } else { 0.0 };
        }

        let overlap = (top + height).min(root_bottom) - top.max(root_top);
        (overlap.max(0.0) / height).min(1.0)
    }

    fn deliver_intersections(&self) {
        let mut observers = std::mem::take(&mut *self.0.observers.borrow_mut());

        for observer in &mut observers {
            let threshold = observer.options.threshold;
            let margin = observer.options.root_margin;
            let mut released = Vec::new();

            for target in &mut observer.targets {
                let ratio = self.visible_ratio(&target.element, &margin);
                let is_intersecting = ratio > 0.0;
                let met = is_intersecting && ratio >= threshold;
                // Notify when the crossed threshold or the intersecting flag
                // changes, as browsers do.
                if target.notified
                    && met == target.met
                    && is_intersecting == target.intersecting
                {
                    continue;
                }
                target.notified = true;
                target.intersecting = is_intersecting;
                target.met = met;

                let entry = IntersectionEntry {
                    target: target.element.clone(),
                    is_intersecting,
                    ratio,
                };
                if (observer.callback)(&entry) == Observation::Release {
                    released.push(target.element.clone());
                }
            }

            observer.targets.retain(|t| !released.contains(&t.element));
        }

        let mut slot = self.0.observers.borrow_mut();
        let added = std::mem::take(&mut *slot);
        *slot = observers;
        slot.extend(added);
    }

    fn find(&self, selector: &str) -> DomResult<Vec<FakeElement>> {
        let selector = Selector::parse(selector)?;
        Ok(self
            .0
            .elements
            .borrow()
            .iter()
            .filter(|e| selector.matches(e))
            .cloned()
            .collect())
    }
}

impl Default for FakeDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FakeDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FakeDocument")
            .field("elements", &self.0.elements.borrow().len())
            .field("scroll_y", &self.0.scroll_y.get())
            .finish()
    }
}

impl Document for FakeDocument {
    type Element = FakeElement;

    fn element_by_id(&self, id: &str) -> Option<FakeElement> {
        self.0
            .elements
            .borrow()
            .iter()
            .find(|e| e.id().as_deref() == Some(id))
            .cloned()
    }

    fn query_selector(&self, selector: &str) -> DomResult<Option<FakeElement>> {
        Ok(self.find(selector)?.into_iter().next())
    }

    fn query_selector_all(&self, selector: &str) -> DomResult<Vec<FakeElement>> {
        self.find(selector)
    }

    fn body(&self) -> Option<FakeElement> {
        Some(self.0.body.clone())
    }

    fn create_element(&self, tag: &str) -> DomResult<FakeElement> {
        if tag.is_empty() {
            return Err(DomError::operation("createElement", "empty tag name"));
        }
        Ok(FakeElement::new(tag))
    }

    fn scroll_y(&self) -> f64 {
        self.0.scroll_y.get()
    }

    fn scroll_to(&self, top: f64, mode: ScrollMode) {
        self.0.scroll_requests.borrow_mut().push((top, mode));
        self.0.scroll_y.set(top);
    }

    fn on_scroll(&self, handler: ScrollHandler) -> DomResult<()> {
        self.0.scroll_handlers.borrow_mut().push(handler);
        Ok(())
    }

    fn supports_intersection_observer(&self) -> bool {
        self.0.intersection_supported.get()
    }

    fn observe_intersections(
        &self,
        targets: &[FakeElement],
        options: IntersectionOptions,
        callback: IntersectionCallback<FakeElement>,
    ) -> DomResult<()> {
        if !self.0.intersection_supported.get() {
            return Err(DomError::unsupported("IntersectionObserver"));
        }
        if self.0.observer_registration_fails.get() {
            return Err(DomError::operation(
                "IntersectionObserver",
                "constructor threw",
            ));
        }

        self.0.observers.borrow_mut().push(FakeObserver {
            options,
            targets: targets
                .iter()
                .map(|element| ObservedTarget {
                    element: element.clone(),
                    notified: false,
                    intersecting: false,
                    met: false,
                })
                .collect(),
            callback,
        });

        // Browsers deliver an initial notification for every new target.
        self.deliver_intersections();
        Ok(())
    }
}

/// The selector subset the fake understands: `#id`, `.class`, `tag` and
/// `tag[attr^="prefix"]`.
enum Selector {
    Id(String),
    Class(String),
    Tag {
        tag: String,
        prefix_attr: Option<(String, String)>,
    },
}

impl Selector {
    fn parse(selector: &str) -> DomResult<Self> {
        let selector = selector.trim();
        if let Some(id) = selector.strip_prefix('#') {
            return Ok(Self::Id(identifier(selector, id)?));
        }
        if let Some(class) = selector.strip_prefix('.') {
            return Ok(Self::Class(identifier(selector, class)?));
        }

        let (tag, rest) = match selector.find('[') {
            Some(at) => (&selector[..at], Some(&selector[at..])),
            None => (selector, None),
        };
        let tag = identifier(selector, tag)?.to_ascii_lowercase();

        let prefix_attr = match rest {
            None => None,
            Some(rest) => {
                let inner = rest
                    .strip_prefix('[')
                    .and_then(|r| r.strip_suffix(']'))
                    .ok_or_else(|| DomError::invalid_selector(selector, "unterminated attribute"))?;
                let (name, value) = inner.split_once("^=").ok_or_else(|| {
                    DomError::invalid_selector(selector, "only ^= attribute matching is supported")
                })?;
                let value = value.trim_matches(|c| c == '"' || c == '\'');
                Some((identifier(selector, name)?, value.to_string()))
            }
        };

        Ok(Self::Tag { tag, prefix_attr })
    }

    fn matches(&self, element: &FakeElement) -> bool {
        match self {
            Self::Id(id) => element.id().as_deref() == Some(id.as_str()),
            Self::Class(class) => element.has_class(class),
            Self::Tag { tag, prefix_attr } => {
                element.tag() == tag
                    && prefix_attr.as_ref().map_or(true, |(name, prefix)| {
                        element
                            .attribute(name)
                            .is_some_and(|v| v.starts_with(prefix.as_str()))
                    })
            }
        }
    }
}

fn identifier(selector: &str, ident: &str) -> DomResult<String> {
    let mut chars = ident.chars();
    match chars.next() {
        None => return Err(DomError::invalid_selector(selector, "empty identifier")),
        Some(c) if c.is_ascii_digit() => {
            return Err(DomError::invalid_selector(
                selector,
                "identifier starts with a digit",
            ))
        }
        Some(_) => {}
    }
    if ident
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        Ok(ident.to_string())
    } else {
        Err(DomError::invalid_selector(selector, "unexpected character"))
    }
}
