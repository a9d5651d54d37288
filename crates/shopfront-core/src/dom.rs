//! Document abstraction used by the controllers.
//!
//! The controllers never touch a browser directly. They talk to a
//! [`Document`] and its [`Element`] handles, which the `shopfront-wasm` crate
//! implements over `web-sys` and [`crate::testing`] implements in memory.
//!
//! # Scheduling
//!
//! Implementations deliver every callback synchronously on the single UI
//! thread, one at a time. Handlers share state through `Rc<Cell<_>>` and
//! `Rc<RefCell<_>>` and rely on this: no callback may run while another one is
//! still executing. A multi-threaded host must funnel events through one
//! serialization point before invoking handlers.

use std::fmt;

use crate::config::RootMargin;
use crate::error::DomResult;

/// What a click handler wants done with the browser's default action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClickOutcome {
    /// Let the browser follow the link
    #[default]
    Default,
    /// Suppress the default action (`preventDefault`)
    PreventDefault,
}

/// How a programmatic scroll should move the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollMode {
    /// Eased animation
    Smooth,
    /// Instant jump
    Jump,
}

impl fmt::Display for ScrollMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Smooth => write!(f, "smooth"),
            Self::Jump => write!(f, "jump"),
        }
    }
}

/// Returned by an intersection callback for each delivered entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observation {
    /// Keep watching the target
    Keep,
    /// Stop watching the target (`unobserve`)
    Release,
}

/// Options for viewport intersection observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionOptions {
    /// Visible fraction at which the callback fires
    pub threshold: f64,
    /// Margin applied to the viewport
    pub root_margin: RootMargin,
}

/// One intersection notification.
#[derive(Debug, Clone)]
pub struct IntersectionEntry<E> {
    /// The observed element
    pub target: E,
    /// Whether the target intersects the (margin-adjusted) viewport at all
    pub is_intersecting: bool,
    /// Visible fraction of the target, `0.0..=1.0`
    pub ratio: f64,
}

impl<E> IntersectionEntry<E> {
    /// Tolerance for ratios reported a hair under the threshold they crossed.
    const RATIO_EPSILON: f64 = 1e-3;

    /// Whether the entry satisfies `threshold`.
    #[must_use]
    pub fn meets(&self, threshold: f64) -> bool {
        self.is_intersecting && self.ratio + Self::RATIO_EPSILON >= threshold
    }
}

/// Handler invoked on click; decides whether the default action runs.
pub type ClickHandler = Box<dyn FnMut() -> ClickOutcome>;

/// Handler invoked on scroll.
pub type ScrollHandler = Box<dyn FnMut()>;

/// Handler invoked for each intersection entry.
pub type IntersectionCallback<E> = Box<dyn FnMut(&IntersectionEntry<E>) -> Observation>;

/// A handle to a page element.
///
/// Handles are cheap to clone and compare by identity.
pub trait Element: Clone + PartialEq + 'static {
    /// Adds a class (no-op if present).
    fn add_class(&self, class: &str) -> DomResult<()>;

    /// Removes a class (no-op if absent).
    fn remove_class(&self, class: &str) -> DomResult<()>;

    /// Whether the element carries `class`.
    fn has_class(&self, class: &str) -> bool;

    /// Reads an attribute.
    fn attribute(&self, name: &str) -> Option<String>;

    /// Writes an attribute.
    fn set_attribute(&self, name: &str, value: &str) -> DomResult<()>;

    /// Sets an inline style property. An empty value removes the property.
    fn set_style(&self, property: &str, value: &str) -> DomResult<()>;

    /// Replaces all children with a text node.
    fn set_text(&self, text: &str);

    /// Removes all children.
    fn clear(&self);

    /// Appends `child` as the last child.
    fn append(&self, child: &Self) -> DomResult<()>;

    /// Distance from the top of the document to the element's border box.
    fn offset_top(&self) -> f64;

    /// Rendered height of the element.
    fn offset_height(&self) -> f64;

    /// Registers a click handler.
    fn on_click(&self, handler: ClickHandler) -> DomResult<()>;
}

/// The page a set of controllers attaches to.
pub trait Document: Clone + 'static {
    /// Element handle type.
    type Element: Element;

    /// Looks up an element by id.
    fn element_by_id(&self, id: &str) -> Option<Self::Element>;

    /// First element matching `selector`.
    fn query_selector(&self, selector: &str) -> DomResult<Option<Self::Element>>;

    /// All elements matching `selector`, in document order.
    fn query_selector_all(&self, selector: &str) -> DomResult<Vec<Self::Element>>;

    /// The `<body>` element, if present.
    fn body(&self) -> Option<Self::Element>;

    /// Creates a detached element.
    fn create_element(&self, tag: &str) -> DomResult<Self::Element>;

    /// Current vertical scroll offset of the viewport.
    fn scroll_y(&self) -> f64;

    /// Scrolls the viewport to `top`.
    fn scroll_to(&self, top: f64, mode: ScrollMode);

    /// Registers a passive scroll handler on the window.
    fn on_scroll(&self, handler: ScrollHandler) -> DomResult<()>;

    /// Whether the runtime can observe viewport intersection.
    fn supports_intersection_observer(&self) -> bool;

    /// Observes `targets` until the callback releases them.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::Unsupported`](crate::error::DomError::Unsupported)
    /// when the runtime lacks the capability.
    fn observe_intersections(
        &self,
        targets: &[Self::Element],
        options: IntersectionOptions,
        callback: IntersectionCallback<Self::Element>,
    ) -> DomResult<()>;
}
