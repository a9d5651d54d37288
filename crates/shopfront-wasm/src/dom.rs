//! `web-sys` implementation of the core document traits.
//!
//! Event closures are leaked with [`Closure::forget`]; they belong to the
//! page and are never removed.

use shopfront_core::dom::{
    ClickHandler, ClickOutcome, Document, Element, IntersectionCallback, IntersectionEntry,
    IntersectionOptions, Observation, ScrollHandler, ScrollMode,
};
use shopfront_core::error::{DomError, DomResult};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    AddEventListenerOptions, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, ScrollBehavior, ScrollToOptions, Window,
};

/// Describes a thrown JS value for error messages.
fn js_reason(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

/// Page element backed by a DOM `Element`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebElement(web_sys::Element);

impl WebElement {
    fn html(&self) -> Option<&HtmlElement> {
        self.0.dyn_ref::<HtmlElement>()
    }
}

impl Element for WebElement {
    fn add_class(&self, class: &str) -> DomResult<()> {
        self.0
            .class_list()
            .add_1(class)
            .map_err(|e| DomError::operation("classList.add", js_reason(&e)))
    }

    fn remove_class(&self, class: &str) -> DomResult<()> {
        self.0
            .class_list()
            .remove_1(class)
            .map_err(|e| DomError::operation("classList.remove", js_reason(&e)))
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.class_list().contains(class)
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }

    fn set_attribute(&self, name: &str, value: &str) -> DomResult<()> {
        self.0
            .set_attribute(name, value)
            .map_err(|e| DomError::operation("setAttribute", js_reason(&e)))
    }

    fn set_style(&self, property: &str, value: &str) -> DomResult<()> {
        let html = self
            .html()
            .ok_or_else(|| DomError::unsupported("inline style on non-HTML element"))?;
        html.style()
            .set_property(property, value)
            .map_err(|e| DomError::operation("style.setProperty", js_reason(&e)))
    }

    fn set_text(&self, text: &str) {
        self.0.set_text_content(Some(text));
    }

    fn clear(&self) {
        self.0.set_inner_html("");
    }

    fn append(&self, child: &Self) -> DomResult<()> {
        self.0
            .append_child(&child.0)
            .map(|_| ())
            .map_err(|e| DomError::operation("appendChild", js_reason(&e)))
    }

    fn offset_top(&self) -> f64 {
        // Sum along the offsetParent chain to get a document-relative offset.
        let mut top = 0.0;
        let mut current = self.html().cloned();
        while let Some(element) = current {
            top += f64::from(element.offset_top());
            current = element
                .offset_parent()
                .and_then(|parent| parent.dyn_into::<HtmlElement>().ok());
        }
        top
    }

    fn offset_height(&self) -> f64 {
        self.html().map_or(0.0, |e| f64::from(e.offset_height()))
    }

    fn on_click(&self, mut handler: ClickHandler) -> DomResult<()> {
        let callback = Closure::wrap(Box::new(move |event: web_sys::Event| {
            if handler() == ClickOutcome::PreventDefault {
                event.prevent_default();
            }
        }) as Box<dyn FnMut(_)>);

        self.0
            .add_event_listener_with_callback("click", callback.as_ref().unchecked_ref())
            .map_err(|e| DomError::operation("addEventListener", js_reason(&e)))?;
        callback.forget();
        Ok(())
    }
}

/// The browser window and its document.
#[derive(Debug, Clone)]
pub struct WebDocument {
    window: Window,
    document: web_sys::Document,
}

impl WebDocument {
    /// The current page, or `None` outside a window context (e.g. workers).
    pub fn from_window() -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        Some(Self { window, document })
    }

    /// The browser window.
    pub fn window(&self) -> &Window {
        &self.window
    }
}

impl Document for WebDocument {
    type Element = WebElement;

    fn element_by_id(&self, id: &str) -> Option<WebElement> {
        self.document.get_element_by_id(id).map(WebElement)
    }

    fn query_selector(&self, selector: &str) -> DomResult<Option<WebElement>> {
        self.document
            .query_selector(selector)
            .map(|found| found.map(WebElement))
            .map_err(|e| DomError::invalid_selector(selector, js_reason(&e)))
    }

    fn query_selector_all(&self, selector: &str) -> DomResult<Vec<WebElement>> {
        let nodes = self
            .document
            .query_selector_all(selector)
            .map_err(|e| DomError::invalid_selector(selector, js_reason(&e)))?;

        Ok((0..nodes.length())
            .filter_map(|i| nodes.get(i))
            .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
            .map(WebElement)
            .collect())
    }

    fn body(&self) -> Option<WebElement> {
        self.document
            .body()
            .map(|body| WebElement(body.unchecked_into()))
    }

    fn create_element(&self, tag: &str) -> DomResult<WebElement> {
        self.document
            .create_element(tag)
            .map(WebElement)
            .map_err(|e| DomError::operation("createElement", js_reason(&e)))
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn scroll_to(&self, top: f64, mode: ScrollMode) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(match mode {
            ScrollMode::Smooth => ScrollBehavior::Smooth,
            ScrollMode::Jump => ScrollBehavior::Instant,
        });
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn on_scroll(&self, mut handler: ScrollHandler) -> DomResult<()> {
        let callback = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);

        let options = AddEventListenerOptions::new();
        options.set_passive(true);

        self.window
            .add_event_listener_with_callback_and_add_event_listener_options(
                "scroll",
                callback.as_ref().unchecked_ref(),
                &options,
            )
            .map_err(|e| DomError::operation("addEventListener", js_reason(&e)))?;
        callback.forget();
        Ok(())
    }

    fn supports_intersection_observer(&self) -> bool {
        js_sys::Reflect::has(&self.window, &JsValue::from_str("IntersectionObserver"))
            .unwrap_or(false)
    }

    fn observe_intersections(
        &self,
        targets: &[WebElement],
        options: IntersectionOptions,
        mut callback: IntersectionCallback<WebElement>,
    ) -> DomResult<()> {
        if !self.supports_intersection_observer() {
            return Err(DomError::unsupported("IntersectionObserver"));
        }

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        init.set_root_margin(&options.root_margin.to_string());

        let on_entries = Closure::wrap(Box::new(
            move |entries: js_sys::Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    let target = entry.target();
                    let notification = IntersectionEntry {
                        target: WebElement(target.clone()),
                        is_intersecting: entry.is_intersecting(),
                        ratio: entry.intersection_ratio(),
                    };
                    if callback(&notification) == Observation::Release {
                        observer.unobserve(&target);
                    }
                }
            },
        ) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

        let observer =
            IntersectionObserver::new_with_options(on_entries.as_ref().unchecked_ref(), &init)
                .map_err(|e| DomError::operation("IntersectionObserver", js_reason(&e)))?;
        on_entries.forget();

        for target in targets {
            observer.observe(&target.0);
        }
        log::debug!("Observing {} element(s) for reveal", targets.len());
        Ok(())
    }
}
