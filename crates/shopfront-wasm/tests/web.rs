//! Web tests for shopfront-wasm
//!
//! Run with: wasm-pack test --headless --chrome crates/shopfront-wasm

#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

use shopfront_core::prelude::*;
use shopfront_core::{
    AnchorConfig, HeaderConfig, MapConfig, MapContent, MapLoader, MenuConfig, MenuState,
    MobileMenu, RevealAnimator, RevealConfig, RevealMode, SmoothAnchorScroller,
};
use shopfront_wasm::connection::connection_from_value;
use shopfront_wasm::WebDocument;

fn doc() -> WebDocument {
    WebDocument::from_window().expect("tests run in a window")
}

/// Appends `<tag id=id>` to the body.
fn mount(tag: &str, id: &str) -> web_sys::HtmlElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let element = document.create_element(tag).unwrap();
    if !id.is_empty() {
        element.set_id(id);
    }
    document.body().unwrap().append_child(&element).unwrap();
    element.dyn_into().unwrap()
}

/// Dispatches a cancelable click and reports whether the default was kept.
fn click_keeps_default(element: &web_sys::HtmlElement) -> bool {
    let init = web_sys::EventInit::new();
    init.set_bubbles(true);
    init.set_cancelable(true);
    let event = web_sys::Event::new_with_event_init_dict("click", &init).unwrap();
    element.dispatch_event(&event).unwrap()
}

// ============================================================================
// Connection Tests
// ============================================================================

#[wasm_bindgen_test]
fn test_connection_fields() {
    let obj = js_sys::Object::new();
    js_sys::Reflect::set(&obj, &"saveData".into(), &JsValue::TRUE).unwrap();
    js_sys::Reflect::set(&obj, &"type".into(), &"wifi".into()).unwrap();
    js_sys::Reflect::set(&obj, &"effectiveType".into(), &"3g".into()).unwrap();

    let info = connection_from_value(&obj);
    assert_eq!(info.save_data, Some(true));
    assert_eq!(info.connection_type.as_deref(), Some("wifi"));

    let profile = NetworkProfile::classify(Some(&info));
    assert!(profile.lite_mode);
    assert!(profile.poor_network);
}

#[wasm_bindgen_test]
fn test_connection_missing_fields() {
    let obj = js_sys::Object::new();
    js_sys::Reflect::set(&obj, &"saveData".into(), &"yes".into()).unwrap();

    let info = connection_from_value(&obj);
    assert_eq!(info, ConnectionInfo::default());
    assert_eq!(NetworkProfile::classify(Some(&info)), NetworkProfile::FULL);
}

// ============================================================================
// Header Tests
// ============================================================================

#[wasm_bindgen_test]
fn test_header_missing_is_noop() {
    let config = HeaderConfig {
        element_id: "t-header-missing".into(),
        ..HeaderConfig::default()
    };
    assert!(shopfront_core::HeaderStyler::attach(&doc(), &config).is_none());
}

#[wasm_bindgen_test]
fn test_header_at_top_not_scrolled() {
    let header = mount("header", "t-header");
    let config = HeaderConfig {
        element_id: "t-header".into(),
        ..HeaderConfig::default()
    };
    web_sys::window().unwrap().scroll_to_with_x_and_y(0.0, 0.0);

    shopfront_core::HeaderStyler::attach(&doc(), &config);
    assert!(!header.class_list().contains("scrolled"));
}

// ============================================================================
// Menu Tests
// ============================================================================

fn menu_config(prefix: &str) -> MenuConfig {
    MenuConfig {
        panel_id: format!("{prefix}-panel"),
        open_button_id: format!("{prefix}-open"),
        close_button_id: format!("{prefix}-close"),
        overlay_id: format!("{prefix}-overlay"),
        link_selector: format!(".{prefix}-link"),
        open_class: "open".into(),
    }
}

#[wasm_bindgen_test]
fn test_menu_open_close() {
    let panel = mount("nav", "t-menu-panel");
    let open = mount("button", "t-menu-open");
    let close = mount("button", "t-menu-close");
    let overlay = mount("div", "t-menu-overlay");
    let link = mount("a", "");
    link.set_class_name("t-menu-link");
    let body = web_sys::window().unwrap().document().unwrap().body().unwrap();

    let menu = MobileMenu::attach(&doc(), &menu_config("t-menu")).expect("panel exists");

    open.click();
    assert_eq!(menu.state(), MenuState::Open);
    assert!(panel.class_list().contains("open"));
    assert_eq!(body.style().get_property_value("overflow").unwrap(), "hidden");

    close.click();
    assert_eq!(menu.state(), MenuState::Closed);
    assert!(!panel.class_list().contains("open"));
    assert_eq!(body.style().get_property_value("overflow").unwrap(), "");

    open.click();
    overlay.click();
    assert_eq!(menu.state(), MenuState::Closed);

    open.click();
    link.click();
    assert_eq!(menu.state(), MenuState::Closed);
}

// ============================================================================
// Reveal Tests
// ============================================================================

#[wasm_bindgen_test]
fn test_reveal_lite_mode_immediate() {
    let a = mount("div", "");
    a.set_class_name("t-reveal-lite");
    let b = mount("div", "");
    b.set_class_name("t-reveal-lite");

    let profile = NetworkProfile {
        lite_mode: true,
        poor_network: false,
    };
    let config = RevealConfig {
        selector: ".t-reveal-lite".into(),
        ..RevealConfig::default()
    };

    let mode = RevealAnimator::attach(&doc(), &profile, &config);
    assert_eq!(mode, RevealMode::Immediate { revealed: 2 });
    assert!(a.class_list().contains("visible"));
    assert!(b.class_list().contains("visible"));
}

#[wasm_bindgen_test]
fn test_reveal_observes_when_supported() {
    let el = mount("div", "");
    el.set_class_name("t-reveal-observe");
    let config = RevealConfig {
        selector: ".t-reveal-observe".into(),
        ..RevealConfig::default()
    };

    let web = doc();
    assert!(web.supports_intersection_observer());
    let mode = RevealAnimator::attach(&web, &NetworkProfile::FULL, &config);
    assert_eq!(mode, RevealMode::Observing { observed: 1 });
}

// ============================================================================
// Anchor Tests
// ============================================================================

#[wasm_bindgen_test]
fn test_anchor_interception() {
    let bare = mount("a", "");
    bare.set_attribute("href", "#").unwrap();
    bare.set_class_name("t-anchor");
    let missing = mount("a", "");
    missing.set_attribute("href", "#t-anchor-nowhere").unwrap();
    missing.set_class_name("t-anchor");
    let good = mount("a", "");
    good.set_attribute("href", "#t-anchor-target").unwrap();
    good.set_class_name("t-anchor");
    mount("section", "t-anchor-target");

    let config = AnchorConfig {
        selector: "a.t-anchor".into(),
    };
    let header = HeaderConfig {
        element_id: "t-anchor-header".into(),
        ..HeaderConfig::default()
    };
    let bound = SmoothAnchorScroller::attach(&doc(), &NetworkProfile::FULL, &config, &header);
    assert_eq!(bound, 3);

    assert!(click_keeps_default(&bare));
    assert!(click_keeps_default(&missing));
    assert!(!click_keeps_default(&good));
}

// ============================================================================
// Map Tests
// ============================================================================

fn map_config(id: &str) -> MapConfig {
    MapConfig {
        container_id: id.into(),
        ..MapConfig::default()
    }
}

#[wasm_bindgen_test]
fn test_map_embed() {
    let container = mount("div", "t-map-embed");
    container.set_attribute("data-src", "about:blank").unwrap();
    container.set_inner_html("<p>placeholder</p>");

    let content = MapLoader::attach(&doc(), &NetworkProfile::FULL, &map_config("t-map-embed"));
    assert_eq!(content.as_ref().map(MapContent::kind), Some("embed"));

    assert_eq!(container.child_element_count(), 1);
    let iframe = container.first_element_child().unwrap();
    assert_eq!(iframe.tag_name(), "IFRAME");
    assert_eq!(iframe.get_attribute("loading").as_deref(), Some("lazy"));
    assert_eq!(iframe.get_attribute("height").as_deref(), Some("280"));
    assert!(iframe.has_attribute("allowfullscreen"));
}

#[wasm_bindgen_test]
fn test_map_fallback_image_on_poor_network() {
    let container = mount("div", "t-map-image");
    container.set_attribute("data-src", "about:blank").unwrap();
    container.set_attribute("data-img", "data:image/gif;base64,R0lGODlhAQABAAAAACw=").unwrap();

    let profile = NetworkProfile {
        lite_mode: false,
        poor_network: true,
    };
    let content = MapLoader::attach(&doc(), &profile, &map_config("t-map-image"));
    assert_eq!(content.as_ref().map(MapContent::kind), Some("image"));
    assert_eq!(container.first_element_child().unwrap().tag_name(), "IMG");
}

#[wasm_bindgen_test]
fn test_map_unavailable_message() {
    let container = mount("div", "t-map-none");

    let content = MapLoader::attach(&doc(), &NetworkProfile::FULL, &map_config("t-map-none"));
    assert_eq!(content, Some(MapContent::Unavailable));
    assert_eq!(container.text_content().as_deref(), Some("Mapa no disponible"));
    assert_eq!(container.style().get_property_value("display").unwrap(), "flex");
}

// ============================================================================
// Boot Tests
// ============================================================================

#[wasm_bindgen_test]
fn test_boot_with_invalid_config() {
    let config = js_sys::Object::new();
    let header = js_sys::Object::new();
    js_sys::Reflect::set(&header, &"element_id".into(), &"".into()).unwrap();
    js_sys::Reflect::set(&config, &"header".into(), &header).unwrap();

    assert!(shopfront_wasm::boot_with_config(config.into()).is_err());
}

#[wasm_bindgen_test]
fn test_version() {
    assert!(!shopfront_wasm::get_version().is_empty());
}
