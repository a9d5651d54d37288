//! Shopfront WebAssembly bindings
//!
//! Browser entry point for the barber shop landing page. It wires the
//! controllers from `shopfront-core` to the live DOM:
//!
//! - **dom**: `web-sys` implementation of the core `Document`/`Element` traits
//! - **connection**: Network Information API lookup (data saver, cellular,
//!   effective bandwidth tier)
//!
//! # Features
//!
//! - `console_error_panic_hook` (default) - Better panic messages in browser console
//!
//! # Building for WASM
//!
//! ```bash
//! wasm-pack build --target web crates/shopfront-wasm
//! ```
//!
//! # Example Usage (JavaScript)
//!
//! ```javascript
//! import init, { boot, bootWithConfig, initLogging } from './shopfront_wasm.js';
//!
//! await init();
//! initLogging('warn');
//!
//! // Stock page markup
//! const ui = boot();
//!
//! // Or override part of the markup contract
//! const ui2 = bootWithConfig({ map: { embed_height: 360 } });
//!
//! console.log(ui.liteMode, ui.poorNetwork, ui.mapContent, ui.revealMode);
//! ui.openMenu();
//! ```

use shopfront_core::{MenuState, ShopfrontUi, UiConfig};
use wasm_bindgen::prelude::*;

pub mod connection;
pub mod dom;

pub use dom::{WebDocument, WebElement};

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    // Set panic hook for better error messages in browser console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Initialize logging with specified level.
///
/// @param {string} level - Log level: "trace", "debug", "info", "warn", "error"
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging(level: &str) {
    let log_level = match level.to_lowercase().as_str() {
        "trace" => log::Level::Trace,
        "debug" => log::Level::Debug,
        "info" => log::Level::Info,
        "warn" => log::Level::Warn,
        "error" => log::Level::Error,
        _ => log::Level::Info,
    };

    let _ = wasm_logger::init(wasm_logger::Config::new(log_level));
    log::info!("Shopfront WASM initialized with log level: {}", level);
}

/// Get the library version.
///
/// @returns {string} Version string
#[wasm_bindgen(js_name = getVersion)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Attach every controller to the current page with the default markup
/// contract.
///
/// @returns {ShopfrontUi} Handle describing what was attached
#[wasm_bindgen]
pub fn boot() -> Result<ShopfrontHandle, JsError> {
    attach(&UiConfig::default())
}

/// Attach every controller with a partial configuration override.
///
/// @param {object | undefined} config - e.g. `{ header: { scroll_threshold: 80 } }`
/// @returns {ShopfrontUi} Handle describing what was attached
#[wasm_bindgen(js_name = bootWithConfig)]
pub fn boot_with_config(config: JsValue) -> Result<ShopfrontHandle, JsError> {
    let config: UiConfig = if config.is_undefined() || config.is_null() {
        UiConfig::default()
    } else {
        serde_wasm_bindgen::from_value(config)
            .map_err(|e| JsError::new(&format!("Invalid configuration: {}", e)))?
    };
    attach(&config)
}

fn attach(config: &UiConfig) -> Result<ShopfrontHandle, JsError> {
    let doc = WebDocument::from_window()
        .ok_or_else(|| JsError::new("No window document; boot must run on the main thread"))?;
    let connection = connection::read_connection(doc.window());

    let ui = ShopfrontUi::attach(&doc, connection.as_ref(), config)
        .map_err(|e| JsError::new(&e.to_string()))?;
    Ok(ShopfrontHandle { ui })
}

/// Attached page controllers.
#[wasm_bindgen(js_name = ShopfrontUi)]
pub struct ShopfrontHandle {
    ui: ShopfrontUi<WebElement>,
}

#[wasm_bindgen(js_class = ShopfrontUi)]
impl ShopfrontHandle {
    /// Whether the user asked for reduced data usage.
    #[wasm_bindgen(getter, js_name = liteMode)]
    pub fn lite_mode(&self) -> bool {
        self.ui.profile().lite_mode
    }

    /// Whether the connection is cellular or slow.
    #[wasm_bindgen(getter, js_name = poorNetwork)]
    pub fn poor_network(&self) -> bool {
        self.ui.profile().poor_network
    }

    /// Whether the mobile menu is open.
    #[wasm_bindgen(getter, js_name = menuOpen)]
    pub fn menu_open(&self) -> bool {
        self.ui.menu_state() == MenuState::Open
    }

    /// "embed", "image", "unavailable", or undefined without a map container.
    #[wasm_bindgen(getter, js_name = mapContent)]
    pub fn map_content(&self) -> Option<String> {
        self.ui.map_content().map(|c| c.kind().to_string())
    }

    /// "immediate", "observing", or "none".
    #[wasm_bindgen(getter, js_name = revealMode)]
    pub fn reveal_mode(&self) -> String {
        self.ui.reveal_mode().to_string()
    }

    /// Number of same-page links intercepted.
    #[wasm_bindgen(getter, js_name = anchorCount)]
    pub fn anchor_count(&self) -> usize {
        self.ui.anchor_count()
    }

    /// Open the mobile menu programmatically.
    #[wasm_bindgen(js_name = openMenu)]
    pub fn open_menu(&self) {
        if let Some(menu) = self.ui.menu() {
            menu.open();
        }
    }

    /// Close the mobile menu programmatically.
    #[wasm_bindgen(js_name = closeMenu)]
    pub fn close_menu(&self) {
        if let Some(menu) = self.ui.menu() {
            menu.close();
        }
    }
}
