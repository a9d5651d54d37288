//! Connection metadata from the Network Information API.
//!
//! `navigator.connection` is absent in Firefox and Safari and vendor-prefixed
//! in some older engines, so every field is read by reflection and missing
//! values stay `None`.

use js_sys::Reflect;
use shopfront_core::network::ConnectionInfo;
use wasm_bindgen::JsValue;
use web_sys::Window;

const CONNECTION_KEYS: [&str; 3] = ["connection", "mozConnection", "webkitConnection"];

/// Reads the connection metadata of `window.navigator`, if exposed.
pub fn read_connection(window: &Window) -> Option<ConnectionInfo> {
    let navigator = window.navigator();
    let connection = CONNECTION_KEYS.iter().find_map(|key| {
        Reflect::get(&navigator, &JsValue::from_str(key))
            .ok()
            .filter(JsValue::is_object)
    })?;
    Some(connection_from_value(&connection))
}

/// Extracts the fields the classifier needs from a `NetworkInformation`-like
/// object.
pub fn connection_from_value(connection: &JsValue) -> ConnectionInfo {
    let field = |name: &str| Reflect::get(connection, &JsValue::from_str(name)).ok();

    ConnectionInfo {
        save_data: field("saveData").and_then(|v| v.as_bool()),
        connection_type: field("type").and_then(|v| v.as_string()),
        effective_type: field("effectiveType").and_then(|v| v.as_string()),
    }
}
