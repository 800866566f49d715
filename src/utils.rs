//! Utility helpers shared across the WASM frontend.

/// Return the current timestamp in **milliseconds** since UNIX epoch.
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Escape text before it is interpolated into an HTML template.  Used for
/// both element content and quoted attribute values.
pub fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Percent-encode a query-string value.
pub fn encode_query_value(value: &str) -> String {
    String::from(js_sys::encode_uri_component(value))
}
