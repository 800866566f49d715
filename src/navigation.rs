//! Page navigation and the shared reaction to backend failures.

use wasm_bindgen::JsValue;

use crate::constants::{LIST_PAGE, SIGN_IN_PAGE};
use crate::network::ApiError;

/// Replace the current history entry with the sign-in page.
pub fn redirect_to_sign_in() {
    if let Err(e) = location_replace(SIGN_IN_PAGE) {
        web_sys::console::error_1(&e);
    }
}

pub fn go_to_list_page() -> Result<(), JsValue> {
    window_location()?.set_href(LIST_PAGE)
}

/// `?code=` from the OAuth redirect, if present.
pub fn authorization_code_from_url() -> Result<Option<String>, JsValue> {
    let search = window_location()?.search()?;
    let params = web_sys::UrlSearchParams::new_with_str(&search)?;
    Ok(params.get("code").filter(|code| !code.is_empty()))
}

/// 401 sends the user to sign in; anything else is logged and dropped.
pub fn report_api_error(context: &str, err: &ApiError) {
    match err {
        ApiError::Unauthorized => redirect_to_sign_in(),
        other => web_sys::console::error_1(&format!("{}: {}", context, other).into()),
    }
}

fn window_location() -> Result<web_sys::Location, JsValue> {
    Ok(web_sys::window()
        .ok_or_else(|| JsValue::from_str("no global window"))?
        .location())
}

fn location_replace(url: &str) -> Result<(), JsValue> {
    window_location()?.replace(url)
}
