pub mod api_client;
pub mod config;

pub use api_client::ApiClient;
pub use config::ApiConfig;

use std::cell::RefCell;
use std::fmt;

use wasm_bindgen::prelude::*;

thread_local! {
    static API_CONFIG: RefCell<ApiConfig> = RefCell::new(ApiConfig::new());
}

/// Current API configuration.
pub fn api_config() -> ApiConfig {
    API_CONFIG.with(|config| config.borrow().clone())
}

/// Runtime override of the backend base URL, called from the page's
/// bootstrap script before the app starts.
#[wasm_bindgen]
pub fn init_api_config_js(base_url: &str) {
    API_CONFIG.with(|config| *config.borrow_mut() = ApiConfig::from_url(base_url));
}

/// Outcome categories for backend calls.  Only `Unauthorized` changes
/// control flow (redirect to sign-in); `NotFound` is meaningful for the list
/// fetch; everything else is reported and dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    Unauthorized,
    NotFound,
    Status(u16),
    Transport(String),
    Decode(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Unauthorized => write!(f, "not signed in or session expired"),
            ApiError::NotFound => write!(f, "not found"),
            ApiError::Status(code) => write!(f, "API request failed with status {}", code),
            ApiError::Transport(msg) => write!(f, "request failed: {}", msg),
            ApiError::Decode(msg) => write!(f, "unexpected response: {}", msg),
        }
    }
}

impl From<ApiError> for JsValue {
    fn from(err: ApiError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

impl ApiError {
    pub(crate) fn transport(err: JsValue) -> Self {
        ApiError::Transport(err.as_string().unwrap_or_else(|| format!("{:?}", err)))
    }
}
