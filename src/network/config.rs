use crate::utils::encode_query_value;

/// Development backend (Azure Functions host default port).
pub const DEV_API_BASE_URL: &str = "http://localhost:7071";

/// API route configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
}

impl Default for ApiConfig {
    /// Points at the local development backend.  Release builds should set
    /// `API_BASE_URL` at build time or call `init_api_config_js()` from the
    /// page bootstrap before the first request goes out.
    fn default() -> Self {
        Self::from_url(DEV_API_BASE_URL)
    }
}

impl ApiConfig {
    /// Build from the `API_BASE_URL` environment variable captured at
    /// compile time, falling back to the development backend.
    pub fn new() -> Self {
        option_env!("API_BASE_URL").map(Self::from_url).unwrap_or_default()
    }

    /// Create a new ApiConfig from a URL string
    pub fn from_url(url: &str) -> Self {
        Self {
            base_url: url.trim_end_matches('/').to_string(),
        }
    }

    /// Get the base URL for all API calls
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get a full API URL for a given path
    pub fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    pub fn access_token_url(&self, code: &str) -> String {
        format!("{}?code={}", self.url("/kroger-access"), encode_query_value(code))
    }

    pub fn authorization_url(&self) -> String {
        self.url("/kroger-authorization-url")
    }

    pub fn get_list_url(&self) -> String {
        self.url("/get-list")
    }

    pub fn save_list_url(&self) -> String {
        self.url("/save-list")
    }

    pub fn find_location_url(&self, zip_code: &str) -> String {
        format!("{}?zipCode={}", self.url("/find-location"), encode_query_value(zip_code))
    }

    pub fn search_products_url(&self, term: &str, location_id: &str) -> String {
        format!(
            "{}?term={}&locationId={}",
            self.url("/search-products"),
            encode_query_value(term),
            encode_query_value(location_id)
        )
    }
}
