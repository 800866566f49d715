use serde::de::DeserializeOwned;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

use super::{api_config, ApiError};
use crate::debug_log;
use crate::models::{
    AccessTokenResponse, AuthorizationUrlResponse, ListResponse, Listing, Location, ProductSearchResult,
    SaveListRequest, SaveListResponse, SavedList, TokenRequest,
};

/// REST client for the grocery backend.
pub struct ApiClient;

impl ApiClient {
    /// Map an HTTP status onto the error taxonomy.  Only 200 is success.
    pub fn classify_status(status: u16) -> Result<(), ApiError> {
        match status {
            200 => Ok(()),
            401 => Err(ApiError::Unauthorized),
            404 => Err(ApiError::NotFound),
            other => Err(ApiError::Status(other)),
        }
    }

    // -------------------------------------------------------------------
    // Authentication
    // -------------------------------------------------------------------

    /// Trade the OAuth `code` from the redirect for an access token.
    pub async fn exchange_code(code: &str) -> Result<String, ApiError> {
        let url = api_config().access_token_url(code);
        let body: AccessTokenResponse = Self::request_json(&url, "GET", None).await?;
        Ok(body.access_token)
    }

    /// Retailer login URL for the sign-in button.
    pub async fn authorization_url() -> Result<String, ApiError> {
        let url = api_config().authorization_url();
        let body: AuthorizationUrlResponse = Self::request_json(&url, "GET", None).await?;
        Ok(body.url)
    }

    // -------------------------------------------------------------------
    // Lists
    // -------------------------------------------------------------------

    /// Persisted list for this account.  `Ok(None)` when none was saved yet.
    pub async fn get_list(access_token: &str) -> Result<Option<SavedList>, ApiError> {
        let url = api_config().get_list_url();
        let body = serde_json::to_string(&TokenRequest { access_token })?;
        Self::list_from_outcome(Self::request_json::<ListResponse>(&url, "POST", Some(body)).await)
    }

    /// 404 from get-list means nothing was saved yet.
    pub fn list_from_outcome(outcome: Result<ListResponse, ApiError>) -> Result<Option<SavedList>, ApiError> {
        match outcome {
            Ok(response) => Ok(Some(response.list)),
            Err(ApiError::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Persist `list`.  Returns whether the backend echoed the stored list
    /// back, which is how it confirms the write.
    pub async fn save_list(access_token: &str, list: &SavedList) -> Result<bool, ApiError> {
        let url = api_config().save_list_url();
        let body = serde_json::to_string(&SaveListRequest { access_token, list })?;
        let response: SaveListResponse = Self::request_json(&url, "POST", Some(body)).await?;
        Ok(response.list.is_some())
    }

    // -------------------------------------------------------------------
    // Search
    // -------------------------------------------------------------------

    pub async fn find_locations(access_token: &str, zip_code: &str) -> Result<Vec<Location>, ApiError> {
        let url = api_config().find_location_url(zip_code);
        let body = serde_json::to_string(&TokenRequest { access_token })?;
        let listing: Listing<Location> = Self::request_json(&url, "POST", Some(body)).await?;
        Ok(listing.into_vec())
    }

    pub async fn search_products(
        access_token: &str,
        term: &str,
        location_id: &str,
    ) -> Result<Vec<ProductSearchResult>, ApiError> {
        let url = api_config().search_products_url(term, location_id);
        let body = serde_json::to_string(&TokenRequest { access_token })?;
        let listing: Listing<ProductSearchResult> = Self::request_json(&url, "POST", Some(body)).await?;
        Ok(listing.into_vec())
    }

    // -------------------------------------------------------------------
    // Transport
    // -------------------------------------------------------------------

    async fn request_json<T: DeserializeOwned>(url: &str, method: &str, body: Option<String>) -> Result<T, ApiError> {
        let (status, text) = Self::fetch_text(url, method, body.as_deref())
            .await
            .map_err(ApiError::transport)?;
        debug_log!("{} {} -> {}", method, url, status);
        Self::classify_status(status)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Issue the request and return `(status, body)` without interpreting
    /// the status.
    ///
    /// POST bodies go out without a `Content-Type` header so the browser
    /// treats them as CORS simple requests (no preflight); the backend parses
    /// the JSON regardless.
    pub async fn fetch_text(url: &str, method: &str, body: Option<&str>) -> Result<(u16, String), JsValue> {
        let opts = RequestInit::new();
        opts.set_method(method);
        opts.set_mode(RequestMode::Cors);
        if let Some(data) = body {
            opts.set_body(&JsValue::from_str(data));
        }

        let request = Request::new_with_str_and_init(url, &opts)?;

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
        let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
        let resp: Response = resp_value.dyn_into()?;

        let text = JsFuture::from(resp.text()?).await?;
        Ok((resp.status(), text.as_string().unwrap_or_default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_classification() {
        assert_eq!(ApiClient::classify_status(200), Ok(()));
        assert_eq!(ApiClient::classify_status(401), Err(ApiError::Unauthorized));
        assert_eq!(ApiClient::classify_status(404), Err(ApiError::NotFound));
        assert_eq!(ApiClient::classify_status(500), Err(ApiError::Status(500)));
        assert_eq!(ApiClient::classify_status(204), Err(ApiError::Status(204)));
    }

    #[test]
    fn missing_list_is_not_an_error() {
        assert_eq!(ApiClient::list_from_outcome(Err(ApiError::NotFound)), Ok(None));
        assert_eq!(
            ApiClient::list_from_outcome(Err(ApiError::Unauthorized)),
            Err(ApiError::Unauthorized)
        );
        assert_eq!(
            ApiClient::list_from_outcome(Err(ApiError::Status(500))),
            Err(ApiError::Status(500))
        );

        let saved = SavedList {
            location: Some("01400943".into()),
            items: Vec::new(),
        };
        let found = ApiClient::list_from_outcome(Ok(ListResponse { list: saved.clone() }));
        assert_eq!(found, Ok(Some(saved)));
    }

    #[test]
    fn errors_render_for_logs() {
        assert_eq!(
            ApiError::Status(503).to_string(),
            "API request failed with status 503"
        );
        let decode: ApiError = serde_json::from_str::<SavedList>("[").unwrap_err().into();
        assert!(matches!(decode, ApiError::Decode(_)));
    }
}
