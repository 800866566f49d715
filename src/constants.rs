// Persisted session keys (localStorage) - shared with the backend-rendered
// pages, so the names must not change.
pub const ACCESS_TOKEN_KEY: &str = "kroger_access_token";
pub const AUTHORIZATION_CODE_KEY: &str = "kroger_authorization_code";
pub const LOCATION_ID_KEY: &str = "kroger_location_id";
pub const LOCATION_NAME_KEY: &str = "kroger_location_name";

// Navigation targets
pub const SIGN_IN_PAGE: &str = "/html/index.html";
pub const LIST_PAGE: &str = "../html/list.html";

// Search dropdown
pub const SEARCH_DEBOUNCE_MS: u32 = 250;
pub const DROPDOWN_INPUT_SELECTOR: &str = ".search-dropdown-input";
pub const DROPDOWN_RESULTS_SELECTOR: &str = ".search-dropdown-container";
pub const DROPDOWN_ITEM_CLASS: &str = "search-dropdown-item";

// Login page
pub const LOGIN_BUTTON_ID: &str = "kroger-login-button";

// List page
pub const LIST_CONTAINER_SELECTOR: &str = "#item-container > .list-container";
pub const TOTAL_PRICE_ID: &str = "total-price";
pub const SAVE_LIST_BUTTON_ID: &str = "save-list-button";
pub const CLEAR_LIST_BUTTON_ID: &str = "clear-list-button";
pub const CHANGE_LOCATION_BUTTON_ID: &str = "location-change-button";
pub const LOCATION_SELECTOR_ID: &str = "location-selector";
pub const LOCATION_BUTTON_ID: &str = "location-button";
pub const ADD_CONTAINER_ID: &str = "add-container";
pub const LOCATION_NAME_CLASS: &str = "location-name-container";
pub const REMOVE_BUTTON_CLASS: &str = "list-remove";

// Display
pub const PRICE_UNAVAILABLE: &str = "Price Unavailable";
pub const THUMBNAIL_SIZE: &str = "thumbnail";
