use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::constants::THUMBNAIL_SIZE;

/// A single entry on the grocery list.
///
/// Entries rebuilt from `data-product-*` attributes carry the id under `id`
/// and the price as a string, so both shapes are accepted on the way in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub size: String,
    #[serde(default, deserialize_with = "lenient_price")]
    pub price: f64,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(rename = "productId", alias = "id", default)]
    pub product_id: String,
}

impl Product {
    /// Rebuild a product from the nested object produced by
    /// [`crate::data_object::attributes_to_data_object`], i.e. the value found
    /// under its `product` key.
    pub fn from_data_object(data: &Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(data.clone())
    }

    /// Price as displayed in the list: `$X.XX`, or `None` when the retailer
    /// reported no usable price.
    pub fn display_price(&self) -> Option<String> {
        (self.price > 0.0).then(|| format_usd(self.price))
    }
}

/// Numbers pass through; strings are parsed; anything else counts as zero.
fn lenient_price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(price_from_value(&value))
}

pub(crate) fn price_from_value(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    if parsed.is_finite() {
        parsed
    } else {
        0.0
    }
}

pub fn format_usd(amount: f64) -> String {
    format!("${:.2}", amount)
}

/// Selected store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    #[serde(rename = "locationId")]
    pub location_id: String,
}

/// Wire shape of a persisted list.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SavedList {
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub items: Vec<Product>,
}

// ---------------------------------------------------------------------------
// Request / response bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenRequest<'a> {
    pub access_token: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveListRequest<'a> {
    pub access_token: &'a str,
    pub list: &'a SavedList,
}

#[derive(Debug, Deserialize)]
pub struct AccessTokenResponse {
    pub access_token: String,
}

#[derive(Debug, Deserialize)]
pub struct AuthorizationUrlResponse {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct ListResponse {
    pub list: SavedList,
}

/// Save responses echo the stored list; its absence means the save did not
/// take even though the status was 200.
#[derive(Debug, Deserialize)]
pub struct SaveListResponse {
    #[serde(default)]
    pub list: Option<SavedList>,
}

/// Search endpoints answer with a bare array; the retailer's own envelope
/// (`{ "data": [...] }`) is accepted too.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Listing<T> {
    Bare(Vec<T>),
    Wrapped { data: Vec<T> },
}

impl<T> Listing<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Listing::Bare(items) | Listing::Wrapped { data: items } => items,
        }
    }
}

// ---------------------------------------------------------------------------
// Retailer product search results
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSearchResult {
    #[serde(default)]
    pub product_id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub items: Vec<ProductItem>,
    #[serde(default)]
    pub images: Vec<ProductImage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductItem {
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub price: Option<ItemPrice>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ItemPrice {
    #[serde(default)]
    pub regular: f64,
    #[serde(default)]
    pub promo: f64,
}

impl ItemPrice {
    pub fn on_promo(&self) -> bool {
        self.promo > 0.0
    }

    /// The price the shopper actually pays.
    pub fn effective(&self) -> f64 {
        if self.on_promo() {
            self.promo
        } else {
            self.regular
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductImage {
    #[serde(default)]
    pub sizes: Vec<ImageSize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageSize {
    pub size: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchResultError {
    NoItems,
    NoThumbnail,
}

impl std::fmt::Display for SearchResultError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchResultError::NoItems => write!(f, "product has no purchasable items"),
            SearchResultError::NoThumbnail => write!(f, "product has no thumbnail image"),
        }
    }
}

impl ProductSearchResult {
    pub fn first_item(&self) -> Result<&ProductItem, SearchResultError> {
        self.items.first().ok_or(SearchResultError::NoItems)
    }

    /// URL of the `thumbnail` rendition of the first image.
    pub fn thumbnail_url(&self) -> Result<&str, SearchResultError> {
        self.images
            .first()
            .and_then(|image| image.sizes.iter().find(|s| s.size == THUMBNAIL_SIZE))
            .map(|s| s.url.as_str())
            .ok_or(SearchResultError::NoThumbnail)
    }

    /// Flatten into a list entry; the same values end up in the result's
    /// `data-product-*` attributes.
    pub fn to_product(&self) -> Result<Product, SearchResultError> {
        let item = self.first_item()?;
        Ok(Product {
            description: self.description.clone(),
            size: item.size.clone(),
            price: item.price.map(|p| p.effective()).unwrap_or(0.0),
            thumbnail: self.thumbnail_url()?.to_string(),
            product_id: self.product_id.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn product_accepts_string_price_and_id_alias() {
        let p: Product = serde_json::from_value(json!({
            "description": "Milk",
            "size": "1 gal",
            "price": "3.49",
            "thumbnail": "https://img/milk.jpg",
            "id": "0001"
        }))
        .unwrap();
        assert_eq!(p.price, 3.49);
        assert_eq!(p.product_id, "0001");
    }

    #[test]
    fn non_numeric_price_counts_as_zero() {
        let p: Product = serde_json::from_value(json!({ "price": "n/a" })).unwrap();
        assert_eq!(p.price, 0.0);
        assert_eq!(p.display_price(), None);

        let p: Product = serde_json::from_value(json!({ "price": null })).unwrap();
        assert_eq!(p.price, 0.0);
    }

    #[test]
    fn product_serializes_with_product_id() {
        let p = Product {
            description: "Eggs".into(),
            size: "12 ct".into(),
            price: 2.5,
            thumbnail: "t".into(),
            product_id: "42".into(),
        };
        let v = serde_json::to_value(&p).unwrap();
        assert_eq!(v["productId"], "42");
        assert_eq!(v["price"], 2.5);
        assert_eq!(p.display_price().as_deref(), Some("$2.50"));
    }

    #[test]
    fn search_result_prefers_promo_price() {
        let r: ProductSearchResult = serde_json::from_value(json!({
            "productId": "7",
            "description": "Bread",
            "items": [{ "size": "20 oz", "price": { "regular": 3.0, "promo": 2.0 } }],
            "images": [{ "sizes": [
                { "size": "large", "url": "L" },
                { "size": "thumbnail", "url": "T" }
            ]}]
        }))
        .unwrap();
        let p = r.to_product().unwrap();
        assert_eq!(p.price, 2.0);
        assert_eq!(p.thumbnail, "T");
        assert_eq!(p.size, "20 oz");
    }

    #[test]
    fn search_result_without_price_or_thumbnail() {
        let r: ProductSearchResult = serde_json::from_value(json!({
            "productId": "8",
            "description": "Apples",
            "items": [{ "size": "1 lb" }],
            "images": [{ "sizes": [{ "size": "large", "url": "L" }] }]
        }))
        .unwrap();
        assert_eq!(r.to_product(), Err(SearchResultError::NoThumbnail));

        let r: ProductSearchResult = serde_json::from_value(json!({
            "productId": "9",
            "items": [{ "size": "1 lb" }],
            "images": [{ "sizes": [{ "size": "thumbnail", "url": "T" }] }]
        }))
        .unwrap();
        assert_eq!(r.to_product().unwrap().price, 0.0);
    }

    #[test]
    fn listing_accepts_both_envelopes() {
        let bare: Listing<Location> =
            serde_json::from_value(json!([{ "name": "Main St", "locationId": "1" }])).unwrap();
        let wrapped: Listing<Location> =
            serde_json::from_value(json!({ "data": [{ "name": "Main St", "locationId": "1" }] })).unwrap();
        assert_eq!(bare.into_vec(), wrapped.into_vec());
    }

    #[test]
    fn saved_list_wire_shape() {
        let list: SavedList = serde_json::from_value(json!({
            "location": "01400943",
            "items": [{ "description": "Milk", "price": 1.5, "productId": "1" }]
        }))
        .unwrap();
        assert_eq!(list.location.as_deref(), Some("01400943"));
        assert_eq!(list.items.len(), 1);

        let body = serde_json::to_value(SaveListRequest { access_token: "tok", list: &list }).unwrap();
        assert_eq!(body["accessToken"], "tok");
        assert_eq!(body["list"]["items"][0]["productId"], "1");
    }
}
