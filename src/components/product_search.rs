//! Product lookup scoped to the selected store.

use std::rc::Rc;

use web_sys::{Element, Event};

use super::search_dropdown::DropdownSource;
use crate::constants::{DROPDOWN_ITEM_CLASS, PRICE_UNAVAILABLE};
use crate::data_object::element_to_data_object;
use crate::models::{format_usd, ItemPrice, Product, ProductSearchResult, SearchResultError};
use crate::network::{ApiClient, ApiError};
use crate::session::SessionHandle;
use crate::utils::html_escape;
use crate::warn_log;

fn render_price(price: Option<ItemPrice>) -> String {
    match price {
        Some(price) if price.on_promo() => format!(
            r#"<b class="ml-auto m-0"><del>{}</del> <mark>{}</mark></b>"#,
            format_usd(price.regular),
            format_usd(price.promo)
        ),
        Some(price) => format!(r#"<b class="ml-auto m-0">{}</b>"#, format_usd(price.regular)),
        None => format!("<b>{}</b>", PRICE_UNAVAILABLE),
    }
}

/// Markup for one search result.  The `data-product-*` attributes carry
/// everything needed to rebuild the list entry on click.
pub fn render_product(result: &ProductSearchResult) -> Result<String, SearchResultError> {
    let product = result.to_product()?;
    let item = result.first_item()?;
    let description = html_escape(&product.description);
    let size = html_escape(&product.size);
    let thumbnail = html_escape(&product.thumbnail);

    Ok(format!(
        r#"<div class="{item_class} row"
    data-product-description="{description}"
    data-product-thumbnail="{thumbnail}"
    data-product-id="{id}"
    data-product-size="{size}"
    data-product-price="{price}">
    <div class="col">
        <div class="row align-center"><p class="m-0">{description}</p></div>
        <div class="row align-center"><b class="m-0">{size}</b></div>
    </div>
    <div class="col justify-center align-center ml-auto">{price_html}</div>
    <div class="col"><img src="{thumbnail}"/></div>
</div>"#,
        item_class = DROPDOWN_ITEM_CLASS,
        description = description,
        thumbnail = thumbnail,
        id = html_escape(&product.product_id),
        size = size,
        price = product.price,
        price_html = render_price(item.price),
    ))
}

pub struct ProductSource {
    session: Rc<SessionHandle>,
    on_select: Box<dyn Fn(Product)>,
}

impl ProductSource {
    pub fn new(session: Rc<SessionHandle>, on_select: impl Fn(Product) + 'static) -> Self {
        Self {
            session,
            on_select: Box::new(on_select),
        }
    }
}

impl DropdownSource for ProductSource {
    type Item = ProductSearchResult;

    const NAME: &'static str = "search products";

    async fn lookup(&self, term: String) -> Result<Vec<ProductSearchResult>, ApiError> {
        let location_id = self.session.location_id().unwrap_or_default();
        ApiClient::search_products(&self.session.token(), term.trim(), &location_id).await
    }

    fn render(&self, item: &ProductSearchResult) -> Option<String> {
        match render_product(item) {
            Ok(html) => Some(html),
            Err(e) => {
                warn_log!("skipping product {}: {}", item.product_id, e);
                None
            }
        }
    }

    fn select(&self, _event: &Event, item: &Element) {
        let data = element_to_data_object(item);
        let Some(product) = data.get("product") else {
            warn_log!("product item is missing its data attributes");
            return;
        };
        match Product::from_data_object(product) {
            Ok(product) => (self.on_select)(product),
            Err(e) => warn_log!("unreadable product item: {}", e),
        }
    }
}
