//! Store lookup by zip code.

use std::rc::Rc;

use serde_json::Value;
use web_sys::{Element, Event};

use super::search_dropdown::DropdownSource;
use crate::constants::DROPDOWN_ITEM_CLASS;
use crate::data_object::element_to_data_object;
use crate::models::Location;
use crate::network::{ApiClient, ApiError};
use crate::session::SessionHandle;
use crate::utils::html_escape;

pub fn render_location(location: &Location) -> String {
    let name = html_escape(&location.name);
    format!(
        r#"<div class="{item_class}" data-location-name="{name}" data-location-id="{id}">
    <p>{name}</p>
</div>"#,
        item_class = DROPDOWN_ITEM_CLASS,
        name = name,
        id = html_escape(&location.location_id),
    )
}

/// Rebuild a [`Location`] from a rendered item's data object.
pub fn location_from_data_object(data: &Value) -> Option<Location> {
    let location = data.get("location")?;
    Some(Location {
        name: location.get("name")?.as_str()?.to_string(),
        location_id: location.get("id")?.as_str()?.to_string(),
    })
}

pub struct LocationSource {
    session: Rc<SessionHandle>,
    on_select: Box<dyn Fn(Location)>,
}

impl LocationSource {
    pub fn new(session: Rc<SessionHandle>, on_select: impl Fn(Location) + 'static) -> Self {
        Self {
            session,
            on_select: Box::new(on_select),
        }
    }
}

impl DropdownSource for LocationSource {
    type Item = Location;

    const NAME: &'static str = "find location";

    async fn lookup(&self, zip_code: String) -> Result<Vec<Location>, ApiError> {
        ApiClient::find_locations(&self.session.token(), zip_code.trim()).await
    }

    fn render(&self, item: &Location) -> Option<String> {
        Some(render_location(item))
    }

    fn select(&self, _event: &Event, item: &Element) {
        match location_from_data_object(&element_to_data_object(item)) {
            Some(location) => (self.on_select)(location),
            None => web_sys::console::warn_1(&"location item is missing its data attributes".into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_object::attributes_to_data_object;

    #[test]
    fn rendered_attributes_round_trip() {
        let location = Location {
            name: "Fred Meyer - Burlingame".into(),
            location_id: "70100023".into(),
        };
        let html = render_location(&location);
        assert!(html.contains(r#"data-location-id="70100023""#));

        let data = attributes_to_data_object([
            ("class", DROPDOWN_ITEM_CLASS),
            ("data-location-name", location.name.as_str()),
            ("data-location-id", location.location_id.as_str()),
        ]);
        assert_eq!(location_from_data_object(&data), Some(location));
    }

    #[test]
    fn missing_attributes() {
        let data = attributes_to_data_object([("data-location-name", "Main St")]);
        assert_eq!(location_from_data_object(&data), None);
    }
}
