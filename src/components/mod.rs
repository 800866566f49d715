pub mod grocery_list;
pub mod location_picker;
pub mod product_search;
pub mod search_dropdown;
pub mod visibility;

pub use grocery_list::GroceryListView;
pub use search_dropdown::{DropdownSource, SearchDropdown};
pub use visibility::VisibilityController;
