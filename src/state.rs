//! In-memory grocery list.
//!
//! Every mutation reports what changed as a [`ListChange`] so the view can
//! patch the DOM instead of rebuilding it.  Indices handed out by the list are
//! only valid until the next mutation.

use crate::models::{format_usd, Product};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListChange {
    /// One entry appended at `index`.
    Appended(usize),
    /// The entry at `index` was removed; later entries shifted down by one.
    Removed(usize),
    Cleared,
    /// Contents swapped wholesale (e.g. loaded from the backend).
    Replaced,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroceryList {
    items: Vec<Product>,
}

impl GroceryList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: Vec<Product>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[Product] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append without dedup or validation.
    pub fn add(&mut self, item: Product) -> ListChange {
        self.items.push(item);
        ListChange::Appended(self.items.len() - 1)
    }

    /// Remove the first entry structurally equal to `item`.  An item that is
    /// not on the list leaves it untouched.
    pub fn remove(&mut self, item: &Product) -> Option<ListChange> {
        let index = self.items.iter().position(|entry| entry == item)?;
        self.remove_at(index)
    }

    pub fn remove_at(&mut self, index: usize) -> Option<ListChange> {
        if index >= self.items.len() {
            return None;
        }
        self.items.remove(index);
        Some(ListChange::Removed(index))
    }

    pub fn clear(&mut self) -> ListChange {
        self.items.clear();
        ListChange::Cleared
    }

    pub fn replace(&mut self, items: Vec<Product>) -> ListChange {
        self.items = items;
        ListChange::Replaced
    }

    /// Sum of all prices.  Prices that failed to parse were stored as zero.
    ///
    /// Folds from `+0.0`: `Sum for f64` starts at `-0.0`, which would print
    /// an empty list as `$-0.00`.
    pub fn total(&self) -> f64 {
        self.items.iter().fold(0.0, |acc, item| acc + item.price)
    }

    pub fn formatted_total(&self) -> String {
        format_usd(self.total())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn product(id: &str, price: f64) -> Product {
        Product {
            description: format!("item {}", id),
            size: "1 ct".into(),
            price,
            thumbnail: format!("https://img/{}.jpg", id),
            product_id: id.into(),
        }
    }

    #[test]
    fn add_and_total() {
        let mut list = GroceryList::new();
        assert_eq!(list.add(product("a", 1.25)), ListChange::Appended(0));
        assert_eq!(list.add(product("b", 2.0)), ListChange::Appended(1));
        assert_eq!(list.len(), 2);
        assert_eq!(list.formatted_total(), "$3.25");
    }

    #[test]
    fn duplicates_are_kept_and_removed_one_at_a_time() {
        let mut list = GroceryList::new();
        let milk = product("milk", 3.0);
        list.add(milk.clone());
        list.add(product("eggs", 2.0));
        list.add(milk.clone());

        assert_eq!(list.remove(&milk), Some(ListChange::Removed(0)));
        assert_eq!(list.items()[0].product_id, "eggs");
        assert_eq!(list.items()[1], milk);
    }

    #[test]
    fn removing_missing_item_is_a_noop() {
        let mut list = GroceryList::from_items(vec![product("a", 1.0), product("b", 2.0)]);
        assert_eq!(list.remove(&product("zzz", 9.0)), None);
        assert_eq!(list.len(), 2);
        assert_eq!(list.items()[1].product_id, "b");
    }

    #[test]
    fn remove_at_out_of_range() {
        let mut list = GroceryList::from_items(vec![product("a", 1.0)]);
        assert_eq!(list.remove_at(1), None);
        assert_eq!(list.remove_at(0), Some(ListChange::Removed(0)));
        assert!(list.is_empty());
    }

    #[test]
    fn empty_list_total() {
        let mut list = GroceryList::from_items(vec![product("a", 4.0)]);
        assert_eq!(list.clear(), ListChange::Cleared);
        assert_eq!(list.formatted_total(), "$0.00");
    }

    #[test]
    fn new_list_total_is_positive_zero() {
        let list = GroceryList::new();
        assert!(list.total().is_sign_positive());
        assert_eq!(list.formatted_total(), "$0.00");
    }

    #[test]
    fn removing_last_item_resets_total() {
        let mut list = GroceryList::new();
        let eggs = product("eggs", 2.5);
        list.add(eggs.clone());
        list.remove(&eggs);
        assert_eq!(list.formatted_total(), "$0.00");
    }

    #[derive(Debug, Clone)]
    enum Op {
        Add(u8, u16),
        Remove(u8, u16),
        RemoveAt(usize),
        Clear,
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            4 => (0u8..5, 0u16..1000).prop_map(|(id, cents)| Op::Add(id, cents)),
            2 => (0u8..5, 0u16..1000).prop_map(|(id, cents)| Op::Remove(id, cents)),
            2 => (0usize..8).prop_map(Op::RemoveAt),
            1 => Just(Op::Clear),
        ]
    }

    fn priced(id: u8, cents: u16) -> Product {
        product(&id.to_string(), f64::from(cents) / 100.0)
    }

    proptest! {
        #[test]
        fn length_and_total_follow_a_reference_model(ops in prop::collection::vec(op_strategy(), 0..40)) {
            let mut list = GroceryList::new();
            let mut model: Vec<Product> = Vec::new();

            for op in ops {
                match op {
                    Op::Add(id, cents) => {
                        list.add(priced(id, cents));
                        model.push(priced(id, cents));
                    }
                    Op::Remove(id, cents) => {
                        let target = priced(id, cents);
                        let change = list.remove(&target);
                        match model.iter().position(|p| *p == target) {
                            Some(i) => {
                                model.remove(i);
                                prop_assert_eq!(change, Some(ListChange::Removed(i)));
                            }
                            None => prop_assert_eq!(change, None),
                        }
                    }
                    Op::RemoveAt(i) => {
                        let change = list.remove_at(i);
                        if i < model.len() {
                            model.remove(i);
                            prop_assert_eq!(change, Some(ListChange::Removed(i)));
                        } else {
                            prop_assert_eq!(change, None);
                        }
                    }
                    Op::Clear => {
                        list.clear();
                        model.clear();
                    }
                }

                prop_assert_eq!(list.len(), model.len());
                let expected = model.iter().fold(0.0, |acc, p| acc + p.price);
                prop_assert!((list.total() - expected).abs() < 1e-9);
                prop_assert_eq!(list.formatted_total(), format!("${:.2}", expected));
            }
        }
    }
}
