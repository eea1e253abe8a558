//! Cart state: the backend's cart lines plus a local selection.
//!
//! The selection decides which lines go into the next checkout. It lives
//! only here; the backend never sees it until an order is placed.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use shopdesk_core::{CartItem, CartItemId, Listing, Reducer, failure_message};

/// Cart lines, selection, and request state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartSlice {
    pub items: Vec<CartItem>,
    pub selected: BTreeSet<CartItemId>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Transitions for a [`CartSlice`].
#[derive(Debug, Clone, PartialEq)]
pub enum CartAction {
    Requested,
    /// The cart was fetched; selections for vanished lines are dropped.
    Loaded(Listing<CartItem>),
    /// A line was added or merged into an existing line.
    Added(CartItem),
    /// A line's quantity changed; ignored if the line is not in the cart.
    Updated(CartItem),
    Removed(CartItemId),
    Emptied,
    Failed(String),
    Select(CartItemId),
    Deselect(CartItemId),
    Toggle(CartItemId),
    SelectAll,
    DeselectAll,
}

impl Reducer for CartSlice {
    type Action = CartAction;

    fn requested() -> CartAction {
        CartAction::Requested
    }

    fn failed(message: Option<String>) -> CartAction {
        CartAction::Failed(failure_message(message))
    }

    fn reduce(&mut self, action: CartAction) {
        match action {
            CartAction::Requested => {
                self.loading = true;
                self.error = None;
                return;
            }
            CartAction::Failed(message) => {
                self.loading = false;
                self.error = Some(message);
                return;
            }
            CartAction::Loaded(listing) => {
                self.items = listing.items;
                let present: BTreeSet<_> = self.items.iter().map(|i| i.id.clone()).collect();
                self.selected.retain(|id| present.contains(id));
            }
            CartAction::Added(item) => match self.items.iter_mut().find(|i| i.id == item.id) {
                Some(slot) => *slot = item,
                None => self.items.push(item),
            },
            CartAction::Updated(item) => {
                if let Some(slot) = self.items.iter_mut().find(|i| i.id == item.id) {
                    *slot = item;
                }
            }
            CartAction::Removed(id) => {
                self.items.retain(|i| i.id != id);
                self.selected.remove(&id);
            }
            CartAction::Emptied => {
                self.items.clear();
                self.selected.clear();
            }
            // Selection changes are local and leave request state alone.
            CartAction::Select(id) => {
                if self.contains(&id) {
                    self.selected.insert(id);
                }
                return;
            }
            CartAction::Deselect(id) => {
                self.selected.remove(&id);
                return;
            }
            CartAction::Toggle(id) => {
                if !self.selected.remove(&id) && self.contains(&id) {
                    self.selected.insert(id);
                }
                return;
            }
            CartAction::SelectAll => {
                self.selected = self.items.iter().map(|i| i.id.clone()).collect();
                return;
            }
            CartAction::DeselectAll => {
                self.selected.clear();
                return;
            }
        }
        self.loading = false;
        self.error = None;
    }
}

impl CartSlice {
    fn contains(&self, id: &CartItemId) -> bool {
        self.items.iter().any(|i| &i.id == id)
    }

    /// Whether a line is selected for checkout.
    #[must_use]
    pub fn is_selected(&self, id: &CartItemId) -> bool {
        self.selected.contains(id)
    }

    /// Selected lines, in cart order.
    pub fn selected_items(&self) -> impl Iterator<Item = &CartItem> {
        self.items.iter().filter(|i| self.selected.contains(&i.id))
    }

    /// Ids of the selected lines, in cart order.
    #[must_use]
    pub fn selected_ids(&self) -> Vec<CartItemId> {
        self.selected_items().map(|i| i.id.clone()).collect()
    }

    /// Sum of line totals over the selected lines.
    #[must_use]
    pub fn selected_subtotal(&self) -> Decimal {
        self.selected_items().map(CartItem::line_total).sum()
    }

    /// Sum of line totals over every line.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Total quantity across every line.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |total, i| total.saturating_add(i.quantity))
    }

    /// Return to the initial state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use shopdesk_core::{Extra, ProductId, Related};

    use super::*;

    fn line(id: &str, price: Decimal, quantity: u32) -> CartItem {
        CartItem {
            id: CartItemId::new(id),
            product: Related::Id(ProductId::new(format!("p-{id}"))),
            variant: None,
            quantity,
            price,
            extra: Extra::new(),
        }
    }

    fn loaded() -> CartSlice {
        let mut cart = CartSlice::default();
        cart.reduce(CartAction::Loaded(Listing::new(vec![
            line("a", Decimal::from(100), 2),
            line("b", Decimal::new(4950, 2), 1),
            line("c", Decimal::from(10), 3),
        ])));
        cart
    }

    #[test]
    fn test_selected_subtotal() {
        let mut cart = loaded();
        cart.reduce(CartAction::Select(CartItemId::new("a")));
        cart.reduce(CartAction::Select(CartItemId::new("b")));
        assert_eq!(cart.selected_subtotal(), Decimal::new(24950, 2));
        assert_eq!(cart.subtotal(), Decimal::new(27950, 2));
        assert_eq!(cart.item_count(), 6);
    }

    #[test]
    fn test_toggle_and_select_all() {
        let mut cart = loaded();
        cart.reduce(CartAction::Toggle(CartItemId::new("c")));
        assert!(cart.is_selected(&CartItemId::new("c")));
        cart.reduce(CartAction::Toggle(CartItemId::new("c")));
        assert!(!cart.is_selected(&CartItemId::new("c")));

        cart.reduce(CartAction::SelectAll);
        assert_eq!(cart.selected.len(), 3);
        cart.reduce(CartAction::DeselectAll);
        assert!(cart.selected.is_empty());
    }

    #[test]
    fn test_unknown_line_cannot_be_selected() {
        let mut cart = loaded();
        cart.reduce(CartAction::Select(CartItemId::new("zzz")));
        cart.reduce(CartAction::Toggle(CartItemId::new("zzz")));
        assert!(cart.selected.is_empty());
    }

    #[test]
    fn test_reload_drops_stale_selection() {
        let mut cart = loaded();
        cart.reduce(CartAction::SelectAll);
        cart.reduce(CartAction::Loaded(Listing::new(vec![line("b", Decimal::new(4950, 2), 1)])));
        assert_eq!(cart.selected_ids(), vec![CartItemId::new("b")]);
    }

    #[test]
    fn test_added_merges_existing_line() {
        let mut cart = loaded();
        cart.reduce(CartAction::Added(line("a", Decimal::from(100), 5)));
        cart.reduce(CartAction::Added(line("d", Decimal::from(1), 1)));
        assert_eq!(cart.items.len(), 4);
        assert_eq!(cart.items.first().unwrap().quantity, 5);
    }

    #[test]
    fn test_update_unknown_line_is_noop() {
        let mut cart = loaded();
        cart.reduce(CartAction::Requested);
        cart.reduce(CartAction::Updated(line("ghost", Decimal::from(5), 3)));
        let ids: Vec<_> = cart.items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert!(!cart.loading);

        cart.reduce(CartAction::Updated(line("b", Decimal::new(4950, 2), 4)));
        assert_eq!(cart.items.get(1).unwrap().quantity, 4);
    }

    #[test]
    fn test_item_count_saturates() {
        let mut cart = CartSlice::default();
        cart.reduce(CartAction::Loaded(Listing::new(vec![
            line("a", Decimal::ONE, u32::MAX),
            line("b", Decimal::ONE, 2),
        ])));
        assert_eq!(cart.item_count(), u32::MAX);
    }

    #[test]
    fn test_remove_deselects() {
        let mut cart = loaded();
        cart.reduce(CartAction::SelectAll);
        cart.reduce(CartAction::Requested);
        cart.reduce(CartAction::Removed(CartItemId::new("a")));
        assert!(!cart.loading);
        assert!(!cart.is_selected(&CartItemId::new("a")));
        assert_eq!(cart.items.len(), 2);
    }

    #[test]
    fn test_failure_keeps_lines() {
        let mut cart = loaded();
        cart.reduce(CartSlice::requested());
        cart.reduce(CartSlice::failed(None));
        assert_eq!(cart.items.len(), 3);
        assert_eq!(cart.error.as_deref(), Some(shopdesk_core::FALLBACK_ERROR));
    }
}
