//! crates/ce_storefront_core/src/cart.rs
//!
//! The cart engine: an ordered list of line items mirrored to a `KeyValueStore`
//! after every change. Operations never fail from the caller's point of view.

use crate::domain::{CartLineItem, CartSummary};
use crate::ports::KeyValueStore;
use tracing::{debug, warn};

/// The key the serialized cart is stored under.
pub const CART_STORAGE_KEY: &str = "cart";

pub struct CartEngine<S: KeyValueStore> {
    store: S,
    items: Vec<CartLineItem>,
}

impl<S: KeyValueStore> CartEngine<S> {
    /// Creates an engine, restoring any cart previously saved in `store`.
    ///
    /// A missing, unparseable or empty saved value yields an empty cart. The stored
    /// value is not rewritten until the first change.
    pub fn new(store: S) -> Self {
        let items = load_items(&store);
        Self { store, items }
    }

    /// Appends `item`, or if its id is already present only adopts its `with_textbook`.
    ///
    /// A new item with a non-finite or negative amount is dropped with a warning,
    /// since JSON cannot carry it and the whole saved cart would fail to load.
    pub fn add_to_cart(&mut self, item: CartLineItem) {
        match self.items.iter_mut().find(|line| line.id == item.id) {
            Some(existing) => existing.with_textbook = item.with_textbook,
            None if !item.has_valid_amounts() => {
                warn!("Skipping cart item {} with an invalid amount", item.id);
                return;
            }
            None => self.items.push(item),
        }
        self.persist();
    }

    pub fn remove_from_cart(&mut self, id: &str) {
        self.items.retain(|line| line.id != id);
        self.persist();
    }

    pub fn toggle_textbook(&mut self, id: &str) {
        if let Some(line) = self.items.iter_mut().find(|line| line.id == id) {
            line.with_textbook = !line.with_textbook;
        }
        self.persist();
    }

    pub fn clear_cart(&mut self) {
        self.items.clear();
        self.persist();
    }

    pub fn is_in_cart(&self, id: &str) -> bool {
        self.items.iter().any(|line| line.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&CartLineItem> {
        self.items.iter().find(|line| line.id == id)
    }

    /// Line items in the order they were added.
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Number of distinct line items.
    pub fn cart_count(&self) -> usize {
        self.items.len()
    }

    pub fn cart_total(&self) -> f64 {
        self.items.iter().map(CartLineItem::line_total).sum()
    }

    pub fn total_credit_hours(&self) -> f64 {
        self.items.iter().map(|line| line.credit_hours).sum()
    }

    pub fn summary(&self) -> CartSummary {
        CartSummary {
            count: self.cart_count(),
            total: self.cart_total(),
            credit_hours: self.total_credit_hours(),
        }
    }

    /// Gives back the underlying store, e.g. to hand it to a fresh engine.
    pub fn into_store(self) -> S {
        self.store
    }

    fn persist(&self) {
        let serialized = match serde_json::to_string(&self.items) {
            Ok(s) => s,
            Err(e) => {
                warn!("Failed to serialize cart: {}", e);
                return;
            }
        };
        if let Err(e) = self.store.set(CART_STORAGE_KEY, &serialized) {
            warn!("Failed to save cart: {}", e);
        }
    }
}

fn load_items<S: KeyValueStore>(store: &S) -> Vec<CartLineItem> {
    let Some(raw) = store.get(CART_STORAGE_KEY) else {
        return Vec::new();
    };
    match serde_json::from_str::<Vec<CartLineItem>>(&raw) {
        Ok(items) => items,
        Err(e) => {
            debug!("Ignoring unreadable saved cart: {}", e);
            Vec::new()
        }
    }
}
