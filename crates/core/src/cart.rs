//! Cart
//!
//! The cart quantity engine: an insertion-ordered list of product lines, each
//! with a quantity of at least one. Every mutation writes the full line list
//! back through the injected [`KeyValueStore`] after the in-memory update.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    products::{Product, ProductId},
    store::{KeyValueStore, StoreError},
};

/// Storage key the cart is persisted under.
pub const CART_STORAGE_KEY: &str = "cart";

/// Errors related to loading or persisting the cart.
#[derive(Debug, Error)]
pub enum CartError {
    /// The store failed to read or write.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The persisted cart could not be decoded.
    #[error("stored cart is corrupt")]
    Corrupt(#[source] serde_json::Error),

    /// The cart could not be encoded for storage.
    #[error("failed to encode cart")]
    Encode(#[source] serde_json::Error),
}

/// The effect a quantity operation had on a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineChange {
    /// A new line was inserted with quantity 1.
    Added,

    /// An existing line's quantity went up to the given value.
    Incremented(u32),

    /// An existing line's quantity went down to the given value.
    Decremented(u32),

    /// The line was removed.
    Removed,

    /// Nothing changed (unknown line, or quantity already at its limit).
    Unchanged,
}

impl LineChange {
    /// Whether the operation mutated anything.
    pub const fn is_change(self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// A product in the cart with its quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// The product, with its unit price frozen at the time it was added.
    #[serde(flatten)]
    pub product: Product,

    /// Quantity, never below one while the line exists.
    pub quantity: u32,
}

impl CartLine {
    /// Unit price multiplied by quantity.
    pub fn line_total(&self) -> u64 {
        self.product.price.saturating_mul(u64::from(self.quantity))
    }
}

/// Cart
#[derive(Debug)]
pub struct Cart<S: KeyValueStore> {
    lines: Vec<CartLine>,
    store: S,
}

impl<S: KeyValueStore> Cart<S> {
    /// Load the cart persisted in `store`, or start empty.
    ///
    /// Lines with a zero quantity are dropped and duplicate product ids are
    /// merged, so a hand-edited store cannot break the quantity invariant.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if the store cannot be read or holds data that
    /// is not a cart.
    pub fn load(store: S) -> Result<Self, CartError> {
        let stored: Vec<CartLine> = match store.get(CART_STORAGE_KEY)? {
            Some(json) if !json.trim().is_empty() => {
                serde_json::from_str(&json).map_err(CartError::Corrupt)?
            }
            _ => Vec::new(),
        };

        let mut lines: Vec<CartLine> = Vec::with_capacity(stored.len());

        for line in stored.into_iter().filter(|line| line.quantity > 0) {
            match lines.iter_mut().find(|l| l.product.id == line.product.id) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(line.quantity);
                }
                None => lines.push(line),
            }
        }

        Ok(Self { lines, store })
    }

    /// Add one of `product`, inserting a new line at quantity 1 if absent.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if persisting fails; the in-memory cart keeps
    /// the change.
    pub fn add_or_increment(&mut self, product: Product) -> Result<LineChange, CartError> {
        let change = match self.position(product.id) {
            Some(index) => match self.lines.get_mut(index) {
                Some(line) => match line.quantity.checked_add(1) {
                    Some(quantity) => {
                        line.quantity = quantity;
                        LineChange::Incremented(quantity)
                    }
                    None => LineChange::Unchanged,
                },
                None => LineChange::Unchanged,
            },
            None => {
                self.lines.push(CartLine {
                    product,
                    quantity: 1,
                });
                LineChange::Added
            }
        };

        self.persist_if(change)
    }

    /// Take one away from the line for `product_id`. A line at quantity 1 is
    /// removed rather than dropping to zero; unknown ids are left alone.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if persisting fails.
    pub fn decrement(&mut self, product_id: ProductId) -> Result<LineChange, CartError> {
        let Some(index) = self.position(product_id) else {
            return Ok(LineChange::Unchanged);
        };

        let change = match self.lines.get_mut(index) {
            Some(line) if line.quantity > 1 => {
                line.quantity -= 1;
                LineChange::Decremented(line.quantity)
            }
            _ => {
                self.lines.remove(index);
                LineChange::Removed
            }
        };

        self.persist_if(change)
    }

    /// Remove the line for `product_id` regardless of its quantity.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if persisting fails.
    pub fn remove(&mut self, product_id: ProductId) -> Result<LineChange, CartError> {
        let change = match self.position(product_id) {
            Some(index) => {
                self.lines.remove(index);
                LineChange::Removed
            }
            None => LineChange::Unchanged,
        };

        self.persist_if(change)
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if persisting fails.
    pub fn clear(&mut self) -> Result<(), CartError> {
        self.lines.clear();
        self.persist()
    }

    /// Line total for `product_id`, if it is in the cart.
    pub fn line_total(&self, product_id: ProductId) -> Option<u64> {
        self.get(product_id).map(CartLine::line_total)
    }

    /// Sum of all line totals.
    pub fn total(&self) -> u64 {
        self.lines
            .iter()
            .map(CartLine::line_total)
            .fold(0, u64::saturating_add)
    }

    /// Total number of units across all lines.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// The line for `product_id`.
    pub fn get(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product.id == product_id)
    }

    /// All lines, in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    fn position(&self, product_id: ProductId) -> Option<usize> {
        self.lines
            .iter()
            .position(|line| line.product.id == product_id)
    }

    fn persist_if(&mut self, change: LineChange) -> Result<LineChange, CartError> {
        if change.is_change() {
            self.persist()?;
        }

        Ok(change)
    }

    fn persist(&mut self) -> Result<(), CartError> {
        let json = serde_json::to_string(&self.lines).map_err(CartError::Encode)?;

        self.store.set(CART_STORAGE_KEY, json)?;

        Ok(())
    }
}
