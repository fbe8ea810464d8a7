//! Shopping cart state machine.
//!
//! The cart is an insertion-ordered map from product id to quantity, so there
//! is at most one entry per product. It references products by id only; the
//! catalog is passed in wherever product data is needed.
//!
//! Only [`Cart::add`] validates against the catalog. Acting on an entry that
//! is not in the cart (increment, decrement, remove) is a no-op, since a UI
//! driven by a stale render can legitimately do that.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::catalog::{Catalog, Product};
use crate::types::{Price, ProductId, Quantity};

/// Errors raised by cart operations.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    /// The product id does not exist in the catalog.
    #[error("invalid product reference: {0}")]
    InvalidProductReference(ProductId),
}

/// One product in the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartEntry<'a> {
    pub product_id: &'a ProductId,
    pub quantity: Quantity,
}

/// The shopper's cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    entries: IndexMap<ProductId, Quantity>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of a product.
    ///
    /// Increments the existing entry, or appends a new entry with quantity 1.
    /// Returns the entry's new quantity.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidProductReference`] if `product_id` is not
    /// in `catalog`. The cart is left unchanged.
    pub fn add(&mut self, catalog: &Catalog, product_id: &str) -> Result<Quantity, CartError> {
        if !catalog.contains(product_id) {
            warn!(product_id, "Rejected add of unknown product");
            return Err(CartError::InvalidProductReference(ProductId::new(
                product_id,
            )));
        }

        let quantity = match self.entries.get_mut(product_id) {
            Some(qty) => {
                *qty = qty.incremented();
                *qty
            }
            None => {
                self.entries.insert(ProductId::new(product_id), Quantity::ONE);
                Quantity::ONE
            }
        };
        debug!(product_id, quantity = quantity.get(), "Added to cart");
        Ok(quantity)
    }

    /// Add one unit to an existing entry. No-op if absent.
    pub fn increment(&mut self, product_id: &str) {
        if let Some(qty) = self.entries.get_mut(product_id) {
            *qty = qty.incremented();
            debug!(product_id, quantity = qty.get(), "Incremented quantity");
        }
    }

    /// Remove one unit from an existing entry, never going below 1.
    /// No-op if absent.
    pub fn decrement(&mut self, product_id: &str) {
        if let Some(qty) = self.entries.get_mut(product_id) {
            *qty = qty.decremented();
            debug!(product_id, quantity = qty.get(), "Decremented quantity");
        }
    }

    /// Delete an entry. No-op if absent. Other entries keep their order.
    pub fn remove(&mut self, product_id: &str) {
        if self.entries.shift_remove(product_id).is_some() {
            debug!(product_id, "Removed from cart");
        }
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.entries.clear();
        debug!("Cleared cart");
    }

    /// Quantity of a product, if it is in the cart.
    #[must_use]
    pub fn quantity(&self, product_id: &str) -> Option<Quantity> {
        self.entries.get(product_id).copied()
    }

    /// Entries in the order they were first added.
    pub fn entries(&self) -> impl Iterator<Item = CartEntry<'_>> {
        self.entries
            .iter()
            .map(|(product_id, &quantity)| CartEntry {
                product_id,
                quantity,
            })
    }

    /// Number of distinct products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total units across all entries (the cart badge count).
    #[must_use]
    pub fn total_item_count(&self) -> u64 {
        self.entries.values().map(|q| u64::from(q.get())).sum()
    }

    /// Join every entry with its product and compute line totals.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidProductReference`] for the first entry whose
    /// product is not in `catalog`, which can only happen when the cart was
    /// filled against a different catalog.
    pub fn detail<'a>(&self, catalog: &'a Catalog) -> Result<CartDetail<'a>, CartError> {
        let lines = self
            .entries
            .iter()
            .map(|(id, &quantity)| {
                let product = catalog
                    .get(id.as_str())
                    .ok_or_else(|| CartError::InvalidProductReference(id.clone()))?;
                Ok(CartLine {
                    product,
                    quantity,
                    line_total: product.price.times(quantity),
                })
            })
            .collect::<Result<Vec<_>, CartError>>()?;
        Ok(CartDetail { lines })
    }
}

/// A cart entry joined with its product.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine<'a> {
    pub product: &'a Product,
    pub quantity: Quantity,
    /// `product.price * quantity`.
    pub line_total: Price,
}

/// The cart joined with the catalog, in cart order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CartDetail<'a> {
    lines: Vec<CartLine<'a>>,
}

impl<'a> CartDetail<'a> {
    #[must_use]
    pub fn lines(&self) -> &[CartLine<'a>] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of all line totals. Zero for an empty cart.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.lines.iter().map(|line| line.line_total).sum()
    }

    /// Sum of all quantities.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines
            .iter()
            .map(|line| u64::from(line.quantity.get()))
            .sum()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::tests::product;
    use crate::types::Category;

    fn ab_catalog() -> Catalog {
        Catalog::new(vec![
            product("A", "Product A", 100, 4.0, Category::Fashion),
            product("B", "Product B", 200, 4.5, Category::Gadget),
            product("C", "Product C", 50, 3.5, Category::Beauty),
        ])
        .unwrap()
    }

    fn snapshot(cart: &Cart) -> Vec<(String, u32)> {
        cart.entries()
            .map(|e| (e.product_id.to_string(), e.quantity.get()))
            .collect()
    }

    #[test]
    fn test_add_twice_yields_single_entry() {
        let catalog = ab_catalog();
        let mut cart = Cart::new();
        assert_eq!(cart.add(&catalog, "A").unwrap().get(), 1);
        assert_eq!(cart.add(&catalog, "A").unwrap().get(), 2);
        assert_eq!(snapshot(&cart), vec![("A".to_string(), 2)]);
    }

    #[test]
    fn test_add_sequence_subtotal() {
        let catalog = ab_catalog();
        let mut cart = Cart::new();
        cart.add(&catalog, "A").unwrap();
        cart.add(&catalog, "B").unwrap();
        cart.add(&catalog, "A").unwrap();

        assert_eq!(
            snapshot(&cart),
            vec![("A".to_string(), 2), ("B".to_string(), 1)]
        );

        let detail = cart.detail(&catalog).unwrap();
        assert_eq!(detail.subtotal(), Price::new(400));
        let totals: Vec<u64> = detail.lines().iter().map(|l| l.line_total.amount()).collect();
        assert_eq!(totals, vec![200, 200]);
    }

    #[test]
    fn test_add_unknown_product_leaves_cart_unchanged() {
        let catalog = ab_catalog();
        let mut cart = Cart::new();
        cart.add(&catalog, "A").unwrap();
        let before = cart.clone();

        let err = cart.add(&catalog, "nonexistent-id").unwrap_err();
        assert_eq!(
            err,
            CartError::InvalidProductReference(ProductId::new("nonexistent-id"))
        );
        assert_eq!(cart, before);
    }

    #[test]
    fn test_decrement_clamps_at_one() {
        let catalog = ab_catalog();
        let mut cart = Cart::new();
        cart.add(&catalog, "A").unwrap();

        cart.decrement("A");
        cart.decrement("A");
        assert_eq!(cart.quantity("A").unwrap().get(), 1);
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_increment_then_decrement() {
        let catalog = ab_catalog();
        let mut cart = Cart::new();
        cart.add(&catalog, "B").unwrap();
        cart.increment("B");
        cart.increment("B");
        assert_eq!(cart.quantity("B").unwrap().get(), 3);
        cart.decrement("B");
        assert_eq!(cart.quantity("B").unwrap().get(), 2);
    }

    #[test]
    fn test_absent_entry_operations_are_noops() {
        let catalog = ab_catalog();
        let mut cart = Cart::new();
        cart.add(&catalog, "A").unwrap();
        let before = cart.clone();

        cart.increment("B");
        cart.decrement("B");
        cart.remove("B");
        cart.increment("nonexistent-id");
        assert_eq!(cart, before);
    }

    #[test]
    fn test_remove_preserves_order_of_rest() {
        let catalog = ab_catalog();
        let mut cart = Cart::new();
        cart.add(&catalog, "A").unwrap();
        cart.add(&catalog, "B").unwrap();
        cart.add(&catalog, "C").unwrap();

        cart.remove("A");
        assert_eq!(
            snapshot(&cart),
            vec![("B".to_string(), 1), ("C".to_string(), 1)]
        );
        assert!(cart.quantity("A").is_none());
    }

    #[test]
    fn test_clear_always_empties() {
        let catalog = ab_catalog();
        let mut cart = Cart::new();
        cart.clear();
        assert!(cart.is_empty());

        cart.add(&catalog, "A").unwrap();
        cart.add(&catalog, "B").unwrap();
        cart.increment("B");
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total_item_count(), 0);
    }

    #[test]
    fn test_total_item_count_sums_quantities() {
        let catalog = ab_catalog();
        let mut cart = Cart::new();
        cart.add(&catalog, "A").unwrap();
        cart.add(&catalog, "A").unwrap();
        cart.add(&catalog, "A").unwrap();
        cart.add(&catalog, "C").unwrap();

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.total_item_count(), 4);
        assert_eq!(cart.detail(&catalog).unwrap().item_count(), 4);
    }

    #[test]
    fn test_empty_cart_subtotal_is_zero() {
        let catalog = ab_catalog();
        let detail = Cart::new().detail(&catalog).unwrap();
        assert!(detail.is_empty());
        assert_eq!(detail.subtotal(), Price::ZERO);
    }

    #[test]
    fn test_detail_against_other_catalog_fails() {
        let catalog = ab_catalog();
        let mut cart = Cart::new();
        cart.add(&catalog, "B").unwrap();

        let other = Catalog::builtin();
        assert_eq!(
            cart.detail(&other).unwrap_err(),
            CartError::InvalidProductReference(ProductId::new("B"))
        );
    }

    #[test]
    fn test_detail_joins_products() {
        let catalog = Catalog::builtin();
        let mut cart = Cart::new();
        cart.add(&catalog, "p4").unwrap();
        cart.add(&catalog, "p6").unwrap();
        cart.increment("p6");

        let detail = cart.detail(&catalog).unwrap();
        let line = detail.lines().get(1).unwrap();
        assert_eq!(line.product.name, "Kaos Basic Premium");
        assert_eq!(line.line_total, Price::new(198_000));
        assert_eq!(detail.subtotal(), Price::new(357_000));
    }

    #[test]
    fn test_serde_keeps_entry_order() {
        let catalog = ab_catalog();
        let mut cart = Cart::new();
        cart.add(&catalog, "B").unwrap();
        cart.add(&catalog, "A").unwrap();
        cart.add(&catalog, "A").unwrap();

        let json = serde_json::to_string(&cart).unwrap();
        assert_eq!(json, r#"{"B":1,"A":2}"#);
        let parsed: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot(&parsed), snapshot(&cart));
    }
}
