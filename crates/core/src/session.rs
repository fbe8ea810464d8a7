//! A single shopper's session: filter criteria plus cart.
//!
//! The presentation layer turns user input into [`Action`]s, applies them one
//! at a time with [`Session::apply`], then calls [`Session::view`] to get the
//! derived state to render.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::cart::{Cart, CartDetail, CartError};
use crate::catalog::Catalog;
use crate::types::{CategoryFilter, Price, ProductId};
use crate::view::{FilterCriteria, SortKey, VisibleProducts, visible_products};

/// A user interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    SetQuery { query: String },
    SetCategory { category: CategoryFilter },
    SetSort { sort: SortKey },
    AddToCart { product_id: ProductId },
    Increment { product_id: ProductId },
    Decrement { product_id: ProductId },
    Remove { product_id: ProductId },
    ClearCart,
    /// The checkout button. Performs no transition.
    Checkout,
}

/// Derived, read-only state for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct View<'a> {
    pub products: VisibleProducts<'a>,
    pub cart: CartDetail<'a>,
    pub subtotal: Price,
    /// Badge count: total units in the cart.
    pub item_count: u64,
}

/// State owned by one shopper.
#[derive(Debug, Clone)]
pub struct Session<'c> {
    catalog: &'c Catalog,
    criteria: FilterCriteria,
    cart: Cart,
}

impl<'c> Session<'c> {
    /// Start a session with default criteria and an empty cart.
    #[must_use]
    pub fn new(catalog: &'c Catalog) -> Self {
        Self::with_criteria(catalog, FilterCriteria::default())
    }

    #[must_use]
    pub fn with_criteria(catalog: &'c Catalog, criteria: FilterCriteria) -> Self {
        Self {
            catalog,
            criteria,
            cart: Cart::new(),
        }
    }

    #[must_use]
    pub const fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    #[must_use]
    pub const fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Apply one action.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidProductReference`] when
    /// [`Action::AddToCart`] names a product outside the catalog. Every other
    /// action is infallible.
    pub fn apply(&mut self, action: Action) -> Result<(), CartError> {
        match action {
            Action::SetQuery { query } => self.criteria.query = query,
            Action::SetCategory { category } => self.criteria.category = category,
            Action::SetSort { sort } => self.criteria.sort = sort,
            Action::AddToCart { product_id } => {
                self.cart.add(self.catalog, product_id.as_str())?;
            }
            Action::Increment { product_id } => self.cart.increment(product_id.as_str()),
            Action::Decrement { product_id } => self.cart.decrement(product_id.as_str()),
            Action::Remove { product_id } => self.cart.remove(product_id.as_str()),
            Action::ClearCart => self.cart.clear(),
            Action::Checkout => {
                info!(
                    items = self.cart.total_item_count(),
                    "Checkout requested; no order flow is attached"
                );
            }
        }
        Ok(())
    }

    /// Recompute the derived views from the current state.
    ///
    /// # Errors
    ///
    /// Cannot fail for a cart built through this session, since every entry
    /// was validated against the same catalog on insert.
    pub fn view(&self) -> Result<View<'c>, CartError> {
        let cart = self.cart.detail(self.catalog)?;
        Ok(View {
            products: visible_products(self.catalog, &self.criteria),
            subtotal: cart.subtotal(),
            item_count: self.cart.total_item_count(),
            cart,
        })
    }
}
