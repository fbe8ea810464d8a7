//! Toko Core - catalog and cart logic for the Toko storefront.
//!
//! This crate holds everything the storefront computes, independent of how
//! it is presented:
//! - the static product [`Catalog`]
//! - the catalog view model ([`visible_products`]), which filters by search
//!   text and category and sorts by price or rating
//! - the [`Cart`] state machine with line totals and subtotal
//! - a [`Session`] reducer that applies one [`Action`] at a time
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no global
//! state. The catalog is loaded once by the caller and passed in by
//! reference.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product ids, prices, quantities, and categories
//! - [`catalog`] - Products and the id-indexed catalog
//! - [`view`] - Filter criteria and the visible product list
//! - [`cart`] - Cart operations and derived totals
//! - [`session`] - Per-shopper state and actions

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod session;
pub mod types;
pub mod view;

pub use cart::{Cart, CartDetail, CartEntry, CartError, CartLine};
pub use catalog::{Catalog, CatalogError, CatalogIssue, Product};
pub use session::{Action, Session, View};
pub use types::*;
pub use view::{FilterCriteria, SortKey, VisibleProducts, visible_products};
