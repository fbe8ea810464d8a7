//! Core types for the storefront.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod category;
pub mod id;
pub mod price;
pub mod quantity;

pub use category::{Category, CategoryFilter, ParseCategoryError};
pub use id::ProductId;
pub use price::Price;
pub use quantity::Quantity;
