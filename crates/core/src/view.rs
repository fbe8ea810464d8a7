//! Catalog view model: the filtered, sorted product list shown to the shopper.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, Product};
use crate::types::CategoryFilter;

/// Ordering of the visible product list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SortKey {
    /// Catalog order ("terbaru").
    #[default]
    Newest,
    /// Cheapest first ("harga-asc").
    PriceAsc,
    /// Most expensive first ("harga-desc").
    PriceDesc,
    /// Best rated first ("rating").
    RatingDesc,
}

impl SortKey {
    /// Every sort key, in menu order.
    pub const ALL: [Self; 4] = [Self::Newest, Self::PriceAsc, Self::PriceDesc, Self::RatingDesc];

    /// Parse a sort label. Unknown labels fall back to [`SortKey::Newest`].
    #[must_use]
    pub fn parse_lenient(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "harga-asc" | "price-asc" | "price" => Self::PriceAsc,
            "harga-desc" | "price-desc" => Self::PriceDesc,
            "rating" | "rating-desc" => Self::RatingDesc,
            _ => Self::Newest,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Newest => "terbaru",
            Self::PriceAsc => "harga-asc",
            Self::PriceDesc => "harga-desc",
            Self::RatingDesc => "rating",
        }
    }

    fn sort(self, products: &mut [&Product]) {
        // slice::sort_by is stable, so ties keep catalog order.
        match self {
            Self::Newest => {}
            Self::PriceAsc => products.sort_by_key(|p| p.price),
            Self::PriceDesc => products.sort_by(|a, b| b.price.cmp(&a.price)),
            Self::RatingDesc => products.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl From<String> for SortKey {
    fn from(s: String) -> Self {
        Self::parse_lenient(&s)
    }
}

impl From<&str> for SortKey {
    fn from(s: &str) -> Self {
        Self::parse_lenient(s)
    }
}

impl From<SortKey> for String {
    fn from(key: SortKey) -> Self {
        key.label().to_owned()
    }
}

/// Search, category and sort state of the catalog controls.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    /// Case-insensitive substring of the product name. Empty matches all.
    pub query: String,
    pub category: CategoryFilter,
    pub sort: SortKey,
}

impl FilterCriteria {
    #[must_use]
    pub fn new(query: impl Into<String>, category: CategoryFilter, sort: SortKey) -> Self {
        Self {
            query: query.into(),
            category,
            sort,
        }
    }

    /// Whether `product` passes the category and query filters.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        self.category.matches(product.category) && name_contains(&product.name, &self.query)
    }
}

fn name_contains(name: &str, query: &str) -> bool {
    query.is_empty() || name.to_lowercase().contains(&query.to_lowercase())
}

/// The product list after filtering and sorting.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibleProducts<'a> {
    products: Vec<&'a Product>,
}

impl<'a> VisibleProducts<'a> {
    /// Number of visible products (the "N produk" counter).
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Product> + '_ {
        self.products.iter().copied()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[&'a Product] {
        &self.products
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<&'a Product> {
        self.products
    }
}

impl<'a> IntoIterator for VisibleProducts<'a> {
    type Item = &'a Product;
    type IntoIter = std::vec::IntoIter<&'a Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.products.into_iter()
    }
}

/// Filter and sort the catalog for display.
///
/// Pure function of its inputs; never fails. Products whose sort keys tie
/// keep their relative catalog order.
#[must_use]
pub fn visible_products<'a>(catalog: &'a Catalog, criteria: &FilterCriteria) -> VisibleProducts<'a> {
    let mut products: Vec<&Product> = catalog.iter().filter(|p| criteria.matches(p)).collect();
    criteria.sort.sort(&mut products);
    VisibleProducts { products }
}
