//! The static product catalog.
//!
//! A [`Catalog`] is built once at startup, from the built-in sample data or
//! from a file, and is read-only afterwards. It keeps products in their
//! natural (source) order and indexes them by id.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::types::{Category, Price, ProductId};

/// Errors that can occur when building a [`Catalog`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Two products share an id.
    #[error("duplicate product id: {0}")]
    DuplicateProductId(ProductId),
}

/// A product offered by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    /// Average review score, conventionally in `0.0..=5.0`.
    pub rating: f64,
    pub category: Category,
    /// Badges such as "Best Seller" or "Diskon", in source order. A set;
    /// [`validate`] reports repeats.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Product photo URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Immutable, id-indexed product list.
///
/// Deserializes from a plain list of products; duplicate ids are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<Product>", into = "Vec<Product>")]
pub struct Catalog {
    products: Vec<Product>,
    index: HashMap<ProductId, usize>,
}

impl Catalog {
    /// Build a catalog from products in their natural order.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateProductId`] if two products share an id.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(products.len());
        for (pos, product) in products.iter().enumerate() {
            if index.insert(product.id.clone(), pos).is_some() {
                return Err(CatalogError::DuplicateProductId(product.id.clone()));
            }
        }
        Ok(Self { products, index })
    }

    /// The sample catalog the storefront ships with.
    #[must_use]
    pub fn builtin() -> Self {
        let products = builtin_products();
        let index = products
            .iter()
            .enumerate()
            .map(|(pos, product)| (product.id.clone(), pos))
            .collect();
        Self { products, index }
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.index.get(id).and_then(|&pos| self.products.get(pos))
    }

    /// Whether a product with this id exists.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Products in natural order.
    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.products.iter()
    }

    /// Products in natural order, as a slice.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl TryFrom<Vec<Product>> for Catalog {
    type Error = CatalogError;

    fn try_from(products: Vec<Product>) -> Result<Self, Self::Error> {
        Self::new(products)
    }
}

impl From<Catalog> for Vec<Product> {
    fn from(catalog: Catalog) -> Self {
        catalog.products
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.products.iter()
    }
}

// =============================================================================
// Validation
// =============================================================================

/// A problem found in a product list.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CatalogIssue {
    #[error("duplicate product id: {0}")]
    DuplicateId(ProductId),
    #[error("product {0} has an empty name")]
    EmptyName(ProductId),
    #[error("product {id} has rating {rating}, expected 0.0..=5.0")]
    RatingOutOfRange { id: ProductId, rating: f64 },
    #[error("product {id} lists tag {tag:?} more than once")]
    DuplicateTag { id: ProductId, tag: String },
}

/// Check a product list for every known problem.
///
/// Unlike [`Catalog::new`], which stops at the first duplicate id, this
/// collects all issues so a catalog file can be fixed in one pass.
#[must_use]
pub fn validate(products: &[Product]) -> Vec<CatalogIssue> {
    let mut issues = Vec::new();
    let mut seen: HashSet<&str> = HashSet::with_capacity(products.len());

    for product in products {
        if !seen.insert(product.id.as_str()) {
            issues.push(CatalogIssue::DuplicateId(product.id.clone()));
        }
        if product.name.trim().is_empty() {
            issues.push(CatalogIssue::EmptyName(product.id.clone()));
        }
        if !(0.0..=5.0).contains(&product.rating) {
            issues.push(CatalogIssue::RatingOutOfRange {
                id: product.id.clone(),
                rating: product.rating,
            });
        }
        let mut tags: HashSet<&str> = HashSet::with_capacity(product.tags.len());
        for tag in &product.tags {
            if !tags.insert(tag.as_str()) {
                issues.push(CatalogIssue::DuplicateTag {
                    id: product.id.clone(),
                    tag: tag.clone(),
                });
            }
        }
    }

    issues
}

// =============================================================================
// Built-in data
// =============================================================================

fn sample(
    id: &str,
    name: &str,
    price: u64,
    rating: f64,
    category: Category,
    tags: &[&str],
    image_seed: &str,
) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_owned(),
        price: Price::new(price),
        rating,
        category,
        tags: tags.iter().map(|&t| t.to_owned()).collect(),
        image: Some(format!("https://picsum.photos/seed/{image_seed}/800/800")),
    }
}

fn builtin_products() -> Vec<Product> {
    vec![
        sample(
            "p1",
            "Hoodie Essential Oversize",
            199_000,
            4.7,
            Category::Fashion,
            &["Best Seller", "Baru"],
            "hoodie",
        ),
        sample(
            "p2",
            "Earbuds TWS Pro",
            349_000,
            4.5,
            Category::Gadget,
            &["Diskon"],
            "earbuds",
        ),
        sample(
            "p3",
            "Jam Tangan Minimalis",
            289_000,
            4.6,
            Category::Accessories,
            &["Limited"],
            "watch",
        ),
        sample(
            "p4",
            "Serum Vitamin C",
            159_000,
            4.8,
            Category::Beauty,
            &["Terlaris"],
            "serum",
        ),
        sample(
            "p5",
            "Tas Selempang Canvas",
            179_000,
            4.4,
            Category::Accessories,
            &["Baru"],
            "bag",
        ),
        sample(
            "p6",
            "Kaos Basic Premium",
            99_000,
            4.3,
            Category::Fashion,
            &[],
            "tshirt",
        ),
    ]
}
