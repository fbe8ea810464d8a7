//! Product categories and the category selector.
//!
//! The category set is fixed. Labels are the storefront's Indonesian names;
//! parsing is case-insensitive and also accepts English aliases.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when a label names no known category.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown category: {0}")]
pub struct ParseCategoryError(pub String);

/// A product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Fashion,
    Gadget,
    /// Accessories.
    #[serde(rename = "Aksesoris", alias = "Accessories")]
    Accessories,
    /// Beauty and skincare.
    #[serde(rename = "Kecantikan", alias = "Beauty")]
    Beauty,
}

impl Category {
    /// Every category, in menu order.
    pub const ALL: [Self; 4] = [Self::Fashion, Self::Gadget, Self::Accessories, Self::Beauty];

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Fashion => "Fashion",
            Self::Gadget => "Gadget",
            Self::Accessories => "Aksesoris",
            Self::Beauty => "Kecantikan",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl std::str::FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fashion" => Ok(Self::Fashion),
            "gadget" => Ok(Self::Gadget),
            "aksesoris" | "accessories" => Ok(Self::Accessories),
            "kecantikan" | "beauty" => Ok(Self::Beauty),
            _ => Err(ParseCategoryError(s.to_owned())),
        }
    }
}

/// Category selector of the catalog filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CategoryFilter {
    /// No category restriction ("Semua").
    #[default]
    All,
    /// Only products of this category.
    Only(Category),
}

impl CategoryFilter {
    /// Label of the "all categories" entry.
    pub const ALL_LABEL: &'static str = "Semua";

    /// Whether a product of `category` passes this selector.
    #[must_use]
    pub fn matches(self, category: Category) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == category,
        }
    }

    /// Menu entries: the "all" sentinel followed by every category.
    pub fn options() -> impl Iterator<Item = Self> {
        std::iter::once(Self::All).chain(Category::ALL.into_iter().map(Self::Only))
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.pad(Self::ALL_LABEL),
            Self::Only(category) => fmt::Display::fmt(category, f),
        }
    }
}

impl std::str::FromStr for CategoryFilter {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case(Self::ALL_LABEL) || trimmed.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        trimmed.parse().map(Self::Only)
    }
}

impl From<Category> for CategoryFilter {
    fn from(category: Category) -> Self {
        Self::Only(category)
    }
}

impl TryFrom<String> for CategoryFilter {
    type Error = ParseCategoryError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<CategoryFilter> for String {
    fn from(filter: CategoryFilter) -> Self {
        filter.to_string()
    }
}
