//! Catalog loading from YAML or JSON files.
//!
//! A catalog file is either a bare list of products or a document with a
//! top-level `products` list:
//!
//! ```yaml
//! products:
//!   - id: p1
//!     name: Hoodie Essential Oversize
//!     price: 199000
//!     rating: 4.7
//!     category: Fashion
//!     tags: [Best Seller, Baru]
//! ```

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use toko_core::{Catalog, CatalogError, Product};
use tracing::info;

/// Errors that can occur while loading a catalog file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported catalog format: {0} (expected .yaml, .yml or .json)")]
    UnsupportedFormat(String),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    List(Vec<Product>),
    Document { products: Vec<Product> },
}

impl CatalogFile {
    fn into_products(self) -> Vec<Product> {
        match self {
            Self::List(products) | Self::Document { products } => products,
        }
    }
}

/// Input format of a catalog file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Json,
}

impl Format {
    /// Pick the format from the file extension.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::UnsupportedFormat` for any other extension.
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("yaml" | "yml") => Ok(Self::Yaml),
            Some("json") => Ok(Self::Json),
            _ => Err(LoadError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Parse a product list without enforcing catalog invariants.
///
/// # Errors
///
/// Returns `LoadError` if the content does not parse.
pub fn parse_products(content: &str, format: Format) -> Result<Vec<Product>, LoadError> {
    let file: CatalogFile = match format {
        Format::Yaml => serde_yaml::from_str(content)?,
        Format::Json => serde_json::from_str(content)?,
    };
    Ok(file.into_products())
}

/// Read a product list from a file without enforcing catalog invariants.
///
/// # Errors
///
/// Returns `LoadError` if the file cannot be read or parsed.
pub fn read_products(path: &Path) -> Result<Vec<Product>, LoadError> {
    let format = Format::from_path(path)?;
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_products(&content, format)
}

/// Load a catalog file.
///
/// # Errors
///
/// Returns `LoadError` if the file cannot be read or parsed, or if product
/// ids are not unique.
pub fn load_catalog(path: &Path) -> Result<Catalog, LoadError> {
    let catalog = Catalog::new(read_products(path)?)?;
    info!(path = %path.display(), products = catalog.len(), "Loaded catalog");
    Ok(catalog)
}

/// Load `path` if given, otherwise the built-in catalog.
///
/// # Errors
///
/// Returns `LoadError` if a catalog file was given and fails to load.
pub fn load_or_builtin(path: Option<&Path>) -> Result<Catalog, LoadError> {
    match path {
        Some(path) => load_catalog(path),
        None => {
            let catalog = Catalog::builtin();
            info!(products = catalog.len(), "Using built-in catalog");
            Ok(catalog)
        }
    }
}
