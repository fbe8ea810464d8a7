//! Validate a catalog file before using it.
//!
//! Reports every problem found instead of stopping at the first one.

use std::io::Write;
use std::path::Path;

use toko_core::catalog;
use tracing::{error, info, instrument};

use crate::catalog_file;

/// Check a catalog file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or if any product
/// fails validation.
#[instrument(skip(path, out), fields(path = %path.display()))]
pub fn run(path: &Path, out: &mut impl Write) -> Result<(), Box<dyn std::error::Error>> {
    info!("Loading catalog for validation");
    let products = catalog_file::read_products(path)?;

    let issues = catalog::validate(&products);
    if !issues.is_empty() {
        error!("Catalog validation failed:");
        for issue in &issues {
            error!("  - {issue}");
            writeln!(out, "error: {issue}")?;
        }
        return Err(format!("{} validation errors found", issues.len()).into());
    }

    writeln!(out, "ok: {} products", products.len())?;
    info!(products = products.len(), "Catalog validated successfully");
    Ok(())
}
