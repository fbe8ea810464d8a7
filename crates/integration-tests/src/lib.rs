//! Integration tests for Toko.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p toko-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `catalog_view` - Filtering and sorting over file-loaded catalogs
//! - `cart_scenarios` - Cart state machine scenarios
//! - `cli_session` - Scripted sessions and catalog validation through the CLI library

use std::path::PathBuf;

/// Path of a file under `fixtures/`.
#[must_use]
pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(name)
}
