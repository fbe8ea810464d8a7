//! List the catalog through the search, category and sort controls.

use std::io::Write;

use toko_core::{Catalog, CategoryFilter, FilterCriteria, SortKey, visible_products};
use tracing::{debug, instrument};

use crate::render;

/// Print the visible products for the given criteria.
///
/// `category` is parsed like the category menu (`Semua` or a category
/// label); `sort` falls back to catalog order when unrecognized.
///
/// # Errors
///
/// Returns an error if the category is unknown or writing fails.
#[instrument(skip(catalog, out))]
pub fn list(
    catalog: &Catalog,
    query: Option<&str>,
    category: Option<&str>,
    sort: SortKey,
    json: bool,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let category = category
        .map(str::parse::<CategoryFilter>)
        .transpose()?
        .unwrap_or_default();
    let criteria = FilterCriteria::new(query.unwrap_or_default(), category, sort);

    let visible = visible_products(catalog, &criteria);
    debug!(visible = visible.len(), "Filtered catalog");

    if json {
        render::products_json(out, &visible)?;
    } else {
        render::products(out, &criteria, &visible)?;
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_list_with_category_and_sort() {
        let catalog = Catalog::builtin();
        let mut out = Vec::new();
        list(
            &catalog,
            None,
            Some("aksesoris"),
            SortKey::PriceAsc,
            false,
            &mut out,
        )
        .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("2 produk (kategori: Aksesoris, urutan: harga-asc)"));
        let bag = text.find("Tas Selempang Canvas").unwrap();
        let watch = text.find("Jam Tangan Minimalis").unwrap();
        assert!(bag < watch);
    }

    #[test]
    fn test_list_unknown_category_fails() {
        let catalog = Catalog::builtin();
        let mut out = Vec::new();
        let result = list(
            &catalog,
            None,
            Some("Furniture"),
            SortKey::Newest,
            false,
            &mut out,
        );
        assert!(result.is_err());
        assert!(out.is_empty());
    }

    #[test]
    fn test_list_no_match() {
        let catalog = Catalog::builtin();
        let mut out = Vec::new();
        list(&catalog, Some("zz"), None, SortKey::Newest, true, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap().trim(), "[]");
    }
}
