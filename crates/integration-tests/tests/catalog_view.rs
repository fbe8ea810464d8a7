//! Integration tests for the catalog view model over file-loaded catalogs.

use toko_cli::catalog_file::load_catalog;
use toko_core::{Catalog, Category, CategoryFilter, FilterCriteria, SortKey, visible_products};
use toko_integration_tests::fixture;

fn fixture_catalog() -> Catalog {
    load_catalog(&fixture("catalog.yaml")).expect("fixture catalog loads")
}

fn visible_ids(catalog: &Catalog, criteria: &FilterCriteria) -> Vec<String> {
    visible_products(catalog, criteria)
        .iter()
        .map(|p| p.id.to_string())
        .collect()
}

// =============================================================================
// Loading
// =============================================================================

#[test]
fn test_yaml_and_json_fixtures_load() {
    let yaml = fixture_catalog();
    assert_eq!(yaml.len(), 4);
    assert_eq!(
        yaml.get("D").and_then(|p| p.image.as_deref()),
        Some("https://picsum.photos/seed/night-serum/800/800")
    );

    let json = load_catalog(&fixture("catalog.json")).expect("json fixture loads");
    assert_eq!(json.len(), 2);
    assert_eq!(json.get("B").map(|p| p.category), Some(Category::Gadget));
}

#[test]
fn test_duplicate_ids_are_rejected_on_load() {
    let err = load_catalog(&fixture("invalid_catalog.yaml")).expect_err("duplicate ids");
    assert!(err.to_string().contains("duplicate product id: A"));
}

// =============================================================================
// Filtering
// =============================================================================

#[test]
fn test_every_visible_product_matches_criteria() {
    let catalog = fixture_catalog();
    for category in CategoryFilter::options() {
        for query in ["", "produk", "PRODUK", "a", "serum", "zz"] {
            let criteria = FilterCriteria::new(query, category, SortKey::Newest);
            let visible = visible_products(&catalog, &criteria);
            for product in visible.iter() {
                assert!(category.matches(product.category));
                assert!(
                    product
                        .name
                        .to_lowercase()
                        .contains(&query.to_lowercase())
                );
            }
            let expected = catalog.iter().filter(|p| criteria.matches(p)).count();
            assert_eq!(visible.len(), expected);
        }
    }
}

#[test]
fn test_no_match_returns_empty_list() {
    let catalog = fixture_catalog();
    let criteria = FilterCriteria::new("zz", CategoryFilter::All, SortKey::Newest);
    assert!(visible_ids(&catalog, &criteria).is_empty());
}

#[test]
fn test_category_only() {
    let catalog = fixture_catalog();
    let criteria = FilterCriteria::new("", Category::Fashion.into(), SortKey::Newest);
    assert_eq!(visible_ids(&catalog, &criteria), vec!["A", "C"]);
}

// =============================================================================
// Sorting
// =============================================================================

#[test]
fn test_price_ascending_keeps_ties_in_catalog_order() {
    let catalog = fixture_catalog();
    let criteria = FilterCriteria::new("", CategoryFilter::All, SortKey::PriceAsc);
    assert_eq!(visible_ids(&catalog, &criteria), vec!["A", "C", "D", "B"]);
}

#[test]
fn test_price_descending_keeps_ties_in_catalog_order() {
    let catalog = fixture_catalog();
    let criteria = FilterCriteria::new("", CategoryFilter::All, SortKey::PriceDesc);
    assert_eq!(visible_ids(&catalog, &criteria), vec!["B", "D", "A", "C"]);
}

#[test]
fn test_rating_descending_keeps_ties_in_catalog_order() {
    let catalog = fixture_catalog();
    let criteria = FilterCriteria::new("", CategoryFilter::All, SortKey::RatingDesc);
    assert_eq!(visible_ids(&catalog, &criteria), vec!["B", "C", "A", "D"]);
}

#[test]
fn test_unknown_sort_label_uses_catalog_order() {
    let catalog = fixture_catalog();
    let criteria = FilterCriteria::new(
        "",
        CategoryFilter::All,
        SortKey::parse_lenient("most-popular"),
    );
    assert_eq!(visible_ids(&catalog, &criteria), vec!["A", "B", "C", "D"]);
}
