//! Product and category query integration tests against in-memory sample data.

mod common;

use pricecompare_sdk::queries::{CategoryQuery, ProductQuery};

// ---------------------------------------------------------------------------
// get
// ---------------------------------------------------------------------------

#[test]
fn get_by_id_finds_product() {
    let (conn, _tmp) = common::setup_sample_db();
    let pq = ProductQuery::new(&conn);

    let product = pq.get("p-001").unwrap().unwrap();
    assert_eq!(product.name, "Galaxy S24 Ultra");
    assert_eq!(product.category, "Mobiles");
    assert!(product.is_trending);
    assert_eq!(product.rating, 4.6);
}

#[test]
fn get_returns_none_for_unknown_id() {
    let (conn, _tmp) = common::setup_sample_db();
    let pq = ProductQuery::new(&conn);

    assert!(pq.get("p-404").unwrap().is_none());
}

#[test]
fn missing_description_is_none() {
    let (conn, _tmp) = common::setup_sample_db();
    let pq = ProductQuery::new(&conn);

    let product = pq.get("p-004").unwrap().unwrap();
    assert!(product.description.is_none());
}

// ---------------------------------------------------------------------------
// list / newest
// ---------------------------------------------------------------------------

#[test]
fn list_returns_all_products_by_name() {
    let (conn, _tmp) = common::setup_sample_db();
    let pq = ProductQuery::new(&conn);

    let products = pq.list().unwrap();
    assert_eq!(products.len(), 5);
    assert_eq!(products[0].name, "Galaxy S24 Ultra");
    assert_eq!(products[1].name, "Nike Air Max 90");
}

#[test]
fn newest_orders_by_creation_desc() {
    let (conn, _tmp) = common::setup_sample_db();
    let pq = ProductQuery::new(&conn);

    let ids: Vec<String> = pq.newest().unwrap().into_iter().map(|p| p.id).collect();
    assert_eq!(ids, vec!["p-004", "p-001", "p-002", "p-003", "p-005"]);
}

// ---------------------------------------------------------------------------
// search
// ---------------------------------------------------------------------------

#[test]
fn search_matches_substring_ignoring_case() {
    let (conn, _tmp) = common::setup_sample_db();
    let pq = ProductQuery::new(&conn);

    let results = pq.search("GALAXY").unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, "p-001");

    let results = pq.search("note").unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, "p-005");
}

#[test]
fn search_keeps_surrounding_whitespace() {
    let (conn, _tmp) = common::setup_sample_db();
    let pq = ProductQuery::new(&conn);

    let results = pq.search(" 15").unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, "p-002");

    assert!(pq.search("  iphone  ").unwrap().is_empty());
}

#[test]
fn blank_search_returns_full_listing() {
    let (conn, _tmp) = common::setup_sample_db();
    let pq = ProductQuery::new(&conn);

    assert_eq!(pq.search("").unwrap().len(), 5);
    assert_eq!(pq.search("   \t").unwrap().len(), 5);
}

#[test]
fn search_with_no_matches_is_empty() {
    let (conn, _tmp) = common::setup_sample_db();
    let pq = ProductQuery::new(&conn);

    assert!(pq.search("Toaster").unwrap().is_empty());
}

#[test]
fn search_treats_wildcards_literally() {
    let (conn, _tmp) = common::setup_sample_db();
    let pq = ProductQuery::new(&conn);

    assert!(pq.search("%").unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// trending / by_category / count
// ---------------------------------------------------------------------------

#[test]
fn trending_sorted_by_rating_desc() {
    let (conn, _tmp) = common::setup_sample_db();
    let pq = ProductQuery::new(&conn);

    let ids: Vec<String> = pq.trending(9).unwrap().into_iter().map(|p| p.id).collect();
    assert_eq!(ids, vec!["p-002", "p-001", "p-004"]);
}

#[test]
fn trending_respects_limit() {
    let (conn, _tmp) = common::setup_sample_db();
    let pq = ProductQuery::new(&conn);

    assert_eq!(pq.trending(2).unwrap().len(), 2);
}

#[test]
fn by_category_filters_on_label() {
    let (conn, _tmp) = common::setup_sample_db();
    let pq = ProductQuery::new(&conn);

    let mobiles = pq.by_category("Mobiles").unwrap();
    assert_eq!(mobiles.len(), 3);
    assert!(mobiles.iter().all(|p| p.category == "Mobiles"));
}

#[test]
fn count_with_and_without_category() {
    let (conn, _tmp) = common::setup_sample_db();
    let pq = ProductQuery::new(&conn);

    assert_eq!(pq.count(None).unwrap(), 5);
    assert_eq!(pq.count(Some("Audio")).unwrap(), 1);
    assert_eq!(pq.count(Some("Groceries")).unwrap(), 0);
}

// ---------------------------------------------------------------------------
// categories
// ---------------------------------------------------------------------------

#[test]
fn categories_ordered_by_product_count_desc() {
    let (conn, _tmp) = common::setup_sample_db();
    let cq = CategoryQuery::new(&conn);

    let names: Vec<String> = cq.list().unwrap().into_iter().map(|c| c.name).collect();
    assert_eq!(names, vec!["Mobiles", "Fashion", "Audio"]);
}

#[test]
fn category_by_slug_is_case_insensitive() {
    let (conn, _tmp) = common::setup_sample_db();
    let cq = CategoryQuery::new(&conn);

    let category = cq.get_by_slug("AUDIO").unwrap().unwrap();
    assert_eq!(category.name, "Audio");
    assert_eq!(category.product_count, 45);
    assert!(cq.get_by_slug("toys").unwrap().is_none());
}
