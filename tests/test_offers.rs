//! Price offer query integration tests against in-memory sample data.

mod common;

use pricecompare_sdk::queries::OfferQuery;
use pricecompare_sdk::{best_offer, sort_offers, SortField, SortOrder};

#[test]
fn list_without_filter_returns_every_offer() {
    let (conn, _tmp) = common::setup_sample_db();
    let oq = OfferQuery::new(&conn);

    assert_eq!(oq.list(None).unwrap().len(), 7);
}

#[test]
fn for_product_filters_by_product_id() {
    let (conn, _tmp) = common::setup_sample_db();
    let oq = OfferQuery::new(&conn);

    let offers = oq.for_product("p-001").unwrap();
    let platforms: Vec<&str> = offers.iter().map(|o| o.platform.as_str()).collect();
    assert_eq!(platforms, vec!["Amazon", "Flipkart", "Croma"]);
}

#[test]
fn product_without_offers_has_no_best_offer() {
    let (conn, _tmp) = common::setup_sample_db();
    let oq = OfferQuery::new(&conn);

    let offers = oq.for_product("p-005").unwrap();
    assert!(offers.is_empty());
    assert!(best_offer(&offers).is_none());
}

#[test]
fn null_optional_fields_fall_back_to_placeholders() {
    let (conn, _tmp) = common::setup_sample_db();
    let oq = OfferQuery::new(&conn);

    let offers = oq.for_product("p-001").unwrap();
    let croma = offers.iter().find(|o| o.platform == "Croma").unwrap();
    assert!(croma.discount.is_none());
    assert_eq!(croma.discount_label(), "N/A");
    assert_eq!(croma.delivery_label(), "N/A");

    let amazon = offers.iter().find(|o| o.platform == "Amazon").unwrap();
    assert_eq!(amazon.discount_label(), "10% off");
    assert_eq!(amazon.delivery_label(), "2 days");
}

#[test]
fn best_offer_over_queried_rows_prefers_first_tie() {
    let (conn, _tmp) = common::setup_sample_db();
    let oq = OfferQuery::new(&conn);

    let offers = oq.for_product("p-001").unwrap();
    let best = best_offer(&offers).unwrap();
    assert_eq!(best.min_price, 119999.0);
    assert_eq!(best.offer.platform, "Flipkart");
}

#[test]
fn by_product_groups_every_offer() {
    let (conn, _tmp) = common::setup_sample_db();
    let oq = OfferQuery::new(&conn);

    let grouped = oq.by_product().unwrap();
    assert_eq!(grouped.len(), 4);
    assert_eq!(grouped["p-001"].len(), 3);
    assert_eq!(grouped["p-002"].len(), 2);
    assert!(!grouped.contains_key("p-005"));
}

#[test]
fn cheapest_limits_and_orders_by_price() {
    let (conn, _tmp) = common::setup_sample_db();
    let oq = OfferQuery::new(&conn);

    let cheapest = oq.cheapest("p-002", 1).unwrap();
    assert_eq!(cheapest.len(), 1);
    assert_eq!(cheapest[0].platform, "Reliance Digital");
}

#[test]
fn sorting_queried_offers_by_discount_desc() {
    let (conn, _tmp) = common::setup_sample_db();
    let oq = OfferQuery::new(&conn);

    let offers = oq.for_product("p-001").unwrap();
    let sorted = sort_offers(&offers, SortField::Discount, SortOrder::Descending);
    let ids: Vec<&str> = sorted.iter().map(|o| o.id.as_str()).collect();
    assert_eq!(ids, vec!["o-002", "o-001", "o-003"]);
}

#[test]
fn offers_without_price_are_skipped() {
    let (conn, _tmp) = common::setup_sample_db_without(&["price_data"]);
    common::write_ndjson_and_register(
        &conn,
        "price_data",
        &[
            serde_json::json!({
                "id": "o-100", "product_id": "p-001", "platform": "Amazon",
                "price": null, "discount": null, "delivery": null,
                "url": "https://amazon.example.com/s24"
            }),
            serde_json::json!({
                "id": "o-101", "product_id": "p-001", "platform": "Flipkart",
                "price": 118999, "discount": "15% off", "delivery": null,
                "url": "https://flipkart.example.com/s24"
            }),
        ],
    );
    let oq = OfferQuery::new(&conn);

    let offers = oq.for_product("p-001").unwrap();
    let ids: Vec<&str> = offers.iter().map(|o| o.id.as_str()).collect();
    assert_eq!(ids, vec!["o-101"]);
    assert_eq!(best_offer(&offers).unwrap().min_price, 118999.0);

    let cheapest = oq.cheapest("p-001", 5).unwrap();
    assert_eq!(cheapest.len(), 1);
}
