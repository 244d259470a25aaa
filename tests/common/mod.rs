//! Shared test fixtures for the price comparison SDK integration tests.
//!
//! Provides `setup_sample_db()` which creates an in-memory DuckDB connection
//! populated with small sample collections (products, categories, price_data,
//! price_history, reviews, users, product_specifications) via NDJSON temp files.

#![allow(dead_code)]

use pricecompare_sdk::{CacheManager, Connection, PriceCompareSdk};
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Create a `Connection` backed by a temporary offline cache directory with
/// sample data loaded into DuckDB tables.
///
/// The caller must keep the returned `TempDir` alive for the duration of the
/// test so the cache directory is not deleted prematurely.
pub fn setup_sample_db() -> (Connection, tempfile::TempDir) {
    setup_sample_db_without(&[])
}

/// Same as `setup_sample_db()`, but the named collections are neither
/// registered nor cached, so reading them fails as it would offline.
pub fn setup_sample_db_without(skip: &[&str]) -> (Connection, tempfile::TempDir) {
    init_tracing();
    let tmp_dir = tempfile::tempdir().unwrap();
    let cache = CacheManager::new(
        Some(tmp_dir.path().to_path_buf()),
        true,
        Duration::from_secs(5),
    )
    .unwrap();
    let conn = Connection::new(cache).unwrap();

    let collections: [(&str, fn(&Connection)); 7] = [
        ("products", register_products),
        ("categories", register_categories),
        ("price_data", register_price_data),
        ("price_history", register_price_history),
        ("users", register_users),
        ("reviews", register_reviews),
        ("product_specifications", register_specifications),
    ];
    for (name, register) in collections {
        if !skip.contains(&name) {
            register(&conn);
        }
    }

    (conn, tmp_dir)
}

/// Same fixture wrapped in the SDK handle.
pub fn setup_sample_sdk() -> (PriceCompareSdk, tempfile::TempDir) {
    setup_sample_sdk_without(&[])
}

pub fn setup_sample_sdk_without(skip: &[&str]) -> (PriceCompareSdk, tempfile::TempDir) {
    let (conn, tmp) = setup_sample_db_without(skip);
    (PriceCompareSdk::from_connection(conn), tmp)
}

fn register_products(conn: &Connection) {
    let products = vec![
        serde_json::json!({
            "id": "p-001",
            "name": "Galaxy S24 Ultra",
            "image": "https://img.example.com/s24.jpg",
            "description": "Flagship phone with a 200 MP camera.",
            "rating": 4.6,
            "category": "Mobiles",
            "is_trending": true,
            "created_at": "2024-03-01T10:00:00+00:00"
        }),
        serde_json::json!({
            "id": "p-002",
            "name": "iPhone 15",
            "image": "https://img.example.com/iphone15.jpg",
            "description": "Dynamic Island and USB-C.",
            "rating": 4.8,
            "category": "Mobiles",
            "is_trending": true,
            "created_at": "2024-02-15T10:00:00+00:00"
        }),
        serde_json::json!({
            "id": "p-003",
            "name": "Sony WH-1000XM5 Headphones",
            "image": "https://img.example.com/xm5.jpg",
            "description": "Noise cancelling over-ear headphones.",
            "rating": 4.7,
            "category": "Audio",
            "is_trending": false,
            "created_at": "2024-01-20T10:00:00+00:00"
        }),
        serde_json::json!({
            "id": "p-004",
            "name": "Nike Air Max 90",
            "image": "https://img.example.com/airmax.jpg",
            "description": null,
            "rating": 4.3,
            "category": "Fashion",
            "is_trending": true,
            "created_at": "2024-03-10T10:00:00+00:00"
        }),
        serde_json::json!({
            "id": "p-005",
            "name": "Redmi Note 13",
            "image": "https://img.example.com/redmi.jpg",
            "description": "Budget phone.",
            "rating": 4.1,
            "category": "Mobiles",
            "is_trending": false,
            "created_at": "2023-12-05T10:00:00+00:00"
        }),
    ];

    write_ndjson_and_register(conn, "products", &products);
}

fn register_categories(conn: &Connection) {
    let categories = vec![
        serde_json::json!({
            "id": "c-001",
            "name": "Mobiles",
            "slug": "mobiles",
            "icon": "smartphone",
            "description": "Phones and accessories",
            "product_count": 120,
            "created_at": "2024-01-01T00:00:00+00:00"
        }),
        serde_json::json!({
            "id": "c-002",
            "name": "Audio",
            "slug": "audio",
            "icon": "headphones",
            "description": "Headphones and speakers",
            "product_count": 45,
            "created_at": "2024-01-01T00:00:00+00:00"
        }),
        serde_json::json!({
            "id": "c-003",
            "name": "Fashion",
            "slug": "fashion",
            "icon": "shirt",
            "description": "Clothing and footwear",
            "product_count": 80,
            "created_at": "2024-01-01T00:00:00+00:00"
        }),
    ];

    write_ndjson_and_register(conn, "categories", &categories);
}

fn register_price_data(conn: &Connection) {
    let offers = vec![
        serde_json::json!({
            "id": "o-001", "product_id": "p-001", "platform": "Amazon",
            "price": 124999, "discount": "10% off", "delivery": "2 days",
            "url": "https://amazon.example.com/s24"
        }),
        serde_json::json!({
            "id": "o-002", "product_id": "p-001", "platform": "Flipkart",
            "price": 119999, "discount": "14% off", "delivery": "3 days",
            "url": "https://flipkart.example.com/s24"
        }),
        serde_json::json!({
            "id": "o-003", "product_id": "p-001", "platform": "Croma",
            "price": 119999, "discount": null, "delivery": null,
            "url": "https://croma.example.com/s24"
        }),
        serde_json::json!({
            "id": "o-004", "product_id": "p-002", "platform": "Amazon",
            "price": 79900, "discount": "Best Deal", "delivery": "Tomorrow",
            "url": "https://amazon.example.com/iphone15"
        }),
        serde_json::json!({
            "id": "o-005", "product_id": "p-002", "platform": "Reliance Digital",
            "price": 77990, "discount": "5% off", "delivery": null,
            "url": "https://reliance.example.com/iphone15"
        }),
        serde_json::json!({
            "id": "o-006", "product_id": "p-003", "platform": "Amazon",
            "price": 29990, "discount": "25% off", "delivery": "2 days",
            "url": "https://amazon.example.com/xm5"
        }),
        serde_json::json!({
            "id": "o-007", "product_id": "p-004", "platform": "Myntra",
            "price": 7495, "discount": "50% off", "delivery": "4 days",
            "url": "https://myntra.example.com/airmax"
        }),
    ];

    write_ndjson_and_register(conn, "price_data", &offers);
}

fn register_price_history(conn: &Connection) {
    let history = vec![
        serde_json::json!({"id": "h-001", "product_id": "p-001", "platform": "Amazon", "price": 129999, "date": "2024-01-01"}),
        serde_json::json!({"id": "h-002", "product_id": "p-001", "platform": "Flipkart", "price": 125999, "date": "2024-01-01"}),
        serde_json::json!({"id": "h-003", "product_id": "p-001", "platform": "Amazon", "price": 127999, "date": "2024-01-02"}),
        serde_json::json!({"id": "h-004", "product_id": "p-001", "platform": "Flipkart", "price": 121999, "date": "2024-01-15"}),
        serde_json::json!({"id": "h-005", "product_id": "p-001", "platform": "Amazon", "price": 124999, "date": "2024-01-15"}),
        serde_json::json!({"id": "h-006", "product_id": "p-002", "platform": "Amazon", "price": 79900, "date": "2024-01-05"}),
    ];

    write_ndjson_and_register(conn, "price_history", &history);
}

fn register_users(conn: &Connection) {
    let users = vec![
        serde_json::json!({"id": "u-001", "email": "aarav@example.com", "name": "Aarav Sharma", "created_at": "2024-01-01T00:00:00+00:00"}),
        serde_json::json!({"id": "u-002", "email": "priya@example.com", "name": "priya", "created_at": "2024-01-02T00:00:00+00:00"}),
    ];

    write_ndjson_and_register(conn, "users", &users);
}

fn register_reviews(conn: &Connection) {
    let reviews = vec![
        serde_json::json!({
            "id": "r-001", "product_id": "p-001", "user_id": "u-001", "rating": 5,
            "comment": "Fantastic camera", "created_at": "2024-03-05T09:00:00+00:00"
        }),
        serde_json::json!({
            "id": "r-002", "product_id": "p-001", "user_id": "u-002", "rating": 4,
            "comment": "Battery could be better", "created_at": "2024-03-07T12:30:00+00:00"
        }),
        serde_json::json!({
            "id": "r-003", "product_id": "p-001", "user_id": "u-999", "rating": 3,
            "comment": "Okay", "created_at": "2024-03-06T08:00:00+00:00"
        }),
        serde_json::json!({
            "id": "r-004", "product_id": "p-003", "user_id": "u-001", "rating": 5,
            "comment": "Quiet bliss", "created_at": "2024-02-01T08:00:00+00:00"
        }),
    ];

    write_ndjson_and_register(conn, "reviews", &reviews);
}

fn register_specifications(conn: &Connection) {
    let specs = vec![
        serde_json::json!({"id": "s-001", "product_id": "p-001", "spec_key": "RAM", "spec_value": "12 GB", "created_at": null}),
        serde_json::json!({"id": "s-002", "product_id": "p-001", "spec_key": "Display", "spec_value": "6.8 inch", "created_at": null}),
        serde_json::json!({"id": "s-003", "product_id": "p-001", "spec_key": "Battery", "spec_value": "5000 mAh", "created_at": null}),
    ];

    write_ndjson_and_register(conn, "product_specifications", &specs);
}

/// Write a slice of JSON values as NDJSON to a temp file and register it
/// as a DuckDB table via `Connection::register_table_from_ndjson`.
pub fn write_ndjson_and_register(conn: &Connection, table_name: &str, rows: &[serde_json::Value]) {
    let mut file = NamedTempFile::new().unwrap();
    for row in rows {
        writeln!(file, "{}", serde_json::to_string(row).unwrap()).unwrap();
    }
    file.flush().unwrap();

    let path = file.path().to_str().unwrap();
    conn.register_table_from_ndjson(table_name, path).unwrap();
    // DuckDB has copied the rows into an in-memory table, so dropping the
    // temp file here is fine.
}
