use std::path::PathBuf;
use std::time::Duration;

/// Path of the PostgREST endpoint below the backend base URL.
pub const REST_PATH: &str = "rest/v1";

pub const ENV_BACKEND_URL: &str = "PRICECOMPARE_BACKEND_URL";
pub const ENV_API_KEY: &str = "PRICECOMPARE_API_KEY";
pub const ENV_CACHE_DIR: &str = "PRICECOMPARE_CACHE_DIR";
pub const ENV_OFFLINE: &str = "PRICECOMPARE_OFFLINE";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_MAX_AGE: Duration = Duration::from_secs(300);

/// Number of trending products shown on the home page.
pub const TRENDING_LIMIT: usize = 9;
/// Number of trending products promoted as best deals.
pub const BEST_DEALS_LIMIT: usize = 6;

/// Column schema of every backend collection, in DuckDB types.
///
/// Dates and timestamps are kept as VARCHAR; they are ISO-8601 strings and
/// sort chronologically as text.
pub fn collection_columns(table: &str) -> Option<&'static [(&'static str, &'static str)]> {
    let columns: &'static [(&'static str, &'static str)] = match table {
        "products" => &[
            ("id", "VARCHAR"),
            ("name", "VARCHAR"),
            ("image", "VARCHAR"),
            ("description", "VARCHAR"),
            ("rating", "DOUBLE"),
            ("category", "VARCHAR"),
            ("is_trending", "BOOLEAN"),
            ("created_at", "VARCHAR"),
        ],
        "categories" => &[
            ("id", "VARCHAR"),
            ("name", "VARCHAR"),
            ("slug", "VARCHAR"),
            ("icon", "VARCHAR"),
            ("description", "VARCHAR"),
            ("product_count", "BIGINT"),
            ("created_at", "VARCHAR"),
        ],
        "price_data" => &[
            ("id", "VARCHAR"),
            ("product_id", "VARCHAR"),
            ("platform", "VARCHAR"),
            ("price", "DOUBLE"),
            ("discount", "VARCHAR"),
            ("delivery", "VARCHAR"),
            ("url", "VARCHAR"),
        ],
        "price_history" => &[
            ("id", "VARCHAR"),
            ("product_id", "VARCHAR"),
            ("platform", "VARCHAR"),
            ("price", "DOUBLE"),
            ("date", "VARCHAR"),
        ],
        "reviews" => &[
            ("id", "VARCHAR"),
            ("product_id", "VARCHAR"),
            ("user_id", "VARCHAR"),
            ("rating", "BIGINT"),
            ("comment", "VARCHAR"),
            ("created_at", "VARCHAR"),
        ],
        "users" => &[
            ("id", "VARCHAR"),
            ("email", "VARCHAR"),
            ("name", "VARCHAR"),
            ("created_at", "VARCHAR"),
        ],
        "product_specifications" => &[
            ("id", "VARCHAR"),
            ("product_id", "VARCHAR"),
            ("spec_key", "VARCHAR"),
            ("spec_value", "VARCHAR"),
            ("created_at", "VARCHAR"),
        ],
        _ => return None,
    };
    Some(columns)
}

/// Names of all backend collections the SDK knows how to sync.
pub fn collections() -> [&'static str; 7] {
    [
        "products",
        "categories",
        "price_data",
        "price_history",
        "reviews",
        "users",
        "product_specifications",
    ]
}

pub fn default_cache_dir() -> PathBuf {
    if let Some(cache) = dirs::cache_dir() {
        cache.join("pricecompare-sdk")
    } else {
        PathBuf::from(".pricecompare-sdk-cache")
    }
}
