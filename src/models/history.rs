use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// PriceHistoryPoint — One (platform, date, price) observation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceHistoryPoint {
    pub id: String,
    pub product_id: String,
    pub platform: String,
    pub price: f64,
    /// `YYYY-MM-DD` or an ISO-8601 timestamp.
    pub date: String,
}

// ---------------------------------------------------------------------------
// PriceTrend — Aggregated history statistics for a product
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceTrend {
    pub min_price: f64,
    pub max_price: f64,
    pub avg_price: f64,
    pub first_date: String,
    pub last_date: String,
    pub data_points: i64,
}
