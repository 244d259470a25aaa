//! In-memory aggregation over offers, price history and reviews.
//!
//! These functions are pure: they never touch the connection and the same
//! input always yields the same output.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;
use tracing::warn;

use crate::models::{PriceHistoryPoint, PriceOffer, Review};

// ---------------------------------------------------------------------------
// Cheapest offer
// ---------------------------------------------------------------------------

/// The cheapest offer for a product together with its price.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BestOffer<'a> {
    pub min_price: f64,
    pub offer: &'a PriceOffer,
}

/// Find the offer with the lowest price.
///
/// The first offer wins on ties. Offers with a negative or non-finite price
/// are skipped. Returns `None` when no valid offer remains, in which case no
/// price panel should be shown.
pub fn best_offer(offers: &[PriceOffer]) -> Option<BestOffer<'_>> {
    let mut best: Option<BestOffer<'_>> = None;
    for offer in offers {
        if !offer.price.is_finite() || offer.price < 0.0 {
            warn!(
                offer = %offer.id,
                price = offer.price,
                "skipping offer with invalid price"
            );
            continue;
        }
        match &best {
            Some(current) if current.min_price <= offer.price => {}
            _ => {
                best = Some(BestOffer {
                    min_price: offer.price,
                    offer,
                })
            }
        }
    }
    best
}

/// Lowest valid price across `offers`.
pub fn lowest_price(offers: &[PriceOffer]) -> Option<f64> {
    best_offer(offers).map(|b| b.min_price)
}

// ---------------------------------------------------------------------------
// Discount labels
// ---------------------------------------------------------------------------

/// Parse the leading integer of a free-text discount label.
///
/// `"20% off"` gives 20. Leading whitespace and a sign are accepted; anything
/// else (including an absent label) gives 0.
pub fn discount_magnitude(label: Option<&str>) -> i64 {
    let Some(label) = label else {
        return 0;
    };
    let trimmed = label.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let mut value: i64 = 0;
    let mut seen_digit = false;
    for b in digits.bytes() {
        if !b.is_ascii_digit() {
            break;
        }
        seen_digit = true;
        value = value
            .saturating_mul(10)
            .saturating_add(i64::from(b - b'0'));
    }

    match (seen_digit, negative) {
        (false, _) => 0,
        (true, true) => -value,
        (true, false) => value,
    }
}

// ---------------------------------------------------------------------------
// Price history chart data
// ---------------------------------------------------------------------------

/// Prices of every platform observed on one chart date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryGroup {
    /// Short month and day, e.g. `"Jan 1"`.
    pub date: String,
    /// Platform and price pairs in first-seen order.
    pub prices: Vec<(String, f64)>,
}

impl HistoryGroup {
    /// Price recorded for `platform` on this date.
    pub fn price(&self, platform: &str) -> Option<f64> {
        self.prices
            .iter()
            .find(|(p, _)| p == platform)
            .map(|(_, price)| *price)
    }

    fn record(&mut self, platform: &str, price: f64) {
        match self.prices.iter_mut().find(|(p, _)| p == platform) {
            Some(slot) => slot.1 = price,
            None => self.prices.push((platform.to_string(), price)),
        }
    }
}

/// Group history points into one row per chart date.
///
/// Rows follow the first appearance of each date label. When two points for
/// the same platform land on the same label, the later one wins.
pub fn group_history_by_date(points: &[PriceHistoryPoint]) -> Vec<HistoryGroup> {
    let mut groups: Vec<HistoryGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for point in points {
        let label = date_label(&point.date);
        let slot = match index.get(&label) {
            Some(&i) => i,
            None => {
                groups.push(HistoryGroup {
                    date: label.clone(),
                    prices: Vec::new(),
                });
                index.insert(label, groups.len() - 1);
                groups.len() - 1
            }
        };
        if let Some(group) = groups.get_mut(slot) {
            group.record(&point.platform, point.price);
        }
    }

    groups
}

/// Distinct platforms in `points`, in first-seen order (one chart series each).
pub fn history_platforms(points: &[PriceHistoryPoint]) -> Vec<String> {
    let mut platforms: Vec<String> = Vec::new();
    for point in points {
        if !platforms.iter().any(|p| p == &point.platform) {
            platforms.push(point.platform.clone());
        }
    }
    platforms
}

/// Format a backend date as a short chart label (`"2024-01-01"` → `"Jan 1"`).
///
/// Accepts plain dates, RFC 3339 timestamps and naive timestamps. Anything
/// else is returned unchanged.
pub fn date_label(raw: &str) -> String {
    match parse_date(raw) {
        Some(date) => date.format("%b %-d").to_string(),
        None => raw.to_string(),
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f%#z"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.date())
}

// ---------------------------------------------------------------------------
// Grouping and ratings
// ---------------------------------------------------------------------------

/// Bucket offers by product id, keeping input order inside each bucket.
pub fn group_offers_by_product(offers: Vec<PriceOffer>) -> HashMap<String, Vec<PriceOffer>> {
    let mut map: HashMap<String, Vec<PriceOffer>> = HashMap::new();
    for offer in offers {
        map.entry(offer.product_id.clone()).or_default().push(offer);
    }
    map
}

/// Mean review rating, or `None` without reviews.
pub fn average_rating(reviews: &[Review]) -> Option<f64> {
    if reviews.is_empty() {
        return None;
    }
    // Ratings are not range-checked, so sum in floating point
    let total: f64 = reviews.iter().map(|r| r.rating as f64).sum();
    Some(total / reviews.len() as f64)
}
