use serde::{Deserialize, Serialize};

use super::NOT_AVAILABLE;

// ---------------------------------------------------------------------------
// PriceOffer — A platform's current price and terms for a product
// ---------------------------------------------------------------------------

/// Several offers may exist for the same product and platform; they are
/// independent records and are never merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceOffer {
    pub id: String,
    pub product_id: String,
    pub platform: String,
    pub price: f64,
    pub discount: Option<String>,
    pub delivery: Option<String>,
    /// Retailer product page, opened in a new browsing context.
    pub url: String,
}

impl PriceOffer {
    pub fn discount_label(&self) -> &str {
        non_blank(self.discount.as_deref()).unwrap_or(NOT_AVAILABLE)
    }

    pub fn delivery_label(&self) -> &str {
        non_blank(self.delivery.as_deref()).unwrap_or(NOT_AVAILABLE)
    }
}

pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
