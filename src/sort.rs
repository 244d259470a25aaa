//! Ordering for the price comparison table.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::aggregate::discount_magnitude;
use crate::models::PriceOffer;

/// Column the comparison table is sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Price,
    Discount,
    Platform,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl SortOrder {
    pub fn reversed(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

fn compare_by(field: SortField, a: &PriceOffer, b: &PriceOffer) -> Ordering {
    match field {
        SortField::Price => a.price.total_cmp(&b.price),
        SortField::Discount => discount_magnitude(a.discount.as_deref())
            .cmp(&discount_magnitude(b.discount.as_deref())),
        SortField::Platform => compare_labels(&a.platform, &b.platform),
    }
}

/// Alphabetical order of two labels, letters before case.
///
/// `"eBay"` lands between `"Amazon"` and `"Flipkart"`. Labels that differ
/// only in case put the lower-case one first.
fn compare_labels(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

/// Return a sorted copy of `offers`.
///
/// The sort is stable in both directions: descending order flips the
/// comparison, not the result, so offers with equal keys keep their input
/// order.
pub fn sort_offers(offers: &[PriceOffer], field: SortField, order: SortOrder) -> Vec<PriceOffer> {
    let mut sorted = offers.to_vec();
    sorted.sort_by(|a, b| {
        let ord = compare_by(field, a, b);
        match order {
            SortOrder::Ascending => ord,
            SortOrder::Descending => ord.reverse(),
        }
    });
    sorted
}

// ---------------------------------------------------------------------------
// SortState
// ---------------------------------------------------------------------------

/// Column-header toggle state of the comparison table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub field: SortField,
    pub order: SortOrder,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            field: SortField::Price,
            order: SortOrder::Ascending,
        }
    }
}

impl SortState {
    /// Handle a click on `field`'s header.
    ///
    /// Clicking the active column flips its order; clicking another column
    /// selects it in ascending order.
    pub fn toggle(&mut self, field: SortField) {
        if self.field == field {
            self.order = self.order.reversed();
        } else {
            self.field = field;
            self.order = SortOrder::Ascending;
        }
    }

    pub fn apply(&self, offers: &[PriceOffer]) -> Vec<PriceOffer> {
        sort_offers(offers, self.field, self.order)
    }
}
