use std::collections::HashMap;

use serde::Serialize;

use super::{Category, PriceHistoryPoint, PriceOffer, Product, ProductSpecification, Review};
use crate::aggregate::{self, BestOffer, HistoryGroup};

// ---------------------------------------------------------------------------
// ProductDetail — Everything the product page shows, assembled in one place
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductDetail {
    pub product: Product,
    pub offers: Vec<PriceOffer>,
    /// Ordered by date ascending.
    pub history: Vec<PriceHistoryPoint>,
    /// Newest first.
    pub reviews: Vec<Review>,
    pub specifications: Vec<ProductSpecification>,
}

impl ProductDetail {
    /// Cheapest offer, or `None` when the page should show "no price data".
    pub fn best_offer(&self) -> Option<BestOffer<'_>> {
        aggregate::best_offer(&self.offers)
    }

    /// One chart row per date with a price per platform.
    pub fn chart_data(&self) -> Vec<HistoryGroup> {
        aggregate::group_history_by_date(&self.history)
    }

    /// Chart series, one per platform seen in the history.
    pub fn chart_platforms(&self) -> Vec<String> {
        aggregate::history_platforms(&self.history)
    }

    pub fn average_rating(&self) -> Option<f64> {
        aggregate::average_rating(&self.reviews)
    }
}

// ---------------------------------------------------------------------------
// HomeFeed — Data behind the landing page
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HomeFeed {
    /// Newest first.
    pub products: Vec<Product>,
    /// Trending products by rating, highest first.
    pub trending: Vec<Product>,
    /// Leading slice of `trending`.
    pub best_deals: Vec<Product>,
    /// Largest categories first.
    pub categories: Vec<Category>,
    pub offers_by_product: HashMap<String, Vec<PriceOffer>>,
}

impl HomeFeed {
    pub fn offers_for(&self, product_id: &str) -> &[PriceOffer] {
        self.offers_by_product
            .get(product_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Cheapest offer for a product card ("Starting from ... on ...").
    pub fn best_offer_for(&self, product_id: &str) -> Option<BestOffer<'_>> {
        aggregate::best_offer(self.offers_for(product_id))
    }
}
