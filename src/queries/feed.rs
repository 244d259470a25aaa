//! Landing page feed.

use std::collections::HashMap;

use tracing::error;

use crate::config::{BEST_DEALS_LIMIT, TRENDING_LIMIT};
use crate::error::Result;
use crate::models::HomeFeed;
use crate::outcome::FetchOutcome;
use crate::queries::{CategoryQuery, OfferQuery, ProductQuery};

/// Assembles the [`HomeFeed`].
pub struct FeedQuery<'a> {
    conn: &'a crate::connection::Connection,
}

impl<'a> FeedQuery<'a> {
    pub fn new(conn: &'a crate::connection::Connection) -> Self {
        Self { conn }
    }

    /// Newest products, trending picks, best deals, categories and every
    /// offer grouped by product.
    ///
    /// Each section loads on its own; one that fails is logged and left
    /// empty instead of failing the whole page.
    pub fn home(&self) -> Result<HomeFeed> {
        let products = ProductQuery::new(self.conn);
        let trending = FetchOutcome::from(products.trending(TRENDING_LIMIT)).into_rows();
        let best_deals = trending.iter().take(BEST_DEALS_LIMIT).cloned().collect();

        let offers_by_product = match OfferQuery::new(self.conn).by_product() {
            Ok(map) => map,
            Err(e) => {
                error!(error = %e, "offers unavailable for home feed");
                HashMap::new()
            }
        };

        Ok(HomeFeed {
            products: FetchOutcome::from(products.newest()).into_rows(),
            trending,
            best_deals,
            categories: FetchOutcome::from(CategoryQuery::new(self.conn).list()).into_rows(),
            offers_by_product,
        })
    }
}
