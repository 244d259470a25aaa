//! Price offer queries against the DuckDB `price_data` table.

use std::collections::HashMap;

use crate::aggregate;
use crate::error::Result;
use crate::models::PriceOffer;
use crate::sql_builder::SqlBuilder;

// ---------------------------------------------------------------------------
// OfferQuery
// ---------------------------------------------------------------------------

/// Query interface for per-platform price offers.
pub struct OfferQuery<'a> {
    conn: &'a crate::connection::Connection,
}

impl<'a> OfferQuery<'a> {
    /// Create a new `OfferQuery` bound to the given connection.
    pub fn new(conn: &'a crate::connection::Connection) -> Self {
        Self { conn }
    }

    /// All offers, or only those of one product.
    ///
    /// Rows come ordered by id; callers sort with
    /// [`sort_offers`](crate::sort::sort_offers). Offers without a usable
    /// price are skipped.
    pub fn list(&self, product_id: Option<&str>) -> Result<Vec<PriceOffer>> {
        self.conn.ensure_tables(&["price_data"])?;

        let mut qb = SqlBuilder::new("price_data");
        if let Some(id) = product_id {
            qb.where_eq("product_id", id);
        }
        qb.order_by(&["id ASC"]);

        let (sql, params) = qb.build();
        self.conn.execute_into_present(&sql, &params, "price")
    }

    /// Offers of a single product.
    pub fn for_product(&self, product_id: &str) -> Result<Vec<PriceOffer>> {
        self.list(Some(product_id))
    }

    /// Every offer bucketed by product id.
    pub fn by_product(&self) -> Result<HashMap<String, Vec<PriceOffer>>> {
        Ok(aggregate::group_offers_by_product(self.list(None)?))
    }

    /// The N cheapest offers of a product, cheapest first.
    pub fn cheapest(&self, product_id: &str, limit: usize) -> Result<Vec<PriceOffer>> {
        self.conn.ensure_tables(&["price_data"])?;

        let (sql, params) = SqlBuilder::new("price_data")
            .where_eq("product_id", product_id)
            .where_clause("price >= 0", &[])
            .order_by(&["price ASC", "id ASC"])
            .limit(limit)
            .build();
        self.conn.execute_into_present(&sql, &params, "price")
    }
}
