//! Price history queries against the DuckDB `price_history` table.

use crate::error::Result;
use crate::models::{PriceHistoryPoint, PriceTrend};
use crate::sql_builder::SqlBuilder;

// ---------------------------------------------------------------------------
// HistoryQuery
// ---------------------------------------------------------------------------

/// Query interface for historical price observations.
pub struct HistoryQuery<'a> {
    conn: &'a crate::connection::Connection,
}

impl<'a> HistoryQuery<'a> {
    /// Create a new `HistoryQuery` bound to the given connection.
    pub fn new(conn: &'a crate::connection::Connection) -> Self {
        Self { conn }
    }

    /// Full price history of a product, oldest first.
    pub fn for_product(&self, product_id: &str) -> Result<Vec<PriceHistoryPoint>> {
        self.for_product_between(product_id, None, None)
    }

    /// Price history of a product, optionally bounded by inclusive dates.
    ///
    /// Bounds are compared as ISO-8601 strings.
    pub fn for_product_between(
        &self,
        product_id: &str,
        date_from: Option<&str>,
        date_to: Option<&str>,
    ) -> Result<Vec<PriceHistoryPoint>> {
        self.conn.ensure_tables(&["price_history"])?;

        let mut qb = SqlBuilder::new("price_history");
        qb.where_eq("product_id", product_id);

        if let Some(df) = date_from {
            qb.where_gte("date", df);
        }

        if let Some(dt) = date_to {
            qb.where_lte("date", dt);
        }

        // Ties keep backend insertion order as far as ids allow
        qb.order_by(&["date ASC", "id ASC"]);

        let (sql, params) = qb.build();
        self.conn.execute_into_present(&sql, &params, "price")
    }

    /// Aggregated statistics over a product's history.
    ///
    /// Returns `None` when the product has no history.
    pub fn trend(&self, product_id: &str) -> Result<Option<PriceTrend>> {
        self.conn.ensure_tables(&["price_history"])?;

        let sql = r#"
            SELECT
                MIN(price) AS min_price,
                MAX(price) AS max_price,
                AVG(price) AS avg_price,
                MIN(date) AS first_date,
                MAX(date) AS last_date,
                COUNT(*) AS data_points
            FROM price_history
            WHERE product_id = ?
        "#;

        let rows = self.conn.execute(sql, &[product_id.to_string()])?;
        let Some(row) = rows.into_iter().next() else {
            return Ok(None);
        };
        let points = row.get("data_points").and_then(|v| v.as_i64()).unwrap_or(0);
        if points == 0 {
            return Ok(None);
        }
        let value = serde_json::Value::Object(row.into_iter().collect());
        Ok(Some(serde_json::from_value(value)?))
    }
}
