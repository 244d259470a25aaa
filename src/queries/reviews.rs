//! Review queries against the DuckDB `reviews` and `users` tables.

use crate::error::Result;
use crate::models::Review;
use crate::sql_builder::SqlBuilder;

use tracing::warn;

/// Query interface for product reviews.
pub struct ReviewQuery<'a> {
    conn: &'a crate::connection::Connection,
}

impl<'a> ReviewQuery<'a> {
    pub fn new(conn: &'a crate::connection::Connection) -> Self {
        Self { conn }
    }

    /// Reviews of a product, newest first, with the author's name joined in.
    ///
    /// Reviews whose author no longer exists are kept with no name. When the
    /// `users` collection cannot be loaded (it is often access-restricted),
    /// reviews are still returned, all without a name.
    pub fn for_product(&self, product_id: &str) -> Result<Vec<Review>> {
        self.conn.ensure_tables(&["reviews"])?;

        if let Err(e) = self.conn.ensure_tables(&["users"]) {
            warn!(error = %e, "users unavailable, reviews shown without author names");
            let (sql, params) = SqlBuilder::new("reviews")
                .where_eq("product_id", product_id)
                .order_by(&["created_at DESC", "id ASC"])
                .build();
            return self.conn.execute_into(&sql, &params);
        }

        let (sql, params) = SqlBuilder::new("reviews r")
            .select(&["r.*", "u.name AS user_name"])
            .join("LEFT JOIN users u ON r.user_id = u.id")
            .where_eq("r.product_id", product_id)
            .order_by(&["r.created_at DESC", "r.id ASC"])
            .build();
        self.conn.execute_into(&sql, &params)
    }

    /// Number of reviews a product has received.
    pub fn count(&self, product_id: &str) -> Result<i64> {
        self.conn.ensure_tables(&["reviews"])?;

        let (sql, params) = SqlBuilder::new("reviews")
            .select(&["COUNT(*)"])
            .where_eq("product_id", product_id)
            .build();
        let value = self.conn.execute_scalar(&sql, &params)?;
        Ok(value.and_then(|v| v.as_i64()).unwrap_or(0))
    }
}
