//! Spec sheet queries against the DuckDB `product_specifications` table.

use crate::error::Result;
use crate::models::ProductSpecification;
use crate::sql_builder::SqlBuilder;

/// Query interface for product specification rows.
pub struct SpecificationQuery<'a> {
    conn: &'a crate::connection::Connection,
}

impl<'a> SpecificationQuery<'a> {
    pub fn new(conn: &'a crate::connection::Connection) -> Self {
        Self { conn }
    }

    /// Spec rows of a product, ordered by key.
    pub fn for_product(&self, product_id: &str) -> Result<Vec<ProductSpecification>> {
        self.conn.ensure_tables(&["product_specifications"])?;

        let (sql, params) = SqlBuilder::new("product_specifications")
            .where_eq("product_id", product_id)
            .order_by(&["spec_key ASC", "id ASC"])
            .build();
        self.conn.execute_into(&sql, &params)
    }
}
