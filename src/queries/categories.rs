//! Category queries against the DuckDB `categories` table.

use crate::error::Result;
use crate::models::Category;
use crate::sql_builder::SqlBuilder;

/// Query interface for product categories.
pub struct CategoryQuery<'a> {
    conn: &'a crate::connection::Connection,
}

impl<'a> CategoryQuery<'a> {
    pub fn new(conn: &'a crate::connection::Connection) -> Self {
        Self { conn }
    }

    /// All categories, largest first.
    pub fn list(&self) -> Result<Vec<Category>> {
        self.conn.ensure_tables(&["categories"])?;

        let (sql, params) = SqlBuilder::new("categories")
            .order_by(&["product_count DESC", "name ASC"])
            .build();
        self.conn.execute_into(&sql, &params)
    }

    /// Look a category up by its URL slug (case-insensitive).
    pub fn get_by_slug(&self, slug: &str) -> Result<Option<Category>> {
        self.conn.ensure_tables(&["categories"])?;

        let lowered = slug.to_lowercase();
        let (sql, params) = SqlBuilder::new("categories")
            .where_clause("LOWER(slug) = ?", &[lowered.as_str()])
            .limit(1)
            .build();
        let rows: Vec<Category> = self.conn.execute_into(&sql, &params)?;
        Ok(rows.into_iter().next())
    }
}
