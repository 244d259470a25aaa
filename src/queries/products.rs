//! Product queries against the DuckDB `products` table.

use crate::error::Result;
use crate::models::Product;
use crate::sql_builder::SqlBuilder;

// ---------------------------------------------------------------------------
// ProductQuery
// ---------------------------------------------------------------------------

/// Query interface for catalog products backed by the `products` table.
pub struct ProductQuery<'a> {
    conn: &'a crate::connection::Connection,
}

impl<'a> ProductQuery<'a> {
    /// Create a new `ProductQuery` bound to the given connection.
    pub fn new(conn: &'a crate::connection::Connection) -> Self {
        Self { conn }
    }

    /// Retrieve a single product by id.
    pub fn get(&self, id: &str) -> Result<Option<Product>> {
        self.conn.ensure_tables(&["products"])?;

        let (sql, params) = SqlBuilder::new("products")
            .where_eq("id", id)
            .limit(1)
            .build();

        let rows: Vec<Product> = self.conn.execute_into(&sql, &params)?;
        Ok(rows.into_iter().next())
    }

    /// All products ordered by name (the comparison page's picker).
    pub fn list(&self) -> Result<Vec<Product>> {
        self.conn.ensure_tables(&["products"])?;

        let (sql, params) = SqlBuilder::new("products")
            .order_by(&["name ASC", "id ASC"])
            .build();
        self.conn.execute_into(&sql, &params)
    }

    /// All products, newest first (the home page grid).
    pub fn newest(&self) -> Result<Vec<Product>> {
        self.conn.ensure_tables(&["products"])?;

        let (sql, params) = SqlBuilder::new("products")
            .order_by(&["created_at DESC", "id ASC"])
            .build();
        self.conn.execute_into(&sql, &params)
    }

    /// Products whose name contains `query`, ignoring case.
    ///
    /// An empty or whitespace-only query returns the full listing instead of
    /// nothing. Otherwise the query is matched as typed, surrounding spaces
    /// included.
    pub fn search(&self, query: &str) -> Result<Vec<Product>> {
        if query.trim().is_empty() {
            return self.list();
        }
        self.conn.ensure_tables(&["products"])?;

        let (sql, params) = SqlBuilder::new("products")
            .where_contains("name", query)
            .order_by(&["name ASC", "id ASC"])
            .build();
        self.conn.execute_into(&sql, &params)
    }

    /// Trending products, best rated first.
    pub fn trending(&self, limit: usize) -> Result<Vec<Product>> {
        self.conn.ensure_tables(&["products"])?;

        let (sql, params) = SqlBuilder::new("products")
            .where_clause("is_trending", &[])
            .order_by(&["rating DESC", "id ASC"])
            .limit(limit)
            .build();
        self.conn.execute_into(&sql, &params)
    }

    /// Products carrying the given category label.
    pub fn by_category(&self, category: &str) -> Result<Vec<Product>> {
        self.conn.ensure_tables(&["products"])?;

        let (sql, params) = SqlBuilder::new("products")
            .where_eq("category", category)
            .order_by(&["name ASC", "id ASC"])
            .build();
        self.conn.execute_into(&sql, &params)
    }

    /// Count products, optionally restricted to one category label.
    pub fn count(&self, category: Option<&str>) -> Result<i64> {
        self.conn.ensure_tables(&["products"])?;

        let mut qb = SqlBuilder::new("products");
        qb.select(&["COUNT(*)"]);
        if let Some(category) = category {
            qb.where_eq("category", category);
        }

        let (sql, params) = qb.build();
        let value = self.conn.execute_scalar(&sql, &params)?;
        Ok(value.and_then(|v| v.as_i64()).unwrap_or(0))
    }
}
