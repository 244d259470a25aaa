//! DuckDB connection wrapper with table registration and query execution.
//!
//! Every backend collection is materialized as a typed table from its cached
//! snapshot the first time a query needs it.

use crate::cache::CacheManager;
use crate::config;
use crate::error::{PriceCompareError, Result};
use duckdb::{types::ValueRef, Connection as DuckDbConnection};
use serde::de::DeserializeOwned;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::{debug, warn};

/// Wraps a DuckDB connection and registers collection snapshots as tables.
pub struct Connection {
    conn: DuckDbConnection,
    /// The cache manager used to download/locate snapshots.
    pub cache: RefCell<CacheManager>,
    registered_tables: RefCell<HashSet<String>>,
}

impl Connection {
    /// Create a connection backed by the given cache.
    ///
    /// Opens an in-memory DuckDB database.
    pub fn new(cache: CacheManager) -> Result<Self> {
        let conn = DuckDbConnection::open_in_memory()?;
        Ok(Self {
            conn,
            cache: RefCell::new(cache),
            registered_tables: RefCell::new(HashSet::new()),
        })
    }

    /// Ensure one or more tables are registered, downloading snapshots if needed.
    pub fn ensure_tables(&self, tables: &[&str]) -> Result<()> {
        for name in tables {
            if !self.registered_tables.borrow().contains(*name) {
                self.ensure_table(name)?;
            }
        }
        Ok(())
    }

    /// Execute SQL and return results as a `Vec` of `HashMap`s.
    ///
    /// Each row is represented as a `HashMap<String, serde_json::Value>`.
    /// Automatically converts DuckDB types to `serde_json::Value`.
    pub fn execute(
        &self,
        sql: &str,
        params: &[String],
    ) -> Result<Vec<HashMap<String, serde_json::Value>>> {
        let mut stmt = self.conn.prepare(sql)?;

        let param_values: Vec<&dyn duckdb::ToSql> = params
            .iter()
            .map(|p| p as &dyn duckdb::ToSql)
            .collect();

        let mut rows_result = stmt.query(param_values.as_slice())?;

        // Column metadata is only available once the query has run
        let executed = rows_result.as_ref().ok_or_else(|| {
            PriceCompareError::InvalidArgument("statement produced no result set".into())
        })?;
        let column_names: Vec<String> = executed
            .column_names()
            .into_iter()
            .map(|s| s.to_string())
            .collect();

        let mut out: Vec<HashMap<String, serde_json::Value>> = Vec::new();

        while let Some(row) = rows_result.next()? {
            let mut map = HashMap::with_capacity(column_names.len());
            for (i, col_name) in column_names.iter().enumerate() {
                let value = convert_value_ref(row.get_ref(i)?);
                map.insert(col_name.clone(), value);
            }
            out.push(map);
        }

        Ok(out)
    }

    /// Execute SQL and deserialize each row into type `T`.
    pub fn execute_into<T: DeserializeOwned>(
        &self,
        sql: &str,
        params: &[String],
    ) -> Result<Vec<T>> {
        let rows = self.execute(sql, params)?;
        let mut results = Vec::with_capacity(rows.len());
        for row in rows {
            let value = serde_json::Value::Object(row.into_iter().collect());
            results.push(serde_json::from_value(value)?);
        }
        Ok(results)
    }

    /// Like [`execute_into`](Self::execute_into), but rows where `required`
    /// is NULL are skipped with a warning instead of failing the read.
    ///
    /// DuckDB NaN values also come back as NULL here.
    pub fn execute_into_present<T: DeserializeOwned>(
        &self,
        sql: &str,
        params: &[String],
        required: &str,
    ) -> Result<Vec<T>> {
        let rows = self.execute(sql, params)?;
        let mut results = Vec::with_capacity(rows.len());
        for row in rows {
            if row.get(required).map_or(true, serde_json::Value::is_null) {
                warn!(
                    id = %row.get("id").unwrap_or(&serde_json::Value::Null),
                    column = required,
                    "skipping row without a value"
                );
                continue;
            }
            let value = serde_json::Value::Object(row.into_iter().collect());
            results.push(serde_json::from_value(value)?);
        }
        Ok(results)
    }

    /// Execute SQL and return the first column of the first row.
    ///
    /// Returns `None` if the result set is empty.
    pub fn execute_scalar(
        &self,
        sql: &str,
        params: &[String],
    ) -> Result<Option<serde_json::Value>> {
        let mut stmt = self.conn.prepare(sql)?;
        let param_values: Vec<&dyn duckdb::ToSql> = params
            .iter()
            .map(|p| p as &dyn duckdb::ToSql)
            .collect();

        let mut rows = stmt.query(param_values.as_slice())?;

        if let Some(row) = rows.next()? {
            Ok(Some(convert_value_ref(row.get_ref(0)?)))
        } else {
            Ok(None)
        }
    }

    /// Create a DuckDB table from a newline-delimited JSON file.
    ///
    /// Known collections get their typed schema from
    /// [`config::collection_columns`]; anything else is auto-detected.
    /// Gzip-compressed files (`.gz`) are read transparently.
    pub fn register_table_from_ndjson(&self, table_name: &str, ndjson_path: &str) -> Result<()> {
        let path = Path::new(ndjson_path);
        let has_rows = fs_len(path)? > 0;
        self.load_table(table_name, ndjson_path, has_rows)
    }

    /// Check whether a table has been registered.
    pub fn has_table(&self, name: &str) -> bool {
        self.registered_tables.borrow().contains(name)
    }

    /// Return a list of all registered table names.
    pub fn tables(&self) -> Vec<String> {
        let mut names: Vec<String> = self.registered_tables.borrow().iter().cloned().collect();
        names.sort();
        names
    }

    /// Clear all registered tables so they will be re-created on next access.
    pub fn reset_tables(&self) {
        self.registered_tables.borrow_mut().clear();
    }

    /// Access the underlying DuckDB connection for advanced usage.
    pub fn raw(&self) -> &DuckDbConnection {
        &self.conn
    }

    /// Lazily register a collection snapshot as a DuckDB table.
    fn ensure_table(&self, table_name: &str) -> Result<()> {
        if self.registered_tables.borrow().contains(table_name) {
            return Ok(());
        }

        let snapshot = self.cache.borrow_mut().ensure_snapshot(table_name)?;
        // Use forward slashes for DuckDB compatibility
        let path_str = snapshot.path.to_string_lossy().replace('\\', "/");
        self.load_table(table_name, &path_str, snapshot.rows > 0)
    }

    fn load_table(&self, table_name: &str, path: &str, has_rows: bool) -> Result<()> {
        let path_sql = quote_literal(&path.replace('\\', "/"));

        match config::collection_columns(table_name) {
            Some(columns) => {
                let ddl = columns
                    .iter()
                    .map(|(name, ty)| format!("\"{}\" {}", name, ty))
                    .collect::<Vec<_>>()
                    .join(", ");
                self.conn.execute_batch(&format!(
                    "CREATE OR REPLACE TABLE {} ({})",
                    table_name, ddl
                ))?;

                if has_rows {
                    let names = columns
                        .iter()
                        .map(|(name, _)| format!("\"{}\"", name))
                        .collect::<Vec<_>>()
                        .join(", ");
                    let schema = columns
                        .iter()
                        .map(|(name, ty)| format!("'{}': '{}'", name, ty))
                        .collect::<Vec<_>>()
                        .join(", ");
                    self.conn.execute_batch(&format!(
                        "INSERT INTO {} SELECT {} FROM read_json({}, \
                         format = 'newline_delimited', columns = {{{}}})",
                        table_name, names, path_sql, schema
                    ))?;
                }
            }
            None => {
                self.conn.execute_batch(&format!(
                    "CREATE OR REPLACE TABLE {} AS SELECT * FROM read_json_auto({}, \
                     format = 'newline_delimited')",
                    table_name, path_sql
                ))?;
            }
        }

        self.registered_tables
            .borrow_mut()
            .insert(table_name.to_string());
        debug!(table = table_name, path, "registered table");
        Ok(())
    }
}

fn fs_len(path: &Path) -> Result<u64> {
    Ok(std::fs::metadata(path)?.len())
}

fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Convert a DuckDB `ValueRef` to a `serde_json::Value`.
fn convert_value_ref(val: ValueRef<'_>) -> serde_json::Value {
    match val {
        ValueRef::Null => serde_json::Value::Null,
        ValueRef::Boolean(b) => serde_json::Value::Bool(b),
        ValueRef::TinyInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::SmallInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::Int(n) => serde_json::Value::Number(n.into()),
        ValueRef::BigInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::UTinyInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::USmallInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::UInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::UBigInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::HugeInt(n) => {
            // HugeInt may not fit in i64; try i64, fallback to string
            if let Ok(i) = i64::try_from(n) {
                serde_json::Value::Number(i.into())
            } else {
                serde_json::Value::String(n.to_string())
            }
        }
        ValueRef::Float(f) => serde_json::Number::from_f64(f64::from(f))
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        ValueRef::Double(f) => serde_json::Number::from_f64(f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        ValueRef::Text(bytes) => serde_json::Value::String(String::from_utf8_lossy(bytes).to_string()),
        // Collections never carry blobs, dates or nested types: dates are VARCHAR
        _ => serde_json::Value::Null,
    }
}
