//! Price comparison SDK for Rust.
//!
//! Provides a high-level client for the data behind a price-comparison
//! storefront: products, categories, per-platform price offers, price
//! history and reviews. Collections are downloaded from the backend's REST
//! query surface, cached locally, and queried in-process via DuckDB.
//!
//! # Quick start
//!
//! ```no_run
//! use pricecompare_sdk::{best_offer, PriceCompareSdk, SortField, SortOrder, sort_offers};
//!
//! let sdk = PriceCompareSdk::builder()
//!     .backend_url("https://example.supabase.co")
//!     .api_key("anon-key")
//!     .build()
//!     .unwrap();
//!
//! let phones = sdk.products().search("phone").unwrap();
//! let offers = sdk.offers().for_product(&phones[0].id).unwrap();
//! let table = sort_offers(&offers, SortField::Price, SortOrder::Ascending);
//! if let Some(best) = best_offer(&table) {
//!     println!("from {} on {}", best.min_price, best.offer.platform);
//! }
//! ```

pub mod aggregate;
#[cfg(feature = "async")]
pub mod async_client;
pub mod cache;
pub mod config;
pub mod connection;
pub mod error;
pub mod models;
pub mod outcome;
pub mod queries;
pub mod session;
pub mod sort;
pub mod sql_builder;
pub mod view;

pub use aggregate::{best_offer, discount_magnitude, group_history_by_date, BestOffer, HistoryGroup};
#[cfg(feature = "async")]
pub use async_client::AsyncPriceCompareSdk;
pub use cache::CacheManager;
pub use connection::Connection;
pub use error::{PriceCompareError, Result};
pub use outcome::FetchOutcome;
pub use session::{CompareSession, ProductPage};
pub use sort::{sort_offers, SortField, SortOrder, SortState};
pub use sql_builder::SqlBuilder;
pub use view::{Completion, Generation, Ticket, ViewState};

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::info;

// ---------------------------------------------------------------------------
// PriceCompareSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`PriceCompareSdk`] instance.
///
/// Use [`PriceCompareSdk::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](PriceCompareSdkBuilder::build) to create the SDK.
#[derive(Debug, Clone)]
pub struct PriceCompareSdkBuilder {
    backend_url: Option<String>,
    api_key: Option<String>,
    cache_dir: Option<PathBuf>,
    offline: bool,
    timeout: Duration,
    max_age: Duration,
}

impl Default for PriceCompareSdkBuilder {
    fn default() -> Self {
        Self {
            backend_url: None,
            api_key: None,
            cache_dir: None,
            offline: false,
            timeout: config::DEFAULT_TIMEOUT,
            max_age: config::DEFAULT_MAX_AGE,
        }
    }
}

impl PriceCompareSdkBuilder {
    /// Start from the environment (and a `.env` file, if present).
    ///
    /// Reads `PRICECOMPARE_BACKEND_URL`, `PRICECOMPARE_API_KEY`,
    /// `PRICECOMPARE_CACHE_DIR` and `PRICECOMPARE_OFFLINE` (`1`/`true`).
    /// Unset variables leave the defaults in place.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        let mut builder = Self::default();
        if let Ok(url) = std::env::var(config::ENV_BACKEND_URL) {
            builder = builder.backend_url(&url);
        }
        if let Ok(key) = std::env::var(config::ENV_API_KEY) {
            builder = builder.api_key(&key);
        }
        if let Ok(dir) = std::env::var(config::ENV_CACHE_DIR) {
            builder = builder.cache_dir(dir);
        }
        if let Ok(flag) = std::env::var(config::ENV_OFFLINE) {
            builder = builder.offline(matches!(
                flag.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes"
            ));
        }
        builder
    }

    /// Base URL of the backend service (e.g. `https://xyz.supabase.co`).
    pub fn backend_url(mut self, url: &str) -> Self {
        self.backend_url = Some(url.to_string());
        self
    }

    /// Public API key sent as `apikey` and bearer token.
    pub fn api_key(mut self, key: &str) -> Self {
        self.api_key = Some(key.to_string());
        self
    }

    /// Set a custom cache directory.
    ///
    /// If not set, the platform-appropriate default cache directory is used
    /// (e.g. `~/.cache/pricecompare-sdk` on Linux).
    pub fn cache_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.cache_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Enable or disable offline mode.
    ///
    /// When offline, the SDK never contacts the backend and only uses
    /// previously cached snapshots. Defaults to `false`.
    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    /// Set the HTTP request timeout. Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set how long a cached snapshot is served before re-downloading.
    /// Defaults to 5 minutes.
    pub fn max_age(mut self, max_age: Duration) -> Self {
        self.max_age = max_age;
        self
    }

    /// Build the SDK, initializing the cache and DuckDB connection.
    ///
    /// No snapshot is downloaded here; collections are fetched lazily on
    /// first query. Fails with [`PriceCompareError::Config`] when neither a
    /// backend URL nor offline mode is set.
    pub fn build(self) -> Result<PriceCompareSdk> {
        if self.backend_url.is_none() && !self.offline {
            return Err(PriceCompareError::Config(format!(
                "a backend URL is required unless offline mode is enabled (set {})",
                config::ENV_BACKEND_URL
            )));
        }

        let mut cache = CacheManager::new(self.cache_dir, self.offline, self.timeout)?
            .with_max_age(self.max_age);
        if let Some(url) = self.backend_url.as_deref() {
            cache = cache.with_backend(url, self.api_key.as_deref());
        }
        let conn = Connection::new(cache)?;
        Ok(PriceCompareSdk { conn })
    }
}

// ---------------------------------------------------------------------------
// PriceCompareSdk
// ---------------------------------------------------------------------------

/// The main entry point for the price comparison SDK.
///
/// Wraps a [`Connection`] (which owns the [`CacheManager`] and DuckDB database)
/// and exposes domain-specific query interfaces as lightweight borrowing wrappers.
pub struct PriceCompareSdk {
    conn: Connection,
}

impl PriceCompareSdk {
    /// Create a new builder for configuring the SDK.
    pub fn builder() -> PriceCompareSdkBuilder {
        PriceCompareSdkBuilder::default()
    }

    /// Wrap an existing connection, e.g. one with tables registered by hand.
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    // -- Query accessors ---------------------------------------------------

    /// Access the product query interface.
    pub fn products(&self) -> queries::ProductQuery<'_> {
        queries::ProductQuery::new(&self.conn)
    }

    /// Access the category query interface.
    pub fn categories(&self) -> queries::CategoryQuery<'_> {
        queries::CategoryQuery::new(&self.conn)
    }

    /// Access the price offer query interface.
    pub fn offers(&self) -> queries::OfferQuery<'_> {
        queries::OfferQuery::new(&self.conn)
    }

    /// Access the price history query interface.
    pub fn history(&self) -> queries::HistoryQuery<'_> {
        queries::HistoryQuery::new(&self.conn)
    }

    /// Access the review query interface.
    ///
    /// Review reads also load the `users` collection to resolve author names.
    pub fn reviews(&self) -> queries::ReviewQuery<'_> {
        queries::ReviewQuery::new(&self.conn)
    }

    /// Access the product specification query interface.
    pub fn specifications(&self) -> queries::SpecificationQuery<'_> {
        queries::SpecificationQuery::new(&self.conn)
    }

    /// Access the product page read-model builder.
    pub fn detail(&self) -> queries::DetailQuery<'_> {
        queries::DetailQuery::new(&self.conn)
    }

    /// Access the landing page feed builder.
    pub fn feed(&self) -> queries::FeedQuery<'_> {
        queries::FeedQuery::new(&self.conn)
    }

    // -- Utility methods ---------------------------------------------------

    /// Return the list of currently registered DuckDB table names.
    ///
    /// Tables are registered lazily on first query, so this list grows as
    /// different query interfaces are used.
    pub fn tables(&self) -> Vec<String> {
        self.conn.tables()
    }

    /// Execute a raw SQL query against the DuckDB database.
    ///
    /// Only tables already registered are visible.
    pub fn sql(
        &self,
        query: &str,
        params: &[String],
    ) -> Result<Vec<HashMap<String, serde_json::Value>>> {
        self.conn.execute(query, params)
    }

    /// Drop every cached snapshot marker and registered table if any
    /// snapshot has gone stale.
    ///
    /// Returns `true` if data was stale (subsequent queries re-download),
    /// `false` if everything was fresh.
    pub fn refresh(&self) -> Result<bool> {
        let stale = self.conn.cache.borrow().any_stale();
        if stale {
            self.conn.cache.borrow().invalidate()?;
            self.conn.reset_tables();
            info!("snapshots were stale; markers cleared and tables reset");
        }
        Ok(stale)
    }

    /// Consume the SDK and release all resources.
    pub fn close(self) {
        drop(self);
    }

    /// Return a reference to the underlying [`Connection`] for advanced usage.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for PriceCompareSdk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tables = self.conn.tables();
        let cache = self.conn.cache.borrow();
        write!(
            f,
            "PriceCompareSdk(cache_dir={}, tables=[{}], offline={})",
            cache.cache_dir.display(),
            tables.join(", "),
            cache.offline
        )
    }
}
