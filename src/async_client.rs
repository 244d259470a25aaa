//! Async wrapper around [`PriceCompareSdk`] for use in async runtimes (Tokio, etc.).
//!
//! Runs all SDK operations on a blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free.
//!
//! # Example
//!
//! ```no_run
//! use pricecompare_sdk::{AsyncPriceCompareSdk, CompareSession, FetchOutcome};
//!
//! async fn search(sdk: &AsyncPriceCompareSdk, page: &mut CompareSession) {
//!     let ticket = page.begin_search();
//!     let result = sdk.run(|s| s.products().search("phone")).await;
//!     // Dropped silently if another search started in the meantime
//!     page.finish_search(ticket, FetchOutcome::from(result));
//! }
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::error::{PriceCompareError, Result};
use crate::{PriceCompareSdk, PriceCompareSdkBuilder};

// ---------------------------------------------------------------------------
// AsyncPriceCompareSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for an [`AsyncPriceCompareSdk`]; takes the same settings as the
/// blocking builder.
#[derive(Debug, Clone, Default)]
pub struct AsyncPriceCompareSdkBuilder {
    inner: PriceCompareSdkBuilder,
}

impl AsyncPriceCompareSdkBuilder {
    /// Start from the environment; see [`PriceCompareSdkBuilder::from_env`].
    pub fn from_env() -> Self {
        Self {
            inner: PriceCompareSdkBuilder::from_env(),
        }
    }

    pub fn backend_url(mut self, url: &str) -> Self {
        self.inner = self.inner.backend_url(url);
        self
    }

    pub fn api_key(mut self, key: &str) -> Self {
        self.inner = self.inner.api_key(key);
        self
    }

    pub fn cache_dir<P: AsRef<std::path::Path>>(mut self, path: P) -> Self {
        self.inner = self.inner.cache_dir(path);
        self
    }

    pub fn offline(mut self, offline: bool) -> Self {
        self.inner = self.inner.offline(offline);
        self
    }

    pub fn timeout(mut self, timeout: std::time::Duration) -> Self {
        self.inner = self.inner.timeout(timeout);
        self
    }

    pub fn max_age(mut self, max_age: std::time::Duration) -> Self {
        self.inner = self.inner.max_age(max_age);
        self
    }

    /// Build the async SDK on the blocking thread pool.
    pub async fn build(self) -> Result<AsyncPriceCompareSdk> {
        tokio::task::spawn_blocking(move || {
            let sdk = self.inner.build()?;
            Ok(AsyncPriceCompareSdk {
                inner: Arc::new(Mutex::new(sdk)),
            })
        })
        .await
        .map_err(|e| PriceCompareError::InvalidArgument(format!("Task join error: {e}")))?
    }
}

// ---------------------------------------------------------------------------
// AsyncPriceCompareSdk
// ---------------------------------------------------------------------------

/// Async wrapper around [`PriceCompareSdk`].
///
/// The underlying SDK uses `RefCell` internally, so it sits behind a
/// [`Mutex`] and every call runs on a blocking thread. Calls from different
/// views serialize on that lock; pair them with
/// [`ViewState`](crate::ViewState) tickets so late responses are discarded.
#[derive(Clone)]
pub struct AsyncPriceCompareSdk {
    inner: Arc<Mutex<PriceCompareSdk>>,
}

impl AsyncPriceCompareSdk {
    pub fn builder() -> AsyncPriceCompareSdkBuilder {
        AsyncPriceCompareSdkBuilder::default()
    }

    /// Run a sync SDK operation on the blocking thread pool.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&PriceCompareSdk) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let sdk = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let guard = sdk
                .lock()
                .map_err(|_| PriceCompareError::InvalidArgument("SDK lock poisoned".into()))?;
            f(&guard)
        })
        .await
        .map_err(|e| PriceCompareError::InvalidArgument(format!("Task join error: {e}")))?
    }

    /// Execute a raw SQL query asynchronously.
    pub async fn sql(
        &self,
        query: &str,
        params: &[String],
    ) -> Result<Vec<HashMap<String, serde_json::Value>>> {
        let query = query.to_string();
        let params = params.to_vec();
        self.run(move |s| s.sql(&query, &params)).await
    }

    /// Check snapshot freshness and reset tables if stale.
    pub async fn refresh(&self) -> Result<bool> {
        self.run(|s| s.refresh()).await
    }

    pub async fn tables(&self) -> Result<Vec<String>> {
        self.run(|s| Ok(s.tables())).await
    }
}
