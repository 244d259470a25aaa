//! Backend snapshot download and local file cache manager.
//!
//! Each backend collection is fetched as a whole through the PostgREST query
//! surface, stored as gzip-compressed NDJSON and re-fetched once it is older
//! than the configured maximum age. Snapshots are downloaded lazily on first
//! access.

use crate::config;
use crate::error::{PriceCompareError, Result};
use chrono::{DateTime, Utc};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

/// Sync marker written next to each snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncRecord {
    pub synced_at: DateTime<Utc>,
    pub rows: usize,
}

/// A locally cached collection snapshot.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub path: PathBuf,
    pub rows: usize,
}

/// Downloads and caches backend collection snapshots.
pub struct CacheManager {
    /// Directory where cached files are stored.
    pub cache_dir: PathBuf,
    /// If true, never contact the backend (use cached snapshots only).
    pub offline: bool,
    backend_url: Option<String>,
    api_key: Option<String>,
    timeout: Duration,
    max_age: Duration,
    client: Option<Client>,
}

impl CacheManager {
    /// Create a new cache manager.
    ///
    /// If `cache_dir` is `None`, uses the platform-appropriate default cache directory.
    /// Creates the cache directory if it does not exist.
    pub fn new(cache_dir: Option<PathBuf>, offline: bool, timeout: Duration) -> Result<Self> {
        let dir = cache_dir.unwrap_or_else(config::default_cache_dir);
        fs::create_dir_all(&dir)?;
        Ok(Self {
            cache_dir: dir,
            offline,
            backend_url: None,
            api_key: None,
            timeout,
            max_age: config::DEFAULT_MAX_AGE,
            client: None,
        })
    }

    /// Point the cache at a backend and the key sent with every request.
    pub fn with_backend(mut self, url: &str, api_key: Option<&str>) -> Self {
        self.backend_url = Some(url.trim_end_matches('/').to_string());
        self.api_key = api_key.map(str::to_string);
        self
    }

    /// Set how long a snapshot is considered fresh.
    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = max_age;
        self
    }

    /// Lazy HTTP client, created on first use.
    pub fn client(&mut self) -> Result<&Client> {
        if self.client.is_none() {
            let client = Client::builder()
                .timeout(self.timeout)
                .redirect(reqwest::redirect::Policy::limited(10))
                .build()?;
            self.client = Some(client);
        }
        self.client
            .as_ref()
            .ok_or_else(|| PriceCompareError::Config("HTTP client unavailable".into()))
    }

    /// Local path of the snapshot for `table`.
    pub fn snapshot_path(&self, table: &str) -> PathBuf {
        self.cache_dir.join(format!("{table}.ndjson.gz"))
    }

    fn marker_path(&self, table: &str) -> PathBuf {
        self.cache_dir.join(format!("{table}.synced"))
    }

    /// Read the sync marker for `table`, if one exists and is readable.
    pub fn sync_record(&self, table: &str) -> Option<SyncRecord> {
        let contents = fs::read_to_string(self.marker_path(table)).ok()?;
        serde_json::from_str(&contents).ok()
    }

    fn save_sync_record(&self, table: &str, rows: usize) -> Result<()> {
        let record = SyncRecord {
            synced_at: Utc::now(),
            rows,
        };
        fs::write(self.marker_path(table), serde_json::to_string(&record)?)?;
        Ok(())
    }

    /// Check if the local snapshot of `table` is missing or older than the
    /// maximum age.
    pub fn is_stale(&self, table: &str) -> bool {
        let Some(record) = self.sync_record(table) else {
            return true;
        };
        if !self.snapshot_path(table).exists() {
            return true;
        }
        let age = Utc::now().signed_duration_since(record.synced_at);
        match age.to_std() {
            Ok(age) => age > self.max_age,
            // Marker from the future (clock skew); treat as fresh.
            Err(_) => false,
        }
    }

    /// Check whether any known collection has a stale snapshot on disk.
    pub fn any_stale(&self) -> bool {
        config::collections()
            .iter()
            .any(|table| self.snapshot_path(table).exists() && self.is_stale(table))
    }

    fn collection_url(&self, table: &str) -> Result<String> {
        let base = self.backend_url.as_deref().ok_or_else(|| {
            PriceCompareError::Config("no backend URL configured".into())
        })?;
        Ok(format!("{}/{}/{}?select=*", base, config::REST_PATH, table))
    }

    /// Download the full contents of one collection and store it as a
    /// compressed NDJSON snapshot.
    ///
    /// Writes to a temp file in the cache directory first and persists it on
    /// success, so an interrupted download never leaves a partial snapshot.
    fn download_snapshot(&mut self, table: &str, dest: &Path) -> Result<usize> {
        let url = self.collection_url(table)?;
        debug!(table, %url, "downloading snapshot");

        let api_key = self.api_key.clone();
        let client = self.client()?.clone();
        let mut request = client.get(&url).header("Accept", "application/json");
        if let Some(key) = api_key.as_deref() {
            request = request
                .header("apikey", key)
                .header("Authorization", format!("Bearer {key}"));
        }
        let rows: Vec<serde_json::Value> = request.send()?.error_for_status()?.json()?;

        let tmp = tempfile::NamedTempFile::new_in(&self.cache_dir)?;
        let mut encoder = GzEncoder::new(tmp, Compression::default());
        for row in &rows {
            serde_json::to_writer(&mut encoder, row)?;
            encoder.write_all(b"\n")?;
        }
        let tmp = encoder.finish()?;
        tmp.persist(dest).map_err(|e| PriceCompareError::Io(e.error))?;

        debug!(table, rows = rows.len(), "snapshot stored");
        Ok(rows.len())
    }

    /// Ensure a snapshot of `table` is cached locally, downloading if needed.
    ///
    /// # Arguments
    ///
    /// * `table` - Backend collection name (e.g. `"products"`, `"price_data"`).
    ///
    /// # Returns
    ///
    /// The cached snapshot's path and row count.
    pub fn ensure_snapshot(&mut self, table: &str) -> Result<Snapshot> {
        if config::collection_columns(table).is_none() {
            return Err(PriceCompareError::NotFound(format!(
                "Unknown collection: {}",
                table
            )));
        }

        let path = self.snapshot_path(table);

        if self.is_stale(table) {
            if self.offline {
                if path.exists() {
                    let rows = match self.sync_record(table) {
                        Some(record) => record.rows,
                        None => count_rows(&path)?,
                    };
                    return Ok(Snapshot { path, rows });
                }
                return Err(PriceCompareError::NotFound(format!(
                    "Snapshot of {} not cached and offline mode is enabled",
                    table
                )));
            }
            let rows = self.download_snapshot(table, &path)?;
            self.save_sync_record(table, rows)?;
            return Ok(Snapshot { path, rows });
        }

        let rows = self.sync_record(table).map_or(0, |r| r.rows);
        Ok(Snapshot { path, rows })
    }

    /// Load and parse every row of a cached snapshot.
    ///
    /// If the snapshot is corrupt (truncated download, disk error), it is
    /// deleted together with its sync marker so the next call re-downloads.
    pub fn load_snapshot(&mut self, table: &str) -> Result<Vec<serde_json::Value>> {
        let snapshot = self.ensure_snapshot(table)?;

        let parse_result = (|| -> Result<Vec<serde_json::Value>> {
            let file = fs::File::open(&snapshot.path)?;
            let reader = BufReader::new(GzDecoder::new(file));
            let mut rows = Vec::with_capacity(snapshot.rows);
            for line in reader.lines() {
                let line = line?;
                if line.trim().is_empty() {
                    continue;
                }
                rows.push(serde_json::from_str(&line)?);
            }
            Ok(rows)
        })();

        match parse_result {
            Ok(rows) => Ok(rows),
            Err(e) => {
                warn!(path = %snapshot.path.display(), error = %e, "corrupt snapshot, removing");
                let _ = fs::remove_file(&snapshot.path);
                let _ = fs::remove_file(self.marker_path(table));
                Err(PriceCompareError::NotFound(format!(
                    "Snapshot of '{}' was corrupt and has been removed. \
                     Retry to re-download. Original error: {}",
                    table, e
                )))
            }
        }
    }

    /// Forget every sync marker so the next access re-downloads.
    pub fn invalidate(&self) -> Result<()> {
        for table in config::collections() {
            let marker = self.marker_path(table);
            if marker.exists() {
                fs::remove_file(marker)?;
            }
        }
        Ok(())
    }

    /// Remove all cached files and recreate the cache directory.
    pub fn clear(&self) -> Result<()> {
        if self.cache_dir.exists() {
            fs::remove_dir_all(&self.cache_dir)?;
            fs::create_dir_all(&self.cache_dir)?;
        }
        Ok(())
    }

    /// Close the HTTP client, if open.
    pub fn close(&mut self) {
        self.client = None;
    }
}

/// Count the non-blank lines of a compressed snapshot that has no marker.
fn count_rows(path: &Path) -> Result<usize> {
    let reader = BufReader::new(GzDecoder::new(fs::File::open(path)?));
    let mut rows = 0;
    for line in reader.lines() {
        if !line?.trim().is_empty() {
            rows += 1;
        }
    }
    Ok(rows)
}
