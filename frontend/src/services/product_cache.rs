//! Freshness-gated cache for the canonical product dataset.
//!
//! The cache owns exactly one entry: the last-fetched dataset body together
//! with its capture timestamp. A read within the 24-hour freshness window is
//! served from the store without touching the network; a stale or missing
//! entry triggers a fetch that replaces the entry wholesale. Clock, store and
//! fetcher are injected so the staleness logic runs deterministically under
//! test, without real timers or a browser.
//!
//! Concurrent refresh triggers (startup prewarm overlapping a page load) are
//! not deduplicated: the store is a plain key overwrite, the last writer
//! wins.

use std::fmt;

use common::freshness;

/// Relative URL the browser fetcher reads the dataset from. The backend
/// proxies it to [`common::DATASET_URL`].
pub const DATASET_ROUTE: &str = "/api/dataset";

/// The single cached value: raw dataset body plus its capture time.
#[derive(Clone, Debug, PartialEq)]
pub struct CacheEntry {
    pub body: String,
    /// Epoch milliseconds at which `body` was fetched.
    pub fetched_at_ms: u64,
}

/// Cache storage errors.
#[derive(Debug, Clone, PartialEq)]
pub enum CacheError {
    /// localStorage not available.
    StorageUnavailable,
    /// Failed to write to storage.
    WriteFailed,
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheError::StorageUnavailable => write!(f, "browser storage unavailable"),
            CacheError::WriteFailed => write!(f, "failed to write to browser storage"),
        }
    }
}

/// Errors surfaced by [`ProductCache::ensure_fresh`] and
/// [`ProductCache::prewarm`].
#[derive(Debug, Clone, PartialEq)]
pub enum FetchError {
    /// The network request failed or answered with a non-success status.
    Network(String),
    /// The body arrived but could not be stored.
    Store(CacheError),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Network(reason) => write!(f, "dataset fetch failed: {}", reason),
            FetchError::Store(e) => write!(f, "dataset fetched but not cached: {}", e),
        }
    }
}

/// Source of "now", in epoch milliseconds.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Backing store for the single cache entry.
pub trait CacheStore {
    fn read(&self) -> Option<CacheEntry>;
    fn write(&mut self, entry: &CacheEntry) -> Result<(), CacheError>;
}

/// Performs the actual dataset download.
#[allow(async_fn_in_trait)]
pub trait DatasetFetcher {
    async fn fetch(&self) -> Result<String, FetchError>;
}

/// The cache service: single read/write entry point over an injected store,
/// clock and fetcher.
pub struct ProductCache<S, C, F> {
    store: S,
    clock: C,
    fetcher: F,
}

impl<S, C, F> ProductCache<S, C, F>
where
    S: CacheStore,
    C: Clock,
    F: DatasetFetcher,
{
    pub fn new(store: S, clock: C, fetcher: F) -> Self {
        Self { store, clock, fetcher }
    }

    /// Whether the stored entry (if any) has outlived the freshness window.
    ///
    /// A missing entry, or one whose timestamp could not be read back, counts
    /// as expired.
    pub fn is_expired(&self) -> bool {
        let fetched_at = self.store.read().map(|entry| entry.fetched_at_ms);
        freshness::is_stale(fetched_at, self.clock.now_ms())
    }

    /// Returns a fresh dataset entry, fetching only when the stored one is
    /// expired or missing.
    ///
    /// On a failed refresh the previously stored entry is left untouched and
    /// the error is returned to the caller; there is no retry.
    pub async fn ensure_fresh(&mut self) -> Result<CacheEntry, FetchError> {
        if !self.is_expired() {
            if let Some(entry) = self.store.read() {
                return Ok(entry);
            }
        }
        self.refresh().await
    }

    /// Unconditionally fetches the dataset and replaces the stored entry,
    /// regardless of freshness. Used once on first run to pre-warm the cache.
    pub async fn prewarm(&mut self) -> Result<CacheEntry, FetchError> {
        self.refresh().await
    }

    /// Whether the store currently holds any entry at all.
    pub fn has_entry(&self) -> bool {
        self.store.read().is_some()
    }

    async fn refresh(&mut self) -> Result<CacheEntry, FetchError> {
        let body = self.fetcher.fetch().await?;
        let entry = CacheEntry {
            body,
            fetched_at_ms: self.clock.now_ms(),
        };
        self.store.write(&entry).map_err(FetchError::Store)?;
        Ok(entry)
    }
}

/// Wall clock backed by `Date.now()`.
pub struct BrowserClock;

impl Clock for BrowserClock {
    fn now_ms(&self) -> u64 {
        js_sys::Date::now() as u64
    }
}

/// Cache store on `window.localStorage`.
///
/// Body and capture timestamp live under two keys derived from the dataset
/// route, so the body is stored verbatim instead of being re-encoded. A
/// timestamp that fails to parse back reads as no entry, which the freshness
/// check treats as expired.
pub struct BrowserCacheStore {
    storage: web_sys::Storage,
}

impl BrowserCacheStore {
    pub fn new() -> Result<Self, CacheError> {
        let storage = web_sys::window()
            .and_then(|window| window.local_storage().ok().flatten())
            .ok_or(CacheError::StorageUnavailable)?;
        Ok(Self { storage })
    }

    fn body_key() -> String {
        format!("product-cache-v1:{}:body", DATASET_ROUTE)
    }

    fn fetched_at_key() -> String {
        format!("product-cache-v1:{}:fetched_at", DATASET_ROUTE)
    }
}

impl CacheStore for BrowserCacheStore {
    fn read(&self) -> Option<CacheEntry> {
        let body = self.storage.get_item(&Self::body_key()).ok()??;
        let fetched_at_ms = self
            .storage
            .get_item(&Self::fetched_at_key())
            .ok()??
            .parse::<u64>()
            .ok()?;
        Some(CacheEntry { body, fetched_at_ms })
    }

    fn write(&mut self, entry: &CacheEntry) -> Result<(), CacheError> {
        self.storage
            .set_item(&Self::body_key(), &entry.body)
            .map_err(|_| CacheError::WriteFailed)?;
        self.storage
            .set_item(&Self::fetched_at_key(), &entry.fetched_at_ms.to_string())
            .map_err(|_| CacheError::WriteFailed)
    }
}

/// Dataset download over the browser fetch API.
pub struct HttpDatasetFetcher {
    url: String,
}

impl HttpDatasetFetcher {
    pub fn new() -> Self {
        Self { url: DATASET_ROUTE.to_string() }
    }
}

impl DatasetFetcher for HttpDatasetFetcher {
    async fn fetch(&self) -> Result<String, FetchError> {
        let response = gloo_net::http::Request::get(&self.url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;
        if !response.ok() {
            return Err(FetchError::Network(format!(
                "unexpected status {}",
                response.status()
            )));
        }
        response
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))
    }
}

/// Browser-backed cache with the production store, clock and fetcher.
pub fn browser_cache() -> Result<ProductCache<BrowserCacheStore, BrowserClock, HttpDatasetFetcher>, CacheError> {
    Ok(ProductCache::new(
        BrowserCacheStore::new()?,
        BrowserClock,
        HttpDatasetFetcher::new(),
    ))
}

/// One-time startup prewarm: when the store holds no entry yet, fetch the
/// dataset unconditionally so the first search does not pay the download.
/// Failures are logged and swallowed; the page load path retries on its own
/// terms.
pub async fn prewarm_if_empty() {
    match browser_cache() {
        Ok(mut cache) => {
            if cache.has_entry() {
                return;
            }
            if let Err(e) = cache.prewarm().await {
                gloo_console::warn!("prewarm failed:", e.to_string());
            }
        }
        Err(e) => gloo_console::warn!("prewarm skipped:", e.to_string()),
    }
}
