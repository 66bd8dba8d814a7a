//! # Dataset Retrieval Service
//!
//! Serves the canonical product dataset for the `GET /api/dataset` endpoint.
//!
//! ## Workflow
//!
//! 1.  **Cache read**: The handler opens the SQLite cache and reads the
//!     single row kept for the canonical URL.
//! 2.  **Freshness gate**: When the row exists and is inside the 24-hour
//!     window (`common::freshness`), its body is served without any
//!     upstream traffic.
//! 3.  **Refresh**: Otherwise the dataset is fetched from the upstream host,
//!     the row is replaced wholesale with a fresh capture timestamp, and the
//!     new body is served.
//! 4.  **Degradation**: When the upstream fetch fails but a stale copy is on
//!     hand, the stale copy is served and the failure logged; with no copy
//!     at all the handler answers `503 Service Unavailable`.
//!
//! The upstream fetch sits behind the `UpstreamFetcher` seam so the serve
//! path can be exercised without a network.

use actix_web::web;
use common::{freshness, DATASET_URL};
use log::{info, warn};

use super::store::{now_ms, DatasetStore, StoredDataset};
use super::DatasetState;

/// Downloads the canonical dataset from upstream.
#[allow(async_fn_in_trait)]
pub trait UpstreamFetcher {
    async fn fetch_dataset(&self) -> Result<String, String>;
}

impl UpstreamFetcher for reqwest::Client {
    async fn fetch_dataset(&self) -> Result<String, String> {
        let response = self
            .get(DATASET_URL)
            .send()
            .await
            .map_err(|e| e.to_string())?
            .error_for_status()
            .map_err(|e| e.to_string())?;
        response.text().await.map_err(|e| e.to_string())
    }
}

/// Actix web handler for `GET /api/dataset`.
pub async fn process(state: web::Data<DatasetState>) -> impl actix_web::Responder {
    let served = match DatasetStore::open(&state.db_path) {
        Ok(store) => serve_dataset(&store, &state.http, now_ms()).await,
        Err(e) => Err(e),
    };

    match served {
        Ok(body) => actix_web::HttpResponse::Ok()
            .content_type("application/json")
            .body(body),
        Err(e) => actix_web::HttpResponse::ServiceUnavailable()
            .body(format!("Error retrieving dataset: {}", e)),
    }
}

/// What the serve path should do given the cached row and the current time.
#[derive(Debug, PartialEq)]
enum ServePlan {
    /// The cached body is fresh; serve it without an upstream call.
    FromCache(String),
    /// Refresh from upstream; `stale` is the fallback copy, if any.
    Refresh { stale: Option<StoredDataset> },
}

fn plan_serve(cached: Option<StoredDataset>, now_ms: u64) -> ServePlan {
    match cached {
        Some(entry) if !freshness::is_stale(Some(entry.fetched_at_ms), now_ms) => {
            ServePlan::FromCache(entry.body)
        }
        stale => ServePlan::Refresh { stale },
    }
}

async fn serve_dataset(
    store: &DatasetStore,
    upstream: &impl UpstreamFetcher,
    now_ms: u64,
) -> Result<String, String> {
    let cached = store.read(DATASET_URL)?;

    match plan_serve(cached, now_ms) {
        ServePlan::FromCache(body) => Ok(body),
        ServePlan::Refresh { stale } => match upstream.fetch_dataset().await {
            Ok(body) => {
                store.write(DATASET_URL, &body, now_ms)?;
                info!("dataset refreshed from upstream ({} bytes)", body.len());
                Ok(body)
            }
            Err(reason) => {
                warn!("upstream dataset fetch failed: {}", reason);
                match stale {
                    Some(entry) => {
                        info!("serving stale cached dataset");
                        Ok(entry.body)
                    }
                    None => Err(reason),
                }
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::freshness::FRESHNESS_WINDOW_MS;
    use std::cell::Cell;

    const NOW: u64 = 1_700_000_000_000;

    fn stored(body: &str, fetched_at_ms: u64) -> StoredDataset {
        StoredDataset { body: body.to_string(), fetched_at_ms }
    }

    fn open_temp() -> (tempfile::TempDir, DatasetStore) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.sqlite");
        let store = DatasetStore::open(path.to_str().unwrap()).unwrap();
        (dir, store)
    }

    /// Counts upstream calls so tests can assert on network traffic.
    struct StubUpstream {
        calls: Cell<u32>,
        result: Result<String, String>,
    }

    impl StubUpstream {
        fn ok(body: &str) -> Self {
            Self { calls: Cell::new(0), result: Ok(body.to_string()) }
        }

        fn failing() -> Self {
            Self {
                calls: Cell::new(0),
                result: Err("connection refused".to_string()),
            }
        }
    }

    impl UpstreamFetcher for StubUpstream {
        async fn fetch_dataset(&self) -> Result<String, String> {
            self.calls.set(self.calls.get() + 1);
            self.result.clone()
        }
    }

    #[test]
    fn fresh_row_is_served_from_cache() {
        let plan = plan_serve(Some(stored("cached body", NOW - 1_000)), NOW);
        assert_eq!(plan, ServePlan::FromCache("cached body".to_string()));
    }

    #[test]
    fn stale_row_triggers_refresh_with_fallback() {
        let entry = stored("old body", NOW - FRESHNESS_WINDOW_MS - 1);
        let plan = plan_serve(Some(entry.clone()), NOW);
        assert_eq!(plan, ServePlan::Refresh { stale: Some(entry) });
    }

    #[test]
    fn missing_row_triggers_refresh_without_fallback() {
        let plan = plan_serve(None, NOW);
        assert_eq!(plan, ServePlan::Refresh { stale: None });
    }

    #[actix_web::test]
    async fn fresh_cache_is_served_without_upstream_traffic() {
        let (_dir, store) = open_temp();
        store.write(DATASET_URL, "cached body", NOW - 1_000).unwrap();
        let upstream = StubUpstream::ok("upstream body");

        let body = serve_dataset(&store, &upstream, NOW).await.unwrap();
        assert_eq!(body, "cached body");
        assert_eq!(upstream.calls.get(), 0);
    }

    #[actix_web::test]
    async fn empty_cache_fetches_and_stores_the_body() {
        let (_dir, store) = open_temp();
        let upstream = StubUpstream::ok("upstream body");

        let body = serve_dataset(&store, &upstream, NOW).await.unwrap();
        assert_eq!(body, "upstream body");
        assert_eq!(upstream.calls.get(), 1);

        let row = store.read(DATASET_URL).unwrap().unwrap();
        assert_eq!(row.body, "upstream body");
        assert_eq!(row.fetched_at_ms, NOW);
    }

    #[actix_web::test]
    async fn stale_cache_is_replaced_wholesale_on_refresh() {
        let (_dir, store) = open_temp();
        store
            .write(DATASET_URL, "old body", NOW - FRESHNESS_WINDOW_MS - 1)
            .unwrap();
        let upstream = StubUpstream::ok("new body");

        let body = serve_dataset(&store, &upstream, NOW).await.unwrap();
        assert_eq!(body, "new body");
        assert_eq!(store.read(DATASET_URL).unwrap().unwrap().body, "new body");
    }

    #[actix_web::test]
    async fn upstream_failure_serves_the_stale_copy() {
        let (_dir, store) = open_temp();
        store
            .write(DATASET_URL, "old body", NOW - FRESHNESS_WINDOW_MS - 1)
            .unwrap();
        let upstream = StubUpstream::failing();

        let body = serve_dataset(&store, &upstream, NOW).await.unwrap();
        assert_eq!(body, "old body");
        // The stale row is left in place, not dropped.
        assert_eq!(store.read(DATASET_URL).unwrap().unwrap().body, "old body");
    }

    #[actix_web::test]
    async fn upstream_failure_without_any_copy_is_an_error() {
        let (_dir, store) = open_temp();
        let upstream = StubUpstream::failing();

        let err = serve_dataset(&store, &upstream, NOW).await.unwrap_err();
        assert_eq!(err, "connection refused");
    }
}
