//! # Dataset Proxy Module
//!
//! This module aggregates the API endpoints that expose the canonical
//! product/price dataset to the frontend. The upstream host cannot be relied
//! on for CORS, so the backend fetches the dataset itself and serves it
//! same-origin, keeping a single SQLite-cached copy that is replaced
//! wholesale whenever it outlives the shared 24-hour freshness window.
//!
//! ## Sub-modules:
//! - `get`: Serves the dataset body, from cache when fresh, refreshing from
//!   upstream when stale or missing.
//! - `status`: Reports the freshness of the cached copy as JSON.
//! - `store`: The single-row SQLite cache the two handlers read and write.

mod get;
mod status;
pub mod store;

use actix_web::web::{get, scope};
use actix_web::Scope;

/// The base path for the dataset API endpoints.
const API_PATH: &str = "/api/dataset";

/// Default SQLite file holding the cached dataset copy.
const DB_PATH: &str = "dealspion.sqlite";

/// Shared state for the dataset handlers: where the cache lives and the
/// HTTP client used for upstream fetches.
#[derive(Clone)]
pub struct DatasetState {
    pub db_path: String,
    pub http: reqwest::Client,
}

impl DatasetState {
    pub fn new() -> Self {
        Self {
            db_path: DB_PATH.to_string(),
            http: reqwest::Client::new(),
        }
    }
}

/// Configures and returns the Actix `Scope` for the dataset routes.
///
/// # Registered Routes:
///
/// *   **`GET /api/dataset`**:
///     - **Handler**: `get::process`
///     - **Description**: Returns the canonical dataset JSON. Served from
///       the SQLite cache while fresh; otherwise fetched from upstream and
///       the cached row replaced. When upstream is down and a stale copy
///       exists, the stale copy is served.
///
/// *   **`GET /api/dataset/status`**:
///     - **Handler**: `status::process`
///     - **Description**: Returns whether a cached copy exists, its capture
///       timestamp, its age, and whether it has expired.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(get::process))
        .route("/status", get().to(status::process))
}
