pub mod freshness;
pub mod model;

/// Upstream endpoint serving the canonical product/price dataset.
///
/// The backend proxy fetches this URL; the frontend reaches the same body
/// through the same-origin `/api/dataset` route.
pub const DATASET_URL: &str = "https://heisse-preise.io/data/latest-canonical.json";
