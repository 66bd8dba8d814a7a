//! Freshness report for the cached dataset copy, for `GET /api/dataset/status`.

use actix_web::web;
use common::{freshness, DATASET_URL};
use serde_json::json;

use super::store::{now_ms, DatasetStore};
use super::DatasetState;

pub(crate) async fn process(state: web::Data<DatasetState>) -> impl actix_web::Responder {
    match dataset_status(&state) {
        Ok(status) => actix_web::HttpResponse::Ok().json(status),
        Err(e) => actix_web::HttpResponse::ServiceUnavailable()
            .body(format!("Error reading dataset status: {}", e)),
    }
}

fn dataset_status(state: &DatasetState) -> Result<serde_json::Value, String> {
    let store = DatasetStore::open(&state.db_path)?;
    let now = now_ms();

    Ok(match store.read(DATASET_URL)? {
        Some(entry) => json!({
            "cached": true,
            "fetched_at_ms": entry.fetched_at_ms,
            "age_ms": freshness::age_ms(entry.fetched_at_ms, now),
            "expired": freshness::is_stale(Some(entry.fetched_at_ms), now),
        }),
        None => json!({
            "cached": false,
            "expired": true,
        }),
    })
}
