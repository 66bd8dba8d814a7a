//! Open Food Facts barcode lookup.

use common::model::barcode::{BarcodeLookupResponse, BarcodeProduct};

use super::product_cache::FetchError;

const API_URL: &str = "https://world.openfoodfacts.org/api/v2/product/";

/// Looks up a scanned barcode. `Ok(None)` means the endpoint answered but
/// does not know the product; `Err` means the request itself failed.
pub async fn fetch_product_info(barcode: &str) -> Result<Option<BarcodeProduct>, FetchError> {
    let url = format!("{}{}.json", API_URL, barcode);
    let response = gloo_net::http::Request::get(&url)
        .send()
        .await
        .map_err(|e| FetchError::Network(e.to_string()))?;
    if !response.ok() {
        return Err(FetchError::Network(format!(
            "unexpected status {}",
            response.status()
        )));
    }
    let payload: BarcodeLookupResponse = response
        .json()
        .await
        .map_err(|e| FetchError::Network(e.to_string()))?;
    Ok(payload.into_product())
}
