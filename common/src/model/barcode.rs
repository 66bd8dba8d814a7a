use serde::{Deserialize, Serialize};

/// Response envelope of the Open Food Facts v2 product endpoint.
///
/// The endpoint answers `200 OK` even for unknown barcodes; a usable product
/// is only present when `status` is `1`.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct BarcodeLookupResponse {
    pub status: i64,
    pub product: Option<BarcodeProduct>,
}

impl BarcodeLookupResponse {
    /// The looked-up product, or `None` when the barcode is unknown.
    pub fn into_product(self) -> Option<BarcodeProduct> {
        if self.status == 1 { self.product } else { None }
    }
}

/// Product metadata returned for a scanned barcode.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct BarcodeProduct {
    pub product_name: String,
    pub brands: String,
    pub image_url: String,
    pub categories_tags: Vec<String>,
}

impl Default for BarcodeProduct {
    fn default() -> Self {
        Self {
            product_name: "Unknown Product".to_string(),
            brands: "Unknown Brand".to_string(),
            image_url: String::new(),
            categories_tags: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_barcode_yields_product() {
        let json = r#"{
            "status": 1,
            "product": {
                "product_name": "Nutella",
                "brands": "Ferrero",
                "image_url": "https://images.test/nutella.jpg",
                "categories_tags": ["en:spreads", "en:hazelnut-spreads"]
            }
        }"#;

        let response: BarcodeLookupResponse = serde_json::from_str(json).unwrap();
        let product = response.into_product().unwrap();
        assert_eq!(product.product_name, "Nutella");
        assert_eq!(product.categories_tags.len(), 2);
    }

    #[test]
    fn unknown_barcode_yields_none() {
        let response: BarcodeLookupResponse =
            serde_json::from_str(r#"{"status": 0, "status_verbose": "product not found"}"#)
                .unwrap();
        assert!(response.into_product().is_none());
    }

    #[test]
    fn sparse_product_falls_back_to_placeholders() {
        let response: BarcodeLookupResponse =
            serde_json::from_str(r#"{"status": 1, "product": {}}"#).unwrap();
        let product = response.into_product().unwrap();
        assert_eq!(product.product_name, "Unknown Product");
        assert_eq!(product.brands, "Unknown Brand");
        assert!(product.image_url.is_empty());
    }
}
