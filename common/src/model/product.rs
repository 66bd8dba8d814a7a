use serde::{Deserialize, Serialize};

/// A single product record from the canonical dataset.
///
/// Records are immutable snapshots as delivered by the upstream endpoint:
/// the client never mutates one, it only replaces the whole list on refresh.
/// Deserialization is deliberately lenient (every field defaults) because
/// upstream records are scraped from several store chains and omit fields
/// freely.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Product {
    /// Identifier of the store chain the price was captured from.
    pub store: String,
    /// Store-scoped product identifier.
    pub id: String,
    /// Display name; the only field the search index looks at.
    pub name: String,
    pub description: String,
    /// Current price in euro.
    pub price: f64,
    /// Past (date, price) observations. Not guaranteed sorted at rest;
    /// use [`Product::sorted_history`] before presenting it.
    pub price_history: Vec<PricePoint>,
    /// Whether the price applies per weight rather than per item.
    pub is_weighted: bool,
    pub unit: String,
    pub quantity: f64,
    /// Organic ("bio") flag.
    pub bio: bool,
    /// Link to the product page at the store.
    pub url: String,
    pub category: String,
    pub unavailable: bool,
}

/// One historical price observation.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct PricePoint {
    /// ISO-8601 calendar date (`YYYY-MM-DD`).
    pub date: String,
    pub price: f64,
}

impl Product {
    /// Price history ordered by date, oldest first.
    pub fn sorted_history(&self) -> Vec<PricePoint> {
        let mut history = self.price_history.clone();
        history.sort_by(|a, b| a.date.cmp(&b.date));
        history
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_canonical_record() {
        let json = r#"{
            "store": "billa",
            "id": "00-123",
            "name": "Milch 1L",
            "description": "Vollmilch",
            "price": 1.49,
            "priceHistory": [
                {"date": "2024-03-01", "price": 1.59},
                {"date": "2024-01-15", "price": 1.39}
            ],
            "isWeighted": false,
            "unit": "l",
            "quantity": 1.0,
            "bio": true,
            "url": "https://example.test/p/00-123",
            "category": "dairy",
            "unavailable": false
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.store, "billa");
        assert_eq!(product.name, "Milch 1L");
        assert!(product.bio);
        assert_eq!(product.price_history.len(), 2);
    }

    #[test]
    fn missing_fields_default() {
        let product: Product = serde_json::from_str(r#"{"name": "Brot"}"#).unwrap();
        assert_eq!(product.name, "Brot");
        assert_eq!(product.price, 0.0);
        assert!(product.price_history.is_empty());
        assert!(!product.unavailable);
    }

    #[test]
    fn sorted_history_orders_by_date() {
        let product = Product {
            price_history: vec![
                PricePoint { date: "2024-03-01".into(), price: 1.59 },
                PricePoint { date: "2023-11-20".into(), price: 1.29 },
                PricePoint { date: "2024-01-15".into(), price: 1.39 },
            ],
            ..Product::default()
        };

        let sorted = product.sorted_history();
        let dates: Vec<&str> = sorted.iter().map(|p| p.date.as_str()).collect();
        assert_eq!(dates, vec!["2023-11-20", "2024-01-15", "2024-03-01"]);
    }

    #[test]
    fn empty_dataset_decodes_to_empty_list() {
        let products: Vec<Product> = serde_json::from_str("[]").unwrap();
        assert!(products.is_empty());
    }
}
