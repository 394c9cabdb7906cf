//! The shoe product record and the fixed seed samples.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Number;
use store::Document;

use crate::CatalogError;

/// A shoe as submitted by clients and persisted in the catalog.
///
/// Identifiers are store-assigned; a payload carrying `id` or `_id` is
/// rejected at deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Shoe {
    pub name: String,
    pub brand: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: f64,
    /// Product image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    /// Whole sizes stay integers on the wire; half sizes keep their fraction.
    #[serde(default)]
    pub sizes: Vec<Number>,
    /// Average review score, 0 to 5.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
}

fn default_in_stock() -> bool {
    true
}

impl Shoe {
    /// Check field constraints serde cannot express.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.name.trim().is_empty() {
            return Err(CatalogError::Invalid("name must not be empty".into()));
        }
        if self.brand.trim().is_empty() {
            return Err(CatalogError::Invalid("brand must not be empty".into()));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(CatalogError::Invalid(format!(
                "price must be a non-negative number, got {}",
                self.price
            )));
        }
        if let Some(rating) = self.rating {
            if !(0.0..=5.0).contains(&rating) {
                return Err(CatalogError::Invalid(format!(
                    "rating must be between 0 and 5, got {rating}"
                )));
            }
        }
        if let Some(image) = &self.image {
            if !(image.starts_with("http://") || image.starts_with("https://")) {
                return Err(CatalogError::Invalid(format!(
                    "image must be an http(s) URL, got {image:?}"
                )));
            }
        }
        Ok(())
    }

    /// Serialize into a store document stamped with creation timestamps.
    pub fn to_document(&self) -> Result<Document, CatalogError> {
        let value = serde_json::to_value(self)?;
        let serde_json::Value::Object(mut doc) = value else {
            return Err(CatalogError::Serialization(
                "shoe did not serialize to an object".into(),
            ));
        };
        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        doc.insert("created_at".into(), now.clone().into());
        doc.insert("updated_at".into(), now.into());
        Ok(doc)
    }
}

#[allow(clippy::too_many_arguments)]
fn sample(
    name: &str,
    brand: &str,
    description: &str,
    price: f64,
    image: &str,
    colors: &[&str],
    sizes: &[u32],
    rating: f64,
    category: &str,
) -> Shoe {
    Shoe {
        name: name.into(),
        brand: brand.into(),
        description: Some(description.into()),
        price,
        image: Some(image.into()),
        colors: colors.iter().map(|c| c.to_string()).collect(),
        sizes: sizes.iter().copied().map(Number::from).collect(),
        rating: Some(rating),
        category: Some(category.into()),
        in_stock: true,
    }
}

/// The four demonstration records inserted into an empty catalog.
pub fn sample_shoes() -> Vec<Shoe> {
    vec![
        sample(
            "Air Zoom Runner",
            "Nike",
            "Lightweight daily trainer with responsive ZoomX foam.",
            129.99,
            "https://images.unsplash.com/photo-1542291026-7eec264c27ff?auto=format&fit=crop&w=800&q=60",
            &["Black", "Volt"],
            &[7, 8, 9, 10, 11, 12],
            4.6,
            "Running",
        ),
        sample(
            "Ultraboost 1.0",
            "Adidas",
            "Iconic comfort with Boost midsole and Primeknit upper.",
            159.99,
            "https://images.unsplash.com/photo-1549298916-b41d501d3772?auto=format&fit=crop&w=800&q=60",
            &["Core Black", "Cloud White"],
            &[6, 7, 8, 9, 10, 11],
            4.7,
            "Running",
        ),
        sample(
            "Classic Leather",
            "Reebok",
            "Timeless street style with premium leather construction.",
            89.99,
            "https://images.unsplash.com/photo-1608231387042-66d1773070a5?auto=format&fit=crop&w=800&q=60",
            &["White"],
            &[7, 8, 9, 10, 11, 12],
            4.4,
            "Lifestyle",
        ),
        sample(
            "Chuck 70 High",
            "Converse",
            "Upgraded classic with durable canvas and cushioned insole.",
            74.99,
            "https://images.unsplash.com/photo-1519741497674-611481863552?auto=format&fit=crop&w=800&q=60",
            &["Black", "Parchment"],
            &[5, 6, 7, 8, 9, 10, 11],
            4.5,
            "Lifestyle",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn minimal() -> Shoe {
        serde_json::from_value(json!({
            "name": "Test Shoe",
            "brand": "TestCo",
            "price": 10.0,
        }))
        .expect("minimal shoe deserializes")
    }

    #[test]
    fn samples_cover_four_brands() {
        let brands: Vec<String> = sample_shoes().into_iter().map(|s| s.brand).collect();
        assert_eq!(brands, vec!["Nike", "Adidas", "Reebok", "Converse"]);
        assert!(sample_shoes().iter().all(|s| s.validate().is_ok()));
    }

    #[test]
    fn optional_fields_take_defaults() {
        let shoe = minimal();
        assert!(shoe.in_stock);
        assert!(shoe.colors.is_empty());
        assert!(shoe.sizes.is_empty());
        assert_eq!(shoe.rating, None);
    }

    #[test]
    fn sizes_keep_their_number_form() {
        let doc = sample_shoes()[0].to_document().unwrap();
        assert_eq!(doc["sizes"], json!([7, 8, 9, 10, 11, 12]));

        let shoe: Shoe = serde_json::from_value(json!({
            "name": "Half", "brand": "Sizes", "price": 1.0, "sizes": [9, 9.5],
        }))
        .unwrap();
        let doc = shoe.to_document().unwrap();
        assert_eq!(doc["sizes"], json!([9, 9.5]));
    }

    #[test]
    fn identifier_fields_are_rejected() {
        for field in ["id", "_id"] {
            let mut value = json!({ "name": "X", "brand": "Y", "price": 1.0 });
            value[field] = json!("abc");
            assert!(serde_json::from_value::<Shoe>(value).is_err(), "{field} accepted");
        }
    }

    #[test]
    fn validation_rejects_bad_values() {
        let mut shoe = minimal();
        shoe.price = -1.0;
        assert!(matches!(shoe.validate(), Err(CatalogError::Invalid(_))));

        let mut shoe = minimal();
        shoe.rating = Some(5.5);
        assert!(shoe.validate().is_err());

        let mut shoe = minimal();
        shoe.name = "   ".into();
        assert!(shoe.validate().is_err());

        let mut shoe = minimal();
        shoe.image = Some("ftp://example.com/a.png".into());
        assert!(shoe.validate().is_err());
    }

    #[test]
    fn document_is_stamped_and_skips_empty_options() {
        let doc = minimal().to_document().unwrap();
        assert_eq!(doc["name"], json!("Test Shoe"));
        assert!(doc.contains_key("created_at"));
        assert_eq!(doc["created_at"], doc["updated_at"]);
        assert!(!doc.contains_key("description"));
        assert!(!doc.contains_key("_id"));
    }
}
