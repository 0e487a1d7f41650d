//! Product Model

use serde::{Deserialize, Serialize};

/// Product base row. `image` is the denormalized primary image reference;
/// additional images live in `product_image` ordered by `display_order`.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub brand: String,
    pub series: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub dealer_price: Option<f64>,
    pub end_user_price: Option<f64>,
    pub warranty: Option<String>,
    pub product_type: Option<String>,
    pub created_at: i64,
}

/// Additional product image row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProductImage {
    pub id: i64,
    pub product_id: i64,
    pub image_path: String,
    pub display_order: i64,
    pub created_at: i64,
}

/// Denormalized product record returned by the read path:
/// base row + ordered additional images + category tag set.
#[derive(Debug, Clone, Serialize)]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: Product,
    pub additional_images: Vec<ProductImage>,
    pub categories: Vec<String>,
}

/// Compact product reference used when resolving sent-list snapshots
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProductSummary {
    pub id: i64,
    pub name: String,
    pub brand: String,
    pub series: Option<String>,
    pub model: Option<String>,
}

/// Create product payload. Image paths are already written to upload
/// storage by the handler; `image` is the primary, `additional_images`
/// get display_order 1..N.
#[derive(Debug, Clone, Default)]
pub struct ProductCreate {
    pub name: Option<String>,
    pub brand: String,
    pub series: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    pub description: Option<String>,
    pub dealer_price: Option<f64>,
    pub end_user_price: Option<f64>,
    pub warranty: Option<String>,
    pub product_type: Option<String>,
    pub categories: Vec<String>,
    pub image: Option<String>,
    pub additional_images: Vec<String>,
}

/// Update product payload. The primary image is never changed here —
/// only the explicit set-main-image operation repoints it, except when
/// `keep_existing_images` is false and new uploads replace the image set.
#[derive(Debug, Clone, Default)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub brand: String,
    pub series: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    pub description: Option<String>,
    pub dealer_price: Option<f64>,
    pub end_user_price: Option<f64>,
    pub warranty: Option<String>,
    pub product_type: Option<String>,
    pub categories: Vec<String>,
    pub new_images: Vec<String>,
    pub keep_existing_images: bool,
}

/// Effective display name: the series takes precedence, then the
/// explicit name. Legacy data was keyed on series for most products.
pub fn effective_name(series: &Option<String>, name: &Option<String>) -> String {
    series
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .or(name.as_deref())
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_name_prefers_series() {
        assert_eq!(
            effective_name(&Some("LaserJet".into()), &Some("Custom".into())),
            "LaserJet"
        );
        assert_eq!(effective_name(&None, &Some("Custom".into())), "Custom");
        assert_eq!(effective_name(&Some("  ".into()), &Some("Custom".into())), "Custom");
        assert_eq!(effective_name(&None, &None), "");
    }
}
