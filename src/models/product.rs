use serde::{Deserialize, Serialize};

/// Pricing information for a product
///
/// Catalog documents may carry a discounted sale price alongside the base
/// price; the sale price wins whenever it is set.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Pricing {
    pub base_price: Option<f64>,
    pub sale_price: Option<f64>,
}

/// A single product image
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductImage {
    pub url: String,
}

/// Aggregated review rating for a product
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Rating {
    pub average: Option<f64>,
    pub count: Option<i64>,
}

/// A catalog product as read from the store
///
/// Every field the scorer touches is optional except the ID: catalog
/// documents predate the current schema and routinely miss pricing, images,
/// rating, or even the category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: String,
    pub name: Option<String>,
    pub category: Option<String>,
    pub pricing: Option<Pricing>,
    pub images: Vec<ProductImage>,
    pub rating: Option<Rating>,
}

impl Product {
    /// Display title, substituting a placeholder when the name is missing
    pub fn display_title(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| "Product".to_string())
    }

    /// Effective price: sale price if present, otherwise base price
    pub fn price(&self) -> Option<f64> {
        let pricing = self.pricing.as_ref()?;
        pricing.sale_price.or(pricing.base_price)
    }

    /// URL of the first image, if any
    pub fn image_url(&self) -> Option<String> {
        self.images.first().map(|image| image.url.clone())
    }

    /// Review count, defaulting to zero when the product has no rating
    pub fn rating_count(&self) -> i64 {
        self.rating
            .as_ref()
            .and_then(|rating| rating.count)
            .unwrap_or(0)
    }

    /// Average rating, defaulting to zero when the product has no rating
    pub fn rating_average(&self) -> f64 {
        self.rating
            .as_ref()
            .and_then(|rating| rating.average)
            .unwrap_or(0.0)
    }
}
