use serde::{Deserialize, Serialize};

use super::Product;

/// A scored product produced by one pipeline stage
///
/// Candidates live only for the duration of a single request; they are the
/// unit the fusion stage sorts, deduplicates, and truncates.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub product_id: String,
    pub title: String,
    pub category: Option<String>,
    pub score: f64,
    pub price: Option<f64>,
    pub image: Option<String>,
}

impl Candidate {
    /// Maps a catalog product to a candidate with the given score
    ///
    /// All missing-field substitutions happen here so every stage emits the
    /// same shape: placeholder title, sale-over-base price, first image URL.
    pub fn from_product(product: &Product, score: f64) -> Self {
        Self {
            product_id: product.id.clone(),
            title: product.display_title(),
            category: product.category.clone(),
            score,
            price: product.price(),
            image: product.image_url(),
        }
    }
}

/// A recommendation entry as returned to the client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub product_id: String,
    pub title: String,
    pub category: Option<String>,
    pub score: f64,
    pub price: Option<f64>,
    pub image: Option<String>,
}

impl From<Candidate> for Recommendation {
    fn from(candidate: Candidate) -> Self {
        Self {
            product_id: candidate.product_id,
            title: candidate.title,
            category: candidate.category,
            score: candidate.score,
            price: candidate.price,
            image: candidate.image,
        }
    }
}
