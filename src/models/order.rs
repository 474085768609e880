use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One line of an order
///
/// The product reference is optional: historical orders contain items whose
/// product was deleted from the catalog. The item name is denormalized at
/// order time and survives such deletions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    pub product_id: Option<String>,
    pub name: Option<String>,
    pub quantity: i64,
}

/// A past order placed by a retailer
///
/// Orders are read-only inputs to the recommendation pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub id: String,
    pub retailer_id: String,
    pub created_at: DateTime<Utc>,
    pub items: Vec<LineItem>,
}
