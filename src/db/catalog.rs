/// Catalog data-access abstraction
///
/// The recommendation pipeline only ever reads. Everything it needs from the
/// store is expressed as the five queries below, so backends (PostgreSQL in
/// production, in-memory in tests) stay interchangeable behind one trait.
use crate::{
    error::AppResult,
    models::{Order, Product},
};

/// A product together with how often it appears in order lines
///
/// Produced by the trending aggregation. Which row represents the product is
/// backend-defined; callers must not rely on a particular choice.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTrend {
    pub product: Product,
    pub purchase_count: i64,
}

/// Read-only store of orders and products
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogStore: Send + Sync {
    /// All orders placed by the given retailer
    async fn orders_for_retailer(&self, retailer_id: &str) -> AppResult<Vec<Order>>;

    /// Products whose ID is in the given set
    async fn products_by_ids(&self, ids: &[String]) -> AppResult<Vec<Product>>;

    /// Per-product purchase counts across ALL retailers' order lines,
    /// restricted to products in the given categories, most purchased first
    async fn trending_in_categories(
        &self,
        categories: &[String],
        limit: i64,
    ) -> AppResult<Vec<CategoryTrend>>;

    /// Products in the given categories, in store order
    async fn products_in_categories(
        &self,
        categories: &[String],
        limit: i64,
    ) -> AppResult<Vec<Product>>;

    /// Products sorted by average rating, best rated first
    async fn top_rated(&self, limit: i64) -> AppResult<Vec<Product>>;
}
