use std::collections::HashMap;

use crate::{
    db::{CatalogStore, CategoryTrend},
    error::AppResult,
    models::{Order, Product},
};

/// In-memory catalog store
///
/// Mirrors the observable semantics of the PostgreSQL backend over plain
/// vectors. Used by the test suite and for local smoke runs; "store order"
/// is insertion order.
#[derive(Debug, Default, Clone)]
pub struct MemoryCatalogStore {
    products: Vec<Product>,
    orders: Vec<Order>,
}

impl MemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_product(&mut self, product: Product) {
        self.products.push(product);
    }

    pub fn insert_order(&mut self, order: Order) {
        self.orders.push(order);
    }
}

#[async_trait::async_trait]
impl CatalogStore for MemoryCatalogStore {
    async fn orders_for_retailer(&self, retailer_id: &str) -> AppResult<Vec<Order>> {
        Ok(self
            .orders
            .iter()
            .filter(|order| order.retailer_id == retailer_id)
            .cloned()
            .collect())
    }

    async fn products_by_ids(&self, ids: &[String]) -> AppResult<Vec<Product>> {
        Ok(self
            .products
            .iter()
            .filter(|product| ids.contains(&product.id))
            .cloned()
            .collect())
    }

    async fn trending_in_categories(
        &self,
        categories: &[String],
        limit: i64,
    ) -> AppResult<Vec<CategoryTrend>> {
        let by_id: HashMap<&str, &Product> = self
            .products
            .iter()
            .map(|product| (product.id.as_str(), product))
            .collect();

        // Count order-line occurrences per product, keeping first-seen order
        // so the stable sort below has a deterministic tie order.
        let mut counts: HashMap<&str, i64> = HashMap::new();
        let mut first_seen: Vec<&Product> = Vec::new();
        for order in &self.orders {
            for item in &order.items {
                let Some(product_id) = item.product_id.as_deref() else {
                    continue;
                };
                let Some(product) = by_id.get(product_id).copied() else {
                    continue;
                };
                let in_categories = product
                    .category
                    .as_ref()
                    .is_some_and(|category| categories.contains(category));
                if !in_categories {
                    continue;
                }
                let count = counts.entry(product_id).or_insert(0);
                if *count == 0 {
                    first_seen.push(product);
                }
                *count += 1;
            }
        }

        let mut trends: Vec<CategoryTrend> = first_seen
            .into_iter()
            .map(|product| CategoryTrend {
                product: product.clone(),
                purchase_count: counts[product.id.as_str()],
            })
            .collect();
        trends.sort_by(|a, b| b.purchase_count.cmp(&a.purchase_count));
        trends.truncate(limit as usize);
        Ok(trends)
    }

    async fn products_in_categories(
        &self,
        categories: &[String],
        limit: i64,
    ) -> AppResult<Vec<Product>> {
        Ok(self
            .products
            .iter()
            .filter(|product| {
                product
                    .category
                    .as_ref()
                    .is_some_and(|category| categories.contains(category))
            })
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn top_rated(&self, limit: i64) -> AppResult<Vec<Product>> {
        let mut products = self.products.clone();
        products.sort_by(|a, b| {
            b.rating_average()
                .partial_cmp(&a.rating_average())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        products.truncate(limit as usize);
        Ok(products)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LineItem, Rating};
    use chrono::Utc;

    fn product(id: &str, category: Option<&str>, rating_average: Option<f64>) -> Product {
        Product {
            id: id.to_string(),
            name: Some(format!("product {id}")),
            category: category.map(str::to_string),
            pricing: None,
            images: Vec::new(),
            rating: rating_average.map(|average| Rating {
                average: Some(average),
                count: Some(10),
            }),
        }
    }

    fn order(id: &str, retailer_id: &str, product_ids: &[&str]) -> Order {
        Order {
            id: id.to_string(),
            retailer_id: retailer_id.to_string(),
            created_at: Utc::now(),
            items: product_ids
                .iter()
                .map(|product_id| LineItem {
                    product_id: Some(product_id.to_string()),
                    name: Some(format!("item {product_id}")),
                    quantity: 1,
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn test_trending_counts_across_all_retailers() {
        let mut store = MemoryCatalogStore::new();
        store.insert_product(product("a", Some("Electronics"), None));
        store.insert_product(product("b", Some("Electronics"), None));
        store.insert_product(product("c", Some("Fashion"), None));
        store.insert_order(order("o1", "r1", &["a", "b"]));
        store.insert_order(order("o2", "r2", &["a", "c"]));
        store.insert_order(order("o3", "r3", &["a"]));

        let trends = store
            .trending_in_categories(&["Electronics".to_string()], 10)
            .await
            .unwrap();

        assert_eq!(trends.len(), 2);
        assert_eq!(trends[0].product.id, "a");
        assert_eq!(trends[0].purchase_count, 3);
        assert_eq!(trends[1].product.id, "b");
        assert_eq!(trends[1].purchase_count, 1);
    }

    #[tokio::test]
    async fn test_trending_skips_dangling_product_refs() {
        let mut store = MemoryCatalogStore::new();
        store.insert_product(product("a", Some("Electronics"), None));
        store.insert_order(order("o1", "r1", &["a", "deleted"]));

        let trends = store
            .trending_in_categories(&["Electronics".to_string()], 10)
            .await
            .unwrap();

        assert_eq!(trends.len(), 1);
        assert_eq!(trends[0].product.id, "a");
    }

    #[tokio::test]
    async fn test_top_rated_sorts_missing_ratings_last() {
        let mut store = MemoryCatalogStore::new();
        store.insert_product(product("low", None, Some(2.0)));
        store.insert_product(product("unrated", None, None));
        store.insert_product(product("high", None, Some(4.5)));

        let products = store.top_rated(10).await.unwrap();
        let ids: Vec<&str> = products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["high", "low", "unrated"]);
    }

    #[tokio::test]
    async fn test_products_in_categories_respects_limit() {
        let mut store = MemoryCatalogStore::new();
        for i in 0..5 {
            store.insert_product(product(&format!("p{i}"), Some("Industrial"), None));
        }

        let products = store
            .products_in_categories(&["Industrial".to_string()], 3)
            .await
            .unwrap();
        assert_eq!(products.len(), 3);
    }
}
