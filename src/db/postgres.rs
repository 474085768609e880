use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::{postgres::PgPoolOptions, FromRow, PgPool};

use crate::{
    db::{CatalogStore, CategoryTrend},
    error::AppResult,
    models::{LineItem, Order, Pricing, Product, ProductImage, Rating},
};

/// Creates a PostgreSQL connection pool
///
/// Establishes a pool of database connections for efficient reuse.
/// The pool automatically manages connection lifecycle and limits.
pub async fn create_pool(database_url: &str) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    Ok(pool)
}

/// PostgreSQL-backed catalog store
///
/// Renders the document collections of the upstream platform as three
/// relational tables (`products`, `orders`, `order_items`, see
/// `migrations/`). All queries are read-only.
#[derive(Clone)]
pub struct PgCatalogStore {
    pool: PgPool,
}

impl PgCatalogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct ProductRow {
    id: String,
    name: Option<String>,
    category: Option<String>,
    base_price: Option<f64>,
    sale_price: Option<f64>,
    image_urls: Option<Vec<String>>,
    rating_average: Option<f64>,
    rating_count: Option<i64>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        let pricing = match (row.base_price, row.sale_price) {
            (None, None) => None,
            (base_price, sale_price) => Some(Pricing {
                base_price,
                sale_price,
            }),
        };
        let rating = match (row.rating_average, row.rating_count) {
            (None, None) => None,
            (average, count) => Some(Rating { average, count }),
        };

        Product {
            id: row.id,
            name: row.name,
            category: row.category,
            pricing,
            images: row
                .image_urls
                .unwrap_or_default()
                .into_iter()
                .map(|url| ProductImage { url })
                .collect(),
            rating,
        }
    }
}

#[derive(FromRow)]
struct OrderRow {
    id: String,
    retailer_id: String,
    created_at: DateTime<Utc>,
}

#[derive(FromRow)]
struct OrderItemRow {
    order_id: String,
    product_id: Option<String>,
    name: Option<String>,
    quantity: i64,
}

#[derive(FromRow)]
struct TrendRow {
    #[sqlx(flatten)]
    product: ProductRow,
    purchase_count: i64,
}

const PRODUCT_COLUMNS: &str =
    "id, name, category, base_price, sale_price, image_urls, rating_average, rating_count";

#[async_trait::async_trait]
impl CatalogStore for PgCatalogStore {
    async fn orders_for_retailer(&self, retailer_id: &str) -> AppResult<Vec<Order>> {
        let order_rows: Vec<OrderRow> = sqlx::query_as(
            "SELECT id, retailer_id, created_at
             FROM orders
             WHERE retailer_id = $1
             ORDER BY created_at, id",
        )
        .bind(retailer_id)
        .fetch_all(&self.pool)
        .await?;

        let order_ids: Vec<String> = order_rows.iter().map(|row| row.id.clone()).collect();
        let item_rows: Vec<OrderItemRow> = sqlx::query_as(
            "SELECT order_id, product_id, name, quantity
             FROM order_items
             WHERE order_id = ANY($1)
             ORDER BY order_id, position",
        )
        .bind(order_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut items_by_order: HashMap<String, Vec<LineItem>> = HashMap::new();
        for row in item_rows {
            items_by_order
                .entry(row.order_id)
                .or_default()
                .push(LineItem {
                    product_id: row.product_id,
                    name: row.name,
                    quantity: row.quantity,
                });
        }

        Ok(order_rows
            .into_iter()
            .map(|row| {
                let items = items_by_order.remove(&row.id).unwrap_or_default();
                Order {
                    id: row.id,
                    retailer_id: row.retailer_id,
                    created_at: row.created_at,
                    items,
                }
            })
            .collect())
    }

    async fn products_by_ids(&self, ids: &[String]) -> AppResult<Vec<Product>> {
        let rows: Vec<ProductRow> = sqlx::query_as(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ANY($1)"
        ))
        .bind(ids.to_vec())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn trending_in_categories(
        &self,
        categories: &[String],
        limit: i64,
    ) -> AppResult<Vec<CategoryTrend>> {
        // GROUP BY the product primary key, so the "representative" product
        // of each group is simply the product row itself.
        let rows: Vec<TrendRow> = sqlx::query_as(
            "SELECT p.id, p.name, p.category, p.base_price, p.sale_price,
                    p.image_urls, p.rating_average, p.rating_count,
                    COUNT(*) AS purchase_count
             FROM order_items i
             JOIN products p ON p.id = i.product_id
             WHERE p.category = ANY($1)
             GROUP BY p.id
             ORDER BY purchase_count DESC
             LIMIT $2",
        )
        .bind(categories.to_vec())
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| CategoryTrend {
                product: Product::from(row.product),
                purchase_count: row.purchase_count,
            })
            .collect())
    }

    async fn products_in_categories(
        &self,
        categories: &[String],
        limit: i64,
    ) -> AppResult<Vec<Product>> {
        let rows: Vec<ProductRow> = sqlx::query_as(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE category = ANY($1) LIMIT $2"
        ))
        .bind(categories.to_vec())
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn top_rated(&self, limit: i64) -> AppResult<Vec<Product>> {
        let rows: Vec<ProductRow> = sqlx::query_as(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products
             ORDER BY rating_average DESC NULLS LAST
             LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }
}
