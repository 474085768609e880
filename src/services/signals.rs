use std::collections::HashSet;

use crate::{db::CatalogStore, error::AppResult};

/// Tokens shorter than this carry too little meaning to match on
const MIN_KEYWORD_LEN: usize = 4;

/// Purchase-derived signals for one retailer
///
/// Computed once per request and passed immutably into the candidate
/// generator stages. A retailer with no order history yields empty sets;
/// the pipeline still runs and falls back to popularity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PurchaseSignals {
    /// Distinct product IDs the retailer has ever ordered
    pub product_ids: HashSet<String>,
    /// Non-empty categories of those products
    pub categories: HashSet<String>,
    /// Lowercased words (length >= 4) from ordered line-item names
    pub keywords: HashSet<String>,
}

/// Derives purchase signals from the retailer's order history
///
/// Line items without a product reference are skipped when collecting
/// purchased IDs, but their denormalized names still contribute keywords.
pub async fn extract(catalog: &dyn CatalogStore, retailer_id: &str) -> AppResult<PurchaseSignals> {
    let orders = catalog.orders_for_retailer(retailer_id).await?;

    let mut product_ids = HashSet::new();
    let mut keywords = HashSet::new();
    for order in &orders {
        for item in &order.items {
            if let Some(product_id) = &item.product_id {
                product_ids.insert(product_id.clone());
            }
            if let Some(name) = &item.name {
                for token in name.to_lowercase().split_whitespace() {
                    if token.chars().count() >= MIN_KEYWORD_LEN {
                        keywords.insert(token.to_string());
                    }
                }
            }
        }
    }

    let mut categories = HashSet::new();
    if !product_ids.is_empty() {
        let ids: Vec<String> = product_ids.iter().cloned().collect();
        for product in catalog.products_by_ids(&ids).await? {
            match product.category {
                Some(category) if !category.is_empty() => {
                    categories.insert(category);
                }
                _ => {}
            }
        }
    }

    Ok(PurchaseSignals {
        product_ids,
        categories,
        keywords,
    })
}
