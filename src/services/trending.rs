use crate::{db::CatalogStore, error::AppResult, models::Candidate};

use super::signals::PurchaseSignals;

/// Base offset keeping trending picks below strong content matches unless
/// the product is genuinely popular
const TRENDING_BASE: f64 = 0.2;

/// Floor on how many groups the aggregation retains
const MIN_AGGREGATION_LIMIT: usize = 10;

/// Score for a product purchased `count` times in the retailer's categories
///
/// The logarithm is capped at 1.0 so a single runaway bestseller cannot
/// swamp the content-based picks.
fn trending_score(count: i64) -> f64 {
    TRENDING_BASE + ((count + 1) as f64).log10().min(1.0)
}

/// Collaborative candidates: products other retailers buy in the same
/// categories
///
/// An empty category set short-circuits without touching the store. The
/// retailer's own purchases are filtered out after the aggregation cut,
/// so heavily re-purchased items still consume aggregation slots.
pub async fn candidates(
    catalog: &dyn CatalogStore,
    signals: &PurchaseSignals,
    limit: usize,
) -> AppResult<Vec<Candidate>> {
    if signals.categories.is_empty() {
        return Ok(Vec::new());
    }

    let categories: Vec<String> = signals.categories.iter().cloned().collect();
    let aggregation_limit = (2 * limit).max(MIN_AGGREGATION_LIMIT) as i64;
    let trends = catalog
        .trending_in_categories(&categories, aggregation_limit)
        .await?;

    let candidates: Vec<Candidate> = trends
        .into_iter()
        .filter(|trend| !signals.product_ids.contains(&trend.product.id))
        .map(|trend| Candidate::from_product(&trend.product, trending_score(trend.purchase_count)))
        .collect();

    tracing::debug!(
        categories = categories.len(),
        candidates = candidates.len(),
        "trending candidates generated"
    );
    Ok(candidates)
}
