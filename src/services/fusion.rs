use std::cmp::Ordering;
use std::collections::HashSet;

use crate::{
    db::CatalogStore,
    error::AppResult,
    models::{Candidate, Recommendation},
};

use super::signals::PurchaseSignals;

/// Score assigned to popularity-fallback entries; low enough that any
/// signal-derived candidate outranks them
const FALLBACK_SCORE: f64 = 0.1;

/// Merges the candidate sources into one ranked, deduplicated list
///
/// Content candidates come first, then trending. Only when the combined
/// pre-dedup pool is still short of `limit` is a batch of top-rated products
/// appended as a backstop, so a retailer with no usable history still gets a
/// full response.
pub async fn fuse(
    catalog: &dyn CatalogStore,
    signals: &PurchaseSignals,
    content: Vec<Candidate>,
    trending: Vec<Candidate>,
    limit: usize,
) -> AppResult<Vec<Recommendation>> {
    let mut combined = content;
    combined.extend(trending);

    if combined.len() < limit {
        let fallback = catalog.top_rated((2 * limit) as i64).await?;
        combined.extend(
            fallback
                .iter()
                .filter(|product| !signals.product_ids.contains(&product.id))
                .map(|product| Candidate::from_product(product, FALLBACK_SCORE)),
        );
    }

    Ok(rank(combined, limit))
}

/// Sorts by score descending, keeps the first occurrence of each product ID,
/// and truncates to `limit`
///
/// The sort is stable, so equal-score candidates keep their source order
/// (content, then trending, then fallback).
pub fn rank(mut candidates: Vec<Candidate>, limit: usize) -> Vec<Recommendation> {
    candidates.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

    let mut seen: HashSet<String> = HashSet::new();
    let mut ranked = Vec::with_capacity(limit);
    for candidate in candidates {
        if !seen.insert(candidate.product_id.clone()) {
            continue;
        }
        ranked.push(Recommendation::from(candidate));
        if ranked.len() >= limit {
            break;
        }
    }
    ranked
}
