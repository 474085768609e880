use crate::{db::CatalogStore, error::AppResult, models::Recommendation};

use super::{content, fusion, signals, trending};

/// Default number of recommendations when the caller does not ask for one
pub const DEFAULT_LIMIT: usize = 6;

/// Computes blended recommendations for a retailer
///
/// Runs the four stages sequentially: extract purchase signals, generate
/// trending (collaborative) and content-based candidates, then fuse and rank.
/// A `limit` of zero is floored to one. Unknown retailer IDs behave exactly
/// like retailers with no order history and fall through to the popularity
/// backstop.
pub async fn recommend(
    catalog: &dyn CatalogStore,
    retailer_id: &str,
    limit: usize,
) -> AppResult<Vec<Recommendation>> {
    let limit = limit.max(1);

    let signals = signals::extract(catalog, retailer_id).await?;
    tracing::debug!(
        retailer_id = %retailer_id,
        purchased = signals.product_ids.len(),
        categories = signals.categories.len(),
        keywords = signals.keywords.len(),
        "purchase signals extracted"
    );

    let trending = trending::candidates(catalog, &signals, limit).await?;
    let content = content::candidates(catalog, &signals, limit).await?;
    let recommendations = fusion::fuse(catalog, &signals, content, trending, limit).await?;

    tracing::info!(
        retailer_id = %retailer_id,
        count = recommendations.len(),
        limit = limit,
        "recommendations computed"
    );
    Ok(recommendations)
}
