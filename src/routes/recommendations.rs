use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::{
    db::CatalogStore,
    error::AppResult,
    models::Recommendation,
    services::recommendations::{self, DEFAULT_LIMIT},
};

#[derive(Debug, Deserialize)]
pub struct RecommendationParams {
    pub limit: Option<usize>,
}

/// Handler for the recommendations endpoint
pub async fn recommend(
    State(catalog): State<Arc<dyn CatalogStore>>,
    Path(retailer_id): Path<String>,
    Query(params): Query<RecommendationParams>,
) -> AppResult<Json<Vec<Recommendation>>> {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT);
    let recommendations = recommendations::recommend(catalog.as_ref(), &retailer_id, limit).await?;
    Ok(Json(recommendations))
}
