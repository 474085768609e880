use std::cmp::Ordering;
use std::collections::HashSet;

use crate::{
    db::CatalogStore,
    error::AppResult,
    models::{Candidate, Product},
};

use super::signals::PurchaseSignals;

/// How many category-matching products to pull into the scoring pool
const CANDIDATE_POOL_LIMIT: i64 = 200;

/// Three shared title keywords saturate the overlap term
const KEYWORD_OVERLAP_NORM: f64 = 3.0;

/// Flat bump marking a candidate as content-sourced. Applied at emission
/// only; the pre-bump score decides which candidates survive the cut.
const CONTENT_SOURCE_BONUS: f64 = 0.1;

/// Relevance score of one pool product against the retailer's signals
///
/// Additive, each term capped on its own: exact category membership,
/// title-keyword overlap, and a mild review-count boost that is deliberately
/// small next to the relevance terms.
fn content_score(product: &Product, signals: &PurchaseSignals) -> f64 {
    let mut score = 0.0;

    if product
        .category
        .as_ref()
        .is_some_and(|category| signals.categories.contains(category))
    {
        score += 1.0;
    }

    if !signals.keywords.is_empty() {
        // Raw name only: the display placeholder must not leak into matching.
        let title = product.name.as_deref().unwrap_or("").to_lowercase();
        let title_words: HashSet<&str> = title.split_whitespace().collect();
        let overlap = title_words
            .iter()
            .filter(|word| signals.keywords.contains(**word))
            .count();
        score += (overlap as f64 / KEYWORD_OVERLAP_NORM).min(1.0);
    }

    score += (((product.rating_count() + 1) as f64).log10() / 2.0).min(1.0);
    score
}

/// Content-based candidates: category-matching products ranked by similarity
/// to what the retailer already buys
pub async fn candidates(
    catalog: &dyn CatalogStore,
    signals: &PurchaseSignals,
    limit: usize,
) -> AppResult<Vec<Candidate>> {
    if signals.categories.is_empty() {
        return Ok(Vec::new());
    }

    let categories: Vec<String> = signals.categories.iter().cloned().collect();
    let pool = catalog
        .products_in_categories(&categories, CANDIDATE_POOL_LIMIT)
        .await?;

    let mut scored: Vec<(Product, f64)> = pool
        .into_iter()
        .filter(|product| !signals.product_ids.contains(&product.id))
        .map(|product| {
            let score = content_score(&product, signals);
            (product, score)
        })
        .collect();
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    scored.truncate(2 * limit);

    Ok(scored
        .into_iter()
        .map(|(product, score)| Candidate::from_product(&product, score + CONTENT_SOURCE_BONUS))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MockCatalogStore;
    use crate::models::Rating;

    fn product(id: &str, name: &str, category: &str, rating_count: Option<i64>) -> Product {
        Product {
            id: id.to_string(),
            name: Some(name.to_string()),
            category: Some(category.to_string()),
            pricing: None,
            images: Vec::new(),
            rating: rating_count.map(|count| Rating {
                average: Some(4.0),
                count: Some(count),
            }),
        }
    }

    fn signals(categories: &[&str], purchased: &[&str], keywords: &[&str]) -> PurchaseSignals {
        PurchaseSignals {
            product_ids: purchased.iter().map(|s| s.to_string()).collect(),
            categories: categories.iter().map(|s| s.to_string()).collect(),
            keywords: keywords.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_category_membership_term() {
        let signals = signals(&["Electronics"], &[], &[]);
        let matching = product("a", "", "Electronics", None);
        let other = product("b", "", "Fashion", None);

        assert!((content_score(&matching, &signals) - 1.0).abs() < 1e-9);
        assert!(content_score(&other, &signals).abs() < 1e-9);
    }

    #[test]
    fn test_keyword_overlap_term_caps_at_one() {
        let signals = signals(&[], &[], &["wireless", "noise", "cancelling", "headphones"]);

        let one_hit = product("a", "Wireless mouse", "Electronics", None);
        assert!((content_score(&one_hit, &signals) - 1.0 / 3.0).abs() < 1e-9);

        let four_hits = product(
            "b",
            "Wireless noise cancelling headphones",
            "Electronics",
            None,
        );
        assert!((content_score(&four_hits, &signals) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_overlap_counts_distinct_words_once() {
        let signals = signals(&[], &[], &["wireless"]);
        let repeated = product("a", "wireless wireless wireless", "Electronics", None);
        assert!((content_score(&repeated, &signals) - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_rating_term_is_mild_and_capped() {
        let none = product("a", "", "Fashion", None);
        let some = product("b", "", "Fashion", Some(9));
        let many = product("c", "", "Fashion", Some(1_000_000));
        let empty = signals(&[], &[], &[]);

        assert!(content_score(&none, &empty).abs() < 1e-9);
        // log10(10) / 2 = 0.5
        assert!((content_score(&some, &empty) - 0.5).abs() < 1e-9);
        // capped at 1.0
        assert!((content_score(&many, &empty) - 1.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_candidates_ranked_cut_and_bumped() {
        let mut store = MockCatalogStore::new();
        store.expect_products_in_categories().returning(|_, _| {
            Ok(vec![
                product("weak", "Plain widget", "Electronics", None),
                product("strong", "Wireless charging dock", "Electronics", Some(9)),
                product("owned", "Wireless charging dock", "Electronics", Some(9)),
            ])
        });

        let signals = signals(&["Electronics"], &["owned"], &["wireless", "charging"]);
        let result = candidates(&store, &signals, 1).await.unwrap();

        // limit 1 emits the top 2*1 candidates; "owned" is excluded first.
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].product_id, "strong");
        assert_eq!(result[1].product_id, "weak");
        // 1.0 (category) + 2/3 (overlap) + 0.5 (rating) + 0.1 (bump)
        assert!((result[0].score - (1.0 + 2.0 / 3.0 + 0.5 + 0.1)).abs() < 1e-9);
        // 1.0 (category) + 0.1 (bump)
        assert!((result[1].score - 1.1).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_no_categories_yields_nothing() {
        let store = MockCatalogStore::new();
        let result = candidates(&store, &signals(&[], &[], &["desk"]), 6)
            .await
            .unwrap();
        assert!(result.is_empty());
    }
}
