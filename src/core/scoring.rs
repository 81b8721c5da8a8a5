use crate::models::InventoryItem;

/// Pluggable match-confidence scorer
///
/// Implementations must be deterministic: the same query and item always
/// produce the same score. Scores are on a 0-100 scale.
pub trait MatchScorer: Send + Sync {
    fn score(&self, query: &str, item: &InventoryItem) -> f64;
}

/// Default scorer based on token overlap between the query and the item
///
/// Scoring formula:
/// score = (
///     title_overlap * 70 +       # fraction of query tokens found in the title
///     category_bonus * 30        # any query token matching the category
/// )
///
/// Tokens are lowercased alphanumeric runs; a query token counts as found in
/// the title when some title token contains it as a substring, so "typewriter"
/// matches "Typewriters".
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenOverlapScorer;

impl MatchScorer for TokenOverlapScorer {
    fn score(&self, query: &str, item: &InventoryItem) -> f64 {
        let query_tokens = tokenize(query);
        if query_tokens.is_empty() {
            return 0.0;
        }

        let title_tokens = tokenize(&item.title);
        let category_tokens = tokenize(&item.category);

        let mut title_hits = 0usize;
        let mut category_hit = false;
        for token in &query_tokens {
            if title_tokens.iter().any(|t| t.contains(token.as_str())) {
                title_hits += 1;
            }
            if category_tokens.iter().any(|t| t.contains(token.as_str())) {
                category_hit = true;
            }
        }

        let title_overlap = title_hits as f64 / query_tokens.len() as f64;
        let category_bonus = if category_hit { 1.0 } else { 0.0 };

        let score = title_overlap * 70.0 + category_bonus * 30.0;
        score.clamp(0.0, 100.0)
    }
}

/// Split text into lowercased alphanumeric tokens
#[inline]
fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Position;

    fn item(title: &str, category: &str) -> InventoryItem {
        InventoryItem {
            id: "item-1".to_string(),
            sale_id: "sale-1".to_string(),
            title: title.to_string(),
            category: category.to_string(),
            price: 25.0,
            position: Position::new(37.76, -122.42),
        }
    }

    #[test]
    fn test_exact_title_match_scores_high() {
        let scorer = TokenOverlapScorer;
        let score = scorer.score("typewriter", &item("Vintage Typewriter", "Antiques"));
        assert!(score >= 70.0, "got {}", score);
    }

    #[test]
    fn test_category_match_adds_bonus() {
        let scorer = TokenOverlapScorer;
        let with_category = scorer.score("antiques", &item("Old Cabinet", "Antiques"));
        let without = scorer.score("antiques", &item("Old Cabinet", "Furniture"));
        assert!(with_category > without);
    }

    #[test]
    fn test_unrelated_item_scores_zero() {
        let scorer = TokenOverlapScorer;
        let score = scorer.score("typewriter", &item("Mountain Bike", "Sports"));
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_partial_query_overlap() {
        let scorer = TokenOverlapScorer;
        let score = scorer.score("red typewriter", &item("Vintage Typewriter", "Antiques"));
        // One of two query tokens present in the title
        assert!(score > 0.0 && score < 70.0, "got {}", score);
    }

    #[test]
    fn test_deterministic() {
        let scorer = TokenOverlapScorer;
        let target = item("Vintage Typewriter", "Antiques");
        assert_eq!(
            scorer.score("typewriter", &target),
            scorer.score("typewriter", &target)
        );
    }

    #[test]
    fn test_case_and_plural_insensitive() {
        let scorer = TokenOverlapScorer;
        let score = scorer.score("TYPEWRITER", &item("Antique Typewriters", "Office"));
        assert!(score >= 70.0);
    }
}
