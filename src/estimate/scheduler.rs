//! Recipe-wide aggregation
//!
//! Fans ingredient lookups out over a bounded set of tokio tasks. Workers are
//! independent: a failed or slow lookup only empties its own slot.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use super::matcher::CandidateMatcher;
use crate::models::{IngredientNutrition, IngredientResult, ParsedIngredient};
use crate::parser::IngredientParser;
use crate::usda::SearchError;

/// Sentence text -> candidates, for sentences that matched something
pub type AggregatedResult = HashMap<String, IngredientResult>;

/// Runs the matcher over every ingredient of a recipe
#[derive(Clone)]
pub struct AggregationScheduler {
    matcher: Arc<CandidateMatcher>,
    parser: Arc<dyn IngredientParser>,
    max_in_flight: usize,
    call_timeout: Duration,
}

impl AggregationScheduler {
    pub fn new(
        matcher: Arc<CandidateMatcher>,
        parser: Arc<dyn IngredientParser>,
        max_in_flight: usize,
        call_timeout: Duration,
    ) -> Self {
        Self {
            matcher,
            parser,
            max_in_flight: max_in_flight.max(1),
            call_timeout,
        }
    }

    pub fn matcher(&self) -> &CandidateMatcher {
        &self.matcher
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight
    }

    /// Match one parsed ingredient, folding timeouts and remote errors into
    /// an empty result
    async fn match_parsed(
        matcher: &CandidateMatcher,
        ingredient: &ParsedIngredient,
        call_timeout: Duration,
    ) -> IngredientResult {
        let lookup = matcher.match_ingredient(ingredient.name.as_deref(), ingredient.amount.as_ref());
        let outcome = match tokio::time::timeout(call_timeout, lookup).await {
            Ok(result) => result,
            Err(_) => Err(SearchError::Timeout(call_timeout)),
        };

        match outcome {
            Ok(candidates) => candidates,
            Err(e) => {
                tracing::warn!("Lookup failed for '{}': {}", ingredient.sentence, e);
                Vec::new()
            }
        }
    }

    /// Match every sentence, at most `max_in_flight` lookups at a time
    ///
    /// Only sentences with at least one candidate appear in the result.
    /// Identical sentences share one entry.
    pub async fn match_all(&self, sentences: &[String]) -> AggregatedResult {
        let results: Arc<Mutex<AggregatedResult>> = Arc::new(Mutex::new(HashMap::new()));
        let permits = Arc::new(Semaphore::new(self.max_in_flight));
        let mut workers = JoinSet::new();

        for ingredient in self.parser.parse_many(sentences).into_iter().flatten() {
            let matcher = Arc::clone(&self.matcher);
            let permits = Arc::clone(&permits);
            let results = Arc::clone(&results);
            let call_timeout = self.call_timeout;

            workers.spawn(async move {
                // The semaphore is never closed
                let Ok(_permit) = permits.acquire_owned().await else {
                    return;
                };

                let candidates = Self::match_parsed(&matcher, &ingredient, call_timeout).await;
                if candidates.is_empty() {
                    return;
                }

                match results.lock() {
                    Ok(mut map) => {
                        map.insert(ingredient.sentence, candidates);
                    }
                    Err(poisoned) => {
                        poisoned.into_inner().insert(ingredient.sentence, candidates);
                    }
                }
            });
        }

        while let Some(joined) = workers.join_next().await {
            if let Err(e) = joined {
                tracing::warn!("Ingredient worker did not complete: {}", e);
            }
        }

        let map = match results.lock() {
            Ok(mut map) => std::mem::take(&mut *map),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        };
        tracing::info!("Matched {}/{} ingredient lines", map.len(), sentences.len());
        map
    }

    /// Match a recipe and lay the results out in ingredient order
    ///
    /// Lines without candidates are `None`.
    pub async fn recipe_nutrition(&self, sentences: &[String]) -> Vec<Option<IngredientResult>> {
        let map = self.match_all(sentences).await;
        project_positional(sentences, &map)
    }

    /// Nutrition for one free-text ingredient line
    ///
    /// Falls back to a zero-nutrient placeholder when the line cannot be
    /// parsed, has no name, or nothing matched.
    pub async fn ingredient_nutrition(&self, sentence: &str) -> IngredientNutrition {
        let Some(parsed) = self.parser.parse(sentence) else {
            return IngredientNutrition::placeholder(sentence);
        };

        let candidates = Self::match_parsed(&self.matcher, &parsed, self.call_timeout).await;
        if candidates.is_empty() {
            IngredientNutrition::placeholder(sentence)
        } else {
            IngredientNutrition::Matches(candidates)
        }
    }
}

/// Re-project an aggregated map onto the original ingredient order
pub fn project_positional(
    sentences: &[String],
    map: &AggregatedResult,
) -> Vec<Option<IngredientResult>> {
    sentences.iter().map(|s| map.get(s).cloned()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimate::test_support::{food, StubSearch};
    use crate::nutrition::{DensityTable, UnitConverter};
    use crate::parser::BasicIngredientParser;

    fn scheduler(stub: Arc<StubSearch>, max_in_flight: usize) -> AggregationScheduler {
        let converter = UnitConverter::new(Arc::new(DensityTable::default()));
        let matcher = CandidateMatcher::new(stub, converter, 10);
        AggregationScheduler::new(
            Arc::new(matcher),
            Arc::new(BasicIngredientParser::new()),
            max_in_flight,
            Duration::from_secs(5),
        )
    }

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_recipe_positional_with_unmatched_slot() {
        let stub = Arc::new(
            StubSearch::new()
                .with("flour", vec![food("Wheat flour, white", Some("Cereal Grains and Pasta"), 10.3)])
                .with("salt", vec![food("Salt, table", Some("Spices and Herbs"), 0.0)]),
        );
        let sched = scheduler(stub.clone(), 10);
        let recipe = lines(&["2 cups flour", "1 tsp salt", "asdfghjkl nonsense"]);

        let result = sched.recipe_nutrition(&recipe).await;

        assert_eq!(result.len(), 3);
        assert!(!result[0].as_ref().unwrap().is_empty());
        assert!(!result[1].as_ref().unwrap().is_empty());
        assert!(result[2].is_none());
        assert_eq!(result[0].as_ref().unwrap()[0].estimated_grams, 473.18);
    }

    #[tokio::test]
    async fn test_failure_does_not_affect_siblings() {
        let stub = Arc::new(
            StubSearch::new()
                .with("sugar", vec![food("Sugars, granulated", Some("Sweets"), 0.0)])
                .failing("butter")
                .with("milk", vec![food("Milk, whole", None, 3.2)]),
        );
        let sched = scheduler(stub.clone(), 2);
        let recipe = lines(&["1 cup sugar", "1 stick butter", "1 cup milk"]);

        let map = sched.match_all(&recipe).await;

        assert_eq!(map.len(), 2);
        assert!(map.contains_key("1 cup sugar"));
        assert!(map.contains_key("1 cup milk"));
        assert!(!map.contains_key("1 stick butter"));
        assert_eq!(stub.call_count(), 3);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_bounded_in_flight() {
        let mut stub = StubSearch::new().delayed(Duration::from_millis(50));
        let names: Vec<String> = (0..25).map(|i| format!("food{}", i)).collect();
        for name in &names {
            stub = stub.with(name, vec![food(name, None, 1.0)]);
        }
        let stub = Arc::new(stub);
        let sched = scheduler(stub.clone(), 10);

        let recipe: Vec<String> = names.iter().map(|n| format!("1 cup {}", n)).collect();
        let map = sched.match_all(&recipe).await;

        assert_eq!(map.len(), 25);
        assert_eq!(stub.call_count(), 25);
        assert_eq!(stub.peak_in_flight(), 10);
    }

    #[tokio::test]
    async fn test_nameless_lines_issue_no_query() {
        let stub = Arc::new(StubSearch::new());
        let sched = scheduler(stub.clone(), 10);
        let map = sched.match_all(&lines(&["2 cups", "   "])).await;
        assert!(map.is_empty());
        assert_eq!(stub.call_count(), 0);
    }

    #[tokio::test]
    async fn test_timeout_counts_as_empty() {
        let stub = Arc::new(
            StubSearch::new()
                .with("honey", vec![food("Honey", Some("Sweets"), 0.3)])
                .delayed(Duration::from_millis(200)),
        );
        let converter = UnitConverter::new(Arc::new(DensityTable::default()));
        let sched = AggregationScheduler::new(
            Arc::new(CandidateMatcher::new(stub, converter, 10)),
            Arc::new(BasicIngredientParser::new()),
            10,
            Duration::from_millis(10),
        );
        let map = sched.match_all(&lines(&["1 tbsp honey"])).await;
        assert!(map.is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_sentences_share_entry() {
        let stub = Arc::new(StubSearch::new().with("salt", vec![food("Salt, table", None, 0.0)]));
        let sched = scheduler(stub, 10);
        let recipe = lines(&["1 tsp salt", "1 cup rice", "1 tsp salt"]);

        let map = sched.match_all(&recipe).await;
        assert_eq!(map.len(), 1);

        let positional = project_positional(&recipe, &map);
        assert!(positional[0].is_some());
        assert!(positional[1].is_none());
        assert!(positional[2].is_some());
    }

    #[tokio::test]
    async fn test_single_ingredient_matches() {
        let stub = Arc::new(StubSearch::new().with("salt", vec![food("Salt, table", None, 0.0)]));
        let sched = scheduler(stub, 10);
        let result = sched.ingredient_nutrition("1 tsp salt").await;
        match result {
            IngredientNutrition::Matches(list) => {
                assert_eq!(list[0].name, "salt, table");
                assert_eq!(list[0].estimated_grams, 4.93);
            }
            other => panic!("expected matches, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_single_ingredient_placeholder() {
        let stub = Arc::new(StubSearch::new().failing("saffron"));
        let sched = scheduler(stub, 10);

        let unmatched = sched.ingredient_nutrition("asdfghjkl").await;
        assert_eq!(unmatched, IngredientNutrition::placeholder("asdfghjkl"));

        let failed = sched.ingredient_nutrition("1 pinch saffron").await;
        assert!(failed.is_placeholder());

        let blank = sched.ingredient_nutrition("  ").await;
        assert!(blank.is_placeholder());
    }
}
