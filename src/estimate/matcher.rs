//! Candidate matching for a single ingredient

use std::collections::HashSet;
use std::sync::Arc;

use crate::models::{Amount, CandidateMatch, IngredientResult};
use crate::nutrition::{extract_per_gram, UnitConverter};
use crate::usda::{FoodSearch, SearchResult};

/// Looks up one ingredient name and turns the hits into candidate matches
#[derive(Clone)]
pub struct CandidateMatcher {
    source: Arc<dyn FoodSearch>,
    converter: UnitConverter,
    page_size: u32,
}

impl CandidateMatcher {
    pub fn new(source: Arc<dyn FoodSearch>, converter: UnitConverter, page_size: u32) -> Self {
        Self {
            source,
            converter,
            page_size,
        }
    }

    pub fn converter(&self) -> &UnitConverter {
        &self.converter
    }

    /// Match an ingredient against the food source
    ///
    /// Candidates keep the source's order, and only the first candidate with a
    /// given lowercased description is kept. Grams are estimated against each
    /// candidate's own category; an amount that cannot be converted counts as
    /// 0 g. The nutrient vector stays per gram of the matched food.
    pub async fn match_ingredient(
        &self,
        name: Option<&str>,
        amount: Option<&Amount>,
    ) -> SearchResult<IngredientResult> {
        let Some(name) = name else {
            return Ok(Vec::new());
        };

        let foods = self.source.search(name, self.page_size).await?;

        let mut seen = HashSet::new();
        let mut matches = Vec::with_capacity(foods.len());
        for food in foods {
            let key = food.description.to_lowercase();
            if !seen.insert(key.clone()) {
                continue;
            }

            let estimated_grams = amount
                .and_then(|a| {
                    self.converter
                        .convert_to_grams(a.quantity, &a.unit, food.category.as_deref())
                })
                .unwrap_or(0.0);

            matches.push(CandidateMatch {
                name: key,
                estimated_grams,
                nutrients: extract_per_gram(&food.nutrients),
            });
        }

        tracing::debug!("'{}': {} candidate(s)", name, matches.len());
        Ok(matches)
    }
}
