//! Candidate matches and per-ingredient results

use serde::{Deserialize, Serialize};

use super::NutrientVector;

/// One food-database entry proposed for an ingredient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateMatch {
    /// Lowercased food description
    pub name: String,
    /// Estimated ingredient mass; 0 when the amount could not be converted
    pub estimated_grams: f64,
    /// Per gram of the matched food, not scaled by `estimated_grams`
    pub nutrients: NutrientVector,
}

/// Candidates for one ingredient sentence, in source order
pub type IngredientResult = Vec<CandidateMatch>;

/// Answer for a single ingredient lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IngredientNutrition {
    Matches(IngredientResult),
    /// Nothing usable came back; nutrients are all zero
    Placeholder {
        ingredient: String,
        nutrients: NutrientVector,
    },
}

impl IngredientNutrition {
    pub fn placeholder(ingredient: impl Into<String>) -> Self {
        IngredientNutrition::Placeholder {
            ingredient: ingredient.into(),
            nutrients: NutrientVector::zero(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, IngredientNutrition::Placeholder { .. })
    }
}
