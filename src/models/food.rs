//! Food-composition search results

use serde::{Deserialize, Serialize};

/// One nutrient entry as reported by the source, per 100 g of food
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawNutrient {
    /// Source nutrient number (e.g. "203" for protein)
    pub code: String,
    pub per_100: f64,
}

impl RawNutrient {
    pub fn new(code: impl Into<String>, per_100: f64) -> Self {
        Self {
            code: code.into(),
            per_100,
        }
    }
}

/// A candidate food returned by a search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodCandidate {
    /// FoodData Central id, when the source reports one
    pub fdc_id: Option<u64>,
    pub description: String,
    pub category: Option<String>,
    pub nutrients: Vec<RawNutrient>,
}
