//! Data models
//!
//! Plain data carried through the estimation pipeline.

mod candidate;
mod food;
mod ingredient;
mod nutrients;

pub use candidate::{CandidateMatch, IngredientNutrition, IngredientResult};
pub use food::{FoodCandidate, RawNutrient};
pub use ingredient::{Amount, ParsedIngredient};
pub use nutrients::{NutrientVector, NUTRIENT_COUNT};
