//! Ingredient sentence parsing
//!
//! The estimator only needs a name and an optional measured amount from each
//! line. Any parser can be plugged in through [`IngredientParser`].

mod basic;
mod quantity;

pub use basic::BasicIngredientParser;
pub use quantity::{normalize_mixed_fractions, parse_number};

use crate::models::ParsedIngredient;

/// Turns free-text ingredient lines into structured form
pub trait IngredientParser: Send + Sync {
    /// Parse one sentence; `None` when nothing usable was found
    fn parse(&self, sentence: &str) -> Option<ParsedIngredient>;

    /// Parse many sentences independently, keeping positions
    fn parse_many(&self, sentences: &[String]) -> Vec<Option<ParsedIngredient>> {
        sentences.iter().map(|s| self.parse(s)).collect()
    }
}
