//! Parsed ingredient lines

use serde::{Deserialize, Serialize};

/// A measured amount; only exists when both quantity and unit were found
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Amount {
    pub quantity: f64,
    pub unit: String,
}

impl Amount {
    pub fn new(quantity: f64, unit: impl Into<String>) -> Self {
        Self {
            quantity,
            unit: unit.into(),
        }
    }
}

/// Structured form of one ingredient sentence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedIngredient {
    /// The sentence as authored; used as the aggregation key
    pub sentence: String,
    pub name: Option<String>,
    pub amount: Option<Amount>,
}
