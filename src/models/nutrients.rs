//! Per-gram nutrient vector
//!
//! Fixed-length, ordered. Position 0 holds derived energy; positions 1..=14
//! follow the tracked nutrient order of the codex.

use serde::{Deserialize, Serialize};

/// Energy plus the 14 tracked nutrients
pub const NUTRIENT_COUNT: usize = 15;

/// Nutrient content per gram of the matched reference food
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NutrientVector([f64; NUTRIENT_COUNT]);

impl NutrientVector {
    /// All zeros
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn from_values(values: [f64; NUTRIENT_COUNT]) -> Self {
        Self(values)
    }

    pub fn energy_kcal(&self) -> f64 {
        self.0[0]
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied()
    }

    pub fn set(&mut self, index: usize, value: f64) {
        if let Some(slot) = self.0.get_mut(index) {
            *slot = value;
        }
    }

    pub fn values(&self) -> &[f64; NUTRIENT_COUNT] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|v| *v == 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_has_fixed_length() {
        let v = NutrientVector::zero();
        assert_eq!(v.values().len(), NUTRIENT_COUNT);
        assert!(v.is_zero());
    }

    #[test]
    fn test_set_out_of_range_is_ignored() {
        let mut v = NutrientVector::zero();
        v.set(NUTRIENT_COUNT, 3.0);
        v.set(2, 0.5);
        assert_eq!(v.get(2), Some(0.5));
        assert_eq!(v.get(NUTRIENT_COUNT), None);
    }

    #[test]
    fn test_serializes_as_flat_array() {
        let json = serde_json::to_string(&NutrientVector::zero()).unwrap();
        assert_eq!(json, "[0.0,0.0,0.0,0.0,0.0,0.0,0.0,0.0,0.0,0.0,0.0,0.0,0.0,0.0,0.0]");
    }
}
