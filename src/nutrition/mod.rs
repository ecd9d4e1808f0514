//! Nutrition estimation primitives
//!
//! Unit conversion, density lookup and nutrient extraction.

pub mod codex;
pub mod converter;
pub mod density;
pub mod units;

pub use codex::{extract_per_gram, nutrient_labels, ATWATER_CARBS, ATWATER_FAT, ATWATER_PROTEIN};
pub use converter::UnitConverter;
pub use density::{DensityEntry, DensityError, DensityResult, DensityTable, NEUTRAL_DENSITY};
pub use units::{lookup_unit, normalize_unit, UnitKind};

/// Round to 2 decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(907.18474), 907.18);
        assert_eq!(round2(243.68564), 243.69);
        assert_eq!(round2(0.0), 0.0);
    }
}
