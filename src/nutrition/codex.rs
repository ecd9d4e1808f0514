//! Nutrient codex
//!
//! Maps FoodData Central nutrient numbers onto the fixed positions of a
//! [`NutrientVector`] and derives energy from the macronutrients.

use crate::models::{NutrientVector, RawNutrient, NUTRIENT_COUNT};

use super::round2;

/// kcal per gram of protein
pub const ATWATER_PROTEIN: f64 = 4.0;
/// kcal per gram of fat
pub const ATWATER_FAT: f64 = 9.0;
/// kcal per gram of carbohydrate
pub const ATWATER_CARBS: f64 = 4.0;

pub const PROTEIN: &str = "203";
pub const FAT: &str = "204";
pub const CARBS: &str = "205";

/// Tracked nutrient numbers and their labels, in vector order (offset by 1)
pub const TRACKED_NUTRIENTS: [(&str, &str); NUTRIENT_COUNT - 1] = [
    (PROTEIN, "Protein (g)"),
    (FAT, "Total Fat (g)"),
    (CARBS, "Carbohydrates (g)"),
    ("269", "Sugars (g)"),
    ("291", "Fiber (g)"),
    ("301", "Calcium (mg)"),
    ("303", "Iron (mg)"),
    ("306", "Potassium (mg)"),
    ("307", "Sodium (mg)"),
    ("320", "Vitamin A (µg)"),
    ("401", "Vitamin C (mg)"),
    ("601", "Cholesterol (mg)"),
    ("605", "Trans Fat (g)"),
    ("606", "Saturated Fat (g)"),
];

pub const ENERGY_LABEL: &str = "Energy (kcal)";

/// Vector position for a nutrient number, if tracked
pub fn vector_index(code: &str) -> Option<usize> {
    TRACKED_NUTRIENTS
        .iter()
        .position(|(c, _)| *c == code)
        .map(|i| i + 1)
}

/// Tracked nutrient numbers, in order
pub fn tracked_codes() -> impl Iterator<Item = &'static str> {
    TRACKED_NUTRIENTS.iter().map(|(code, _)| *code)
}

/// Labels for every vector position
pub fn nutrient_labels() -> [&'static str; NUTRIENT_COUNT] {
    let mut labels = [ENERGY_LABEL; NUTRIENT_COUNT];
    for (i, (_, label)) in TRACKED_NUTRIENTS.iter().enumerate() {
        labels[i + 1] = *label;
    }
    labels
}

fn atwater_factor(code: &str) -> Option<f64> {
    match code {
        PROTEIN => Some(ATWATER_PROTEIN),
        FAT => Some(ATWATER_FAT),
        CARBS => Some(ATWATER_CARBS),
        _ => None,
    }
}

/// Convert per-100g source entries into a per-gram vector
///
/// Each value is scaled to one gram and rounded before it contributes to
/// energy. Untracked nutrient numbers are ignored.
pub fn extract_per_gram(entries: &[RawNutrient]) -> NutrientVector {
    let mut vector = NutrientVector::zero();
    let mut kcal = 0.0;

    for entry in entries {
        let per_gram = round2(entry.per_100 / 100.0);

        if let Some(factor) = atwater_factor(&entry.code) {
            kcal += per_gram * factor;
        }
        if let Some(index) = vector_index(&entry.code) {
            vector.set(index, per_gram);
        }
    }

    vector.set(0, round2(kcal));
    vector
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atwater_energy() {
        let entries = vec![
            RawNutrient::new("203", 10.0),
            RawNutrient::new("204", 5.0),
            RawNutrient::new("205", 20.0),
        ];
        let v = extract_per_gram(&entries);
        assert_eq!(v.get(1), Some(0.1));
        assert_eq!(v.get(2), Some(0.05));
        assert_eq!(v.get(3), Some(0.2));
        assert_eq!(v.energy_kcal(), 1.65);
    }

    #[test]
    fn test_untracked_codes_ignored() {
        let entries = vec![
            RawNutrient::new("208", 350.0),
            RawNutrient::new("999", 12.0),
            RawNutrient::new("307", 38758.0),
        ];
        let v = extract_per_gram(&entries);
        assert_eq!(v.energy_kcal(), 0.0);
        assert_eq!(v.get(vector_index("307").unwrap()), Some(387.58));
        let nonzero = v.values().iter().filter(|x| **x != 0.0).count();
        assert_eq!(nonzero, 1);
    }

    #[test]
    fn test_empty_entries_are_zero() {
        assert!(extract_per_gram(&[]).is_zero());
    }

    #[test]
    fn test_vector_positions() {
        assert_eq!(vector_index("203"), Some(1));
        assert_eq!(vector_index("606"), Some(14));
        assert_eq!(vector_index("208"), None);
        assert_eq!(tracked_codes().count(), 14);
    }

    #[test]
    fn test_labels() {
        let labels = nutrient_labels();
        assert_eq!(labels[0], ENERGY_LABEL);
        assert_eq!(labels[1], "Protein (g)");
        assert_eq!(labels[14], "Saturated Fat (g)");
    }
}
