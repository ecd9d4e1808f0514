//! Unit registry and conversion constants
//!
//! Standard SI/US mass and volume units, a few fixed kitchen approximations,
//! and count-like units that carry no mass of their own.

use serde::Serialize;

// ============================================================================
// Volume Conversion Constants (to milliliters)
// ============================================================================

/// Milliliters per teaspoon
pub const ML_PER_TSP: f64 = 4.92892;
/// Milliliters per tablespoon
pub const ML_PER_TBSP: f64 = 14.7868;
/// Milliliters per fluid ounce
pub const ML_PER_FL_OZ: f64 = 29.5735;
/// Milliliters per cup (US)
pub const ML_PER_CUP: f64 = 236.588;
/// Milliliters per pint (US)
pub const ML_PER_PINT: f64 = 473.176;
/// Milliliters per quart (US)
pub const ML_PER_QUART: f64 = 946.353;
/// Milliliters per liter
pub const ML_PER_LITER: f64 = 1000.0;
/// Milliliters per gallon (US)
pub const ML_PER_GALLON: f64 = 3785.41;

// ============================================================================
// Mass Conversion Constants (to grams)
// ============================================================================

pub const G_PER_MG: f64 = 0.001;
pub const G_PER_KG: f64 = 1000.0;
/// Avoirdupois ounce
pub const G_PER_OZ: f64 = 28.349523125;
/// Avoirdupois pound
pub const G_PER_LB: f64 = 453.59237;

// Kitchen approximations, expressed in ounces
pub const OZ_PER_CAN: f64 = 10.5;
pub const OZ_PER_STALK: f64 = 7.0;
pub const OZ_PER_STICK: f64 = 8.0;

/// Physical dimension of a recognized unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "factor", rename_all = "lowercase")]
pub enum UnitKind {
    /// Grams per unit
    Mass(f64),
    /// Milliliters per unit
    Volume(f64),
    /// Countable with no fixed mass (clove, pinch, piece)
    Count,
}

impl UnitKind {
    pub fn label(&self) -> &'static str {
        match self {
            UnitKind::Mass(_) => "mass",
            UnitKind::Volume(_) => "volume",
            UnitKind::Count => "count",
        }
    }
}

/// Lowercase, trim, drop a trailing period ("Tbsp." -> "tbsp")
pub fn normalize_unit(unit: &str) -> String {
    let lower = unit.trim().to_lowercase();
    let collapsed: Vec<&str> = lower.split_whitespace().collect();
    collapsed.join(" ").trim_end_matches('.').to_string()
}

/// Get the conversion factor to grams for a mass unit
pub fn grams_per_unit(unit: &str) -> Option<f64> {
    match normalize_unit(unit).as_str() {
        "g" | "gr" | "gram" | "grams" | "gramme" | "grammes" => Some(1.0),
        "mg" | "milligram" | "milligrams" => Some(G_PER_MG),
        "kg" | "kilo" | "kilos" | "kilogram" | "kilograms" => Some(G_PER_KG),
        "oz" | "ounce" | "ounces" => Some(G_PER_OZ),
        "lb" | "lbs" | "pound" | "pounds" => Some(G_PER_LB),
        "can" | "cans" => Some(OZ_PER_CAN * G_PER_OZ),
        "stalk" | "stalks" => Some(OZ_PER_STALK * G_PER_OZ),
        "stick" | "sticks" => Some(OZ_PER_STICK * G_PER_OZ),
        _ => None,
    }
}

/// Get the conversion factor to milliliters for a volume unit
pub fn ml_per_unit(unit: &str) -> Option<f64> {
    match normalize_unit(unit).as_str() {
        "ml" | "milliliter" | "milliliters" | "millilitre" | "millilitres" | "cc" => Some(1.0),
        "cl" | "centiliter" | "centiliters" | "centilitre" | "centilitres" => Some(10.0),
        "dl" | "deciliter" | "deciliters" | "decilitre" | "decilitres" => Some(100.0),
        "l" | "liter" | "liters" | "litre" | "litres" => Some(ML_PER_LITER),
        "tsp" | "tsps" | "teaspoon" | "teaspoons" => Some(ML_PER_TSP),
        "tbsp" | "tbsps" | "tbs" | "tbl" | "tablespoon" | "tablespoons" => Some(ML_PER_TBSP),
        "fl oz" | "floz" | "fluid ounce" | "fluid ounces" => Some(ML_PER_FL_OZ),
        "cup" | "cups" => Some(ML_PER_CUP),
        "pt" | "pint" | "pints" => Some(ML_PER_PINT),
        "qt" | "quart" | "quarts" => Some(ML_PER_QUART),
        "gal" | "gallon" | "gallons" => Some(ML_PER_GALLON),
        _ => None,
    }
}

fn is_count_unit(unit: &str) -> bool {
    matches!(
        normalize_unit(unit).as_str(),
        "each"
            | "ea"
            | "count"
            | "piece"
            | "pieces"
            | "item"
            | "items"
            | "unit"
            | "units"
            | "whole"
            | "dozen"
            | "clove"
            | "cloves"
            | "slice"
            | "slices"
            | "pinch"
            | "pinches"
            | "dash"
            | "dashes"
            | "drop"
            | "drops"
            | "leaf"
            | "leaves"
    )
}

/// Look up a unit in the registry; `None` means the unit is not recognized
pub fn lookup_unit(unit: &str) -> Option<UnitKind> {
    if let Some(factor) = grams_per_unit(unit) {
        return Some(UnitKind::Mass(factor));
    }
    if let Some(factor) = ml_per_unit(unit) {
        return Some(UnitKind::Volume(factor));
    }
    if is_count_unit(unit) {
        return Some(UnitKind::Count);
    }
    None
}
