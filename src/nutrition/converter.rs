//! Quantity to mass conversion
//!
//! Turns a quantity and unit into an approximate mass in grams. Volumes go
//! through the category density table.

use std::sync::Arc;

use super::density::DensityTable;
use super::round2;
use super::units::{lookup_unit, UnitKind};

/// Converts measured amounts to grams
#[derive(Debug, Clone)]
pub struct UnitConverter {
    densities: Arc<DensityTable>,
}

impl UnitConverter {
    pub fn new(densities: Arc<DensityTable>) -> Self {
        Self { densities }
    }

    pub fn densities(&self) -> &DensityTable {
        &self.densities
    }

    /// Convert a quantity in the given unit to grams
    ///
    /// Returns `None` when the unit is not in the registry. Count-like units
    /// have no fixed mass and convert to `Some(0.0)`. `category` selects the
    /// density for volume units; unknown or absent categories use water.
    pub fn convert_to_grams(&self, quantity: f64, unit: &str, category: Option<&str>) -> Option<f64> {
        let grams = match lookup_unit(unit)? {
            UnitKind::Mass(grams_per) => quantity * grams_per,
            UnitKind::Volume(ml_per) => {
                let density = self.densities.density_for(category);
                quantity * ml_per * density
            }
            UnitKind::Count => 0.0,
        };

        Some(round2(grams))
    }
}
