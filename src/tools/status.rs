//! Status Tool
//!
//! Runtime status of the estimator service and usage instructions.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;

/// Usage instructions for AI assistants
pub const NUTRITION_INSTRUCTIONS: &str = r#"
# Recipe Nutrition Estimator

Estimates nutrition for recipe ingredients against USDA FoodData Central.

## Tools

- `recipe_nutrition` - pass every ingredient line of a recipe, exactly as written
  (e.g. "2 cups all-purpose flour"). Returns one slot per line, in order.
  A slot is `null` when nothing matched.
- `ingredient_nutrition` - one ingredient line. Returns a list of candidates,
  or a placeholder with all-zero nutrients when nothing matched.
- `food_details` - per-gram nutrients for specific FoodData Central ids.
- `convert_to_grams` - quantity + unit (+ optional food category) to grams.
- `list_density_categories` - the category densities used for volume units.

## Reading results

Each candidate has:
- `name` - the matched food description (lowercase)
- `estimated_grams` - approximate mass of the ingredient amount, 0 when the
  unit could not be converted (e.g. "bunch") or no amount was given
- `nutrients` - 15 values **per gram of the matched food**, in the order of
  `nutrient_labels`: energy (kcal), protein, fat, carbohydrates, sugars, fiber,
  calcium, iron, potassium, sodium, vitamin A, vitamin C, cholesterol,
  trans fat, saturated fat

To get totals for the ingredient, multiply each nutrient by `estimated_grams`.
Energy is derived with Atwater factors (protein 4, fat 9, carbohydrate 4 kcal/g).

## Supported units

Mass: g, mg, kg, oz, lb, plus can (10.5 oz), stalk (7 oz), stick (8 oz).
Volume: ml, cl, dl, l, tsp, tbsp, fl oz, cup, pint, quart, gallon.
Count-like units (clove, pinch, piece, slice...) are recognized but weigh 0 g.
"#;

/// Status information
#[derive(Debug, Serialize)]
pub struct EstimatorStatus {
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,
    pub density_path: String,
    pub density_categories: usize,
    pub search_page_size: u32,
    pub max_in_flight: usize,
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Tracks service start time and static settings for status reports
pub struct StatusTracker {
    start_time: Instant,
    density_path: PathBuf,
    density_categories: usize,
    search_page_size: u32,
    max_in_flight: usize,
}

impl StatusTracker {
    pub fn new(
        density_path: PathBuf,
        density_categories: usize,
        search_page_size: u32,
        max_in_flight: usize,
    ) -> Self {
        Self {
            start_time: Instant::now(),
            density_path,
            density_categories,
            search_page_size,
            max_in_flight,
        }
    }

    /// Get the current status
    pub fn get_status(&self) -> EstimatorStatus {
        let build_info = BuildInfo::current();

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        EstimatorStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            density_path: self.density_path.display().to_string(),
            density_categories: self.density_categories,
            search_page_size: self.search_page_size,
            max_in_flight: self.max_in_flight,
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_reports_settings() {
        let tracker = StatusTracker::new(PathBuf::from("data/densities.csv"), 42, 10, 10);
        let status = tracker.get_status();
        assert_eq!(status.density_categories, 42);
        assert_eq!(status.max_in_flight, 10);
        assert_eq!(status.process_id, std::process::id());
        assert_eq!(status.density_path, "data/densities.csv");
    }
}
