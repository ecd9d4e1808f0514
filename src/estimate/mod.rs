//! Estimation pipeline
//!
//! Per-ingredient candidate matching and recipe-wide aggregation.

pub mod matcher;
pub mod scheduler;

pub use matcher::CandidateMatcher;
pub use scheduler::{project_positional, AggregatedResult, AggregationScheduler};

use std::sync::Arc;

use crate::config::Config;
use crate::nutrition::{DensityTable, UnitConverter};
use crate::parser::IngredientParser;
use crate::usda::FoodSearch;

/// Wire the pipeline together from configuration and its collaborators
pub fn build_scheduler(
    config: &Config,
    densities: Arc<DensityTable>,
    source: Arc<dyn FoodSearch>,
    parser: Arc<dyn IngredientParser>,
) -> AggregationScheduler {
    let matcher = CandidateMatcher::new(source, UnitConverter::new(densities), config.page_size);
    AggregationScheduler::new(
        Arc::new(matcher),
        parser,
        config.max_in_flight,
        config.request_timeout,
    )
}
