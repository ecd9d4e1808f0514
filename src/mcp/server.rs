//! Recipe Nutrition MCP Server Implementation

use std::path::PathBuf;
use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::estimate::AggregationScheduler;
use crate::nutrition::DensityTable;
use crate::tools::nutrition;
use crate::tools::status::StatusTracker;
use crate::usda::UsdaClient;

/// Recipe Nutrition MCP Service
#[derive(Clone)]
pub struct NutritionService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    densities: Arc<DensityTable>,
    scheduler: AggregationScheduler,
    client: Arc<UsdaClient>,
    tool_router: ToolRouter<NutritionService>,
}

impl NutritionService {
    pub fn new(
        density_path: PathBuf,
        densities: Arc<DensityTable>,
        scheduler: AggregationScheduler,
        client: Arc<UsdaClient>,
        page_size: u32,
    ) -> Self {
        let tracker = StatusTracker::new(
            density_path,
            densities.len(),
            page_size,
            scheduler.max_in_flight(),
        );
        Self {
            status_tracker: Arc::new(Mutex::new(tracker)),
            densities,
            scheduler,
            client,
            tool_router: Self::tool_router(),
        }
    }
}

// ============================================================================
// Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RecipeNutritionParams {
    /// Ingredient lines exactly as written in the recipe
    pub ingredients: Vec<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct IngredientNutritionParams {
    pub ingredient: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ConvertToGramsParams {
    pub quantity: f64,
    pub unit: String,
    /// Food category used to pick a density for volume units
    pub category: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct FoodDetailsParams {
    /// FoodData Central ids, at most 20
    pub fdc_ids: Vec<u64>,
}

fn to_json<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

// ============================================================================
// Tool Router
// ============================================================================

#[tool_router]
impl NutritionService {
    // --- Status ---

    #[tool(description = "Get the current status of the nutrition estimator including build info, density dataset and process information")]
    async fn nutrition_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        to_json(&tracker.get_status())
    }

    #[tool(description = "Get instructions for using the nutrition estimator and reading its per-gram results. Call this before the first estimate in a session.")]
    fn nutrition_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::NUTRITION_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(NUTRITION_INSTRUCTIONS)]))
    }

    // --- Estimation ---

    #[tool(description = "Estimate nutrition for every ingredient line of a recipe. Returns one slot per line in the original order; unmatched lines are null. Nutrients are per gram of the matched food.")]
    async fn recipe_nutrition(&self, Parameters(p): Parameters<RecipeNutritionParams>) -> Result<CallToolResult, McpError> {
        let result = nutrition::recipe_nutrition(&self.scheduler, p.ingredients)
            .await
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Estimate nutrition for a single ingredient line such as '1 tsp salt'. Returns candidate matches, or a zero-nutrient placeholder when nothing matched.")]
    async fn ingredient_nutrition(&self, Parameters(p): Parameters<IngredientNutritionParams>) -> Result<CallToolResult, McpError> {
        let result = nutrition::ingredient_nutrition(&self.scheduler, &p.ingredient)
            .await
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Convert a quantity and unit to grams. Volume units use the density of the optional food category (water when unknown). grams is null for unrecognized units.")]
    fn convert_to_grams(&self, Parameters(p): Parameters<ConvertToGramsParams>) -> Result<CallToolResult, McpError> {
        let result = nutrition::convert_to_grams(self.scheduler.matcher().converter(), p.quantity, &p.unit, p.category)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Fetch per-gram nutrients for specific FoodData Central foods by fdc_id, e.g. to pin down a candidate from an earlier estimate")]
    async fn food_details(&self, Parameters(p): Parameters<FoodDetailsParams>) -> Result<CallToolResult, McpError> {
        let result = nutrition::food_details(&self.client, &p.fdc_ids)
            .await
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "List the food categories and densities (g/mL) used for volume conversions")]
    fn list_density_categories(&self) -> Result<CallToolResult, McpError> {
        to_json(&nutrition::list_density_categories(&self.densities))
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for NutritionService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "recipe-nutrition".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Recipe Nutrition Estimator".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Recipe Nutrition Estimator - approximate per-ingredient nutrition from USDA FoodData Central. \
                 Call nutrition_instructions first. \
                 Recipes: recipe_nutrition (all lines at once). Single lines: ingredient_nutrition. \
                 Specific foods: food_details. \
                 Units: convert_to_grams, list_density_categories. Service: nutrition_status."
                    .into(),
            ),
        }
    }
}
