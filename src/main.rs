//! Recipe Nutrition Estimator
//!
//! An MCP server for per-ingredient recipe nutrition estimates.

use std::sync::Arc;

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use recipe_nutrition::build_info;
use recipe_nutrition::config::Config;
use recipe_nutrition::estimate::build_scheduler;
use recipe_nutrition::mcp::NutritionService;
use recipe_nutrition::nutrition::DensityTable;
use recipe_nutrition::parser::BasicIngredientParser;
use recipe_nutrition::usda::UsdaClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logging goes to stderr to not interfere with MCP stdio
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("recipe_nutrition=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    build_info::print_startup_banner();

    // Credentials and the density dataset must be good before serving anything
    let config = Config::from_env()?;
    eprintln!("Density dataset: {}", config.density_path.display());

    let densities = Arc::new(DensityTable::load_path(&config.density_path)?);
    eprintln!("Density categories: {}", densities.len());

    let client = Arc::new(UsdaClient::from_config(&config)?);
    let scheduler = build_scheduler(
        &config,
        Arc::clone(&densities),
        client.clone(),
        Arc::new(BasicIngredientParser::new()),
    );

    let service = NutritionService::new(
        config.density_path.clone(),
        densities,
        scheduler,
        client,
        config.page_size,
    );

    eprintln!("Starting MCP server on stdio...");
    let transport = (stdin(), stdout());
    let server = service.serve(transport).await?;
    server.waiting().await?;

    Ok(())
}
