//! One-shot recipe estimate
//! Usage: cargo run --bin estimate_recipe -- [ingredients.txt]
//!
//! Reads one ingredient per line (stdin when no file is given), folds leading
//! mixed fractions ("1 1/2" -> "1.5"), and prints the positional result as JSON.

use std::io::Read;
use std::sync::Arc;

use recipe_nutrition::config::Config;
use recipe_nutrition::estimate::build_scheduler;
use recipe_nutrition::nutrition::DensityTable;
use recipe_nutrition::parser::{normalize_mixed_fractions, BasicIngredientParser};
use recipe_nutrition::tools::nutrition;
use recipe_nutrition::usda::UsdaClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("recipe_nutrition=warn".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let raw = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let ingredients: Vec<String> = raw
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(normalize_mixed_fractions)
        .collect();
    eprintln!("Estimating {} ingredient line(s)", ingredients.len());

    let config = Config::from_env()?;
    let densities = Arc::new(DensityTable::load_path(&config.density_path)?);
    let scheduler = build_scheduler(
        &config,
        densities,
        Arc::new(UsdaClient::from_config(&config)?),
        Arc::new(BasicIngredientParser::new()),
    );

    let response = nutrition::recipe_nutrition(&scheduler, ingredients).await?;
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}
