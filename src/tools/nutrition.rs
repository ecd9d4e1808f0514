//! Nutrition estimation tools

use serde::Serialize;

use crate::estimate::AggregationScheduler;
use crate::models::{FoodCandidate, IngredientNutrition, IngredientResult, NutrientVector, NUTRIENT_COUNT};
use crate::nutrition::{
    extract_per_gram, lookup_unit, nutrient_labels, DensityEntry, DensityTable, UnitConverter, UnitKind,
};
use crate::usda::UsdaClient;

/// Upper bound on lines accepted in one recipe request
pub const MAX_RECIPE_LINES: usize = 200;

/// Upper bound on ids accepted in one food_details request
pub const MAX_FDC_IDS: usize = 20;

/// Response for recipe_nutrition
#[derive(Debug, Serialize)]
pub struct RecipeNutritionResponse {
    pub ingredients: Vec<String>,
    /// One slot per ingredient line, `null` when nothing matched
    pub nutrients: Vec<Option<IngredientResult>>,
    pub nutrient_labels: [&'static str; NUTRIENT_COUNT],
    pub matched: usize,
}

/// Response for convert_to_grams
#[derive(Debug, Serialize)]
pub struct ConvertToGramsResponse {
    pub quantity: f64,
    pub unit: String,
    pub category: Option<String>,
    /// `null` when the unit is not recognized
    pub grams: Option<f64>,
    pub unit_kind: Option<&'static str>,
    /// Density applied for volume units (g/mL)
    pub density: Option<f64>,
}

/// Response for list_density_categories
#[derive(Debug, Serialize)]
pub struct DensityCategoriesResponse {
    pub categories: Vec<DensityEntry>,
    pub total: usize,
}

/// One food looked up by FDC id
#[derive(Debug, Serialize)]
pub struct FoodDetail {
    pub fdc_id: Option<u64>,
    pub name: String,
    pub category: Option<String>,
    /// Per gram of the food, in `nutrient_labels` order
    pub nutrients: NutrientVector,
}

impl From<FoodCandidate> for FoodDetail {
    fn from(food: FoodCandidate) -> Self {
        Self {
            nutrients: extract_per_gram(&food.nutrients),
            fdc_id: food.fdc_id,
            name: food.description.to_lowercase(),
            category: food.category,
        }
    }
}

/// Response for food_details
#[derive(Debug, Serialize)]
pub struct FoodDetailsResponse {
    pub foods: Vec<FoodDetail>,
    pub nutrient_labels: [&'static str; NUTRIENT_COUNT],
    /// Requested ids the source had no record for
    pub missing: Vec<u64>,
    pub total: usize,
}

/// Estimate nutrition for every line of a recipe
pub async fn recipe_nutrition(
    scheduler: &AggregationScheduler,
    ingredients: Vec<String>,
) -> Result<RecipeNutritionResponse, String> {
    if ingredients.len() > MAX_RECIPE_LINES {
        return Err(format!(
            "Too many ingredient lines ({}); the limit is {}",
            ingredients.len(),
            MAX_RECIPE_LINES
        ));
    }

    let nutrients = scheduler.recipe_nutrition(&ingredients).await;
    let matched = nutrients.iter().filter(|slot| slot.is_some()).count();

    Ok(RecipeNutritionResponse {
        ingredients,
        nutrients,
        nutrient_labels: nutrient_labels(),
        matched,
    })
}

/// Estimate nutrition for a single ingredient line
pub async fn ingredient_nutrition(
    scheduler: &AggregationScheduler,
    ingredient: &str,
) -> Result<IngredientNutrition, String> {
    let ingredient = ingredient.trim();
    if ingredient.is_empty() {
        return Err("ingredient cannot be empty".to_string());
    }
    Ok(scheduler.ingredient_nutrition(ingredient).await)
}

/// Convert an amount to grams
pub fn convert_to_grams(
    converter: &UnitConverter,
    quantity: f64,
    unit: &str,
    category: Option<String>,
) -> Result<ConvertToGramsResponse, String> {
    if !quantity.is_finite() || quantity < 0.0 {
        return Err("quantity must be a non-negative number".to_string());
    }
    let unit = unit.trim();
    if unit.is_empty() {
        return Err("unit cannot be empty".to_string());
    }

    let category = category.filter(|c| !c.trim().is_empty());
    let kind = lookup_unit(unit);
    let density = match kind {
        Some(UnitKind::Volume(_)) => Some(converter.densities().density_for(category.as_deref())),
        _ => None,
    };

    Ok(ConvertToGramsResponse {
        quantity,
        unit: unit.to_string(),
        grams: converter.convert_to_grams(quantity, unit, category.as_deref()),
        category,
        unit_kind: kind.map(|k| k.label()),
        density,
    })
}

/// Per-gram nutrients for specific FoodData Central foods
pub async fn food_details(client: &UsdaClient, fdc_ids: &[u64]) -> Result<FoodDetailsResponse, String> {
    if fdc_ids.is_empty() {
        return Err("fdc_ids cannot be empty".to_string());
    }
    if fdc_ids.len() > MAX_FDC_IDS {
        return Err(format!(
            "Too many ids ({}); the limit is {}",
            fdc_ids.len(),
            MAX_FDC_IDS
        ));
    }

    let foods: Vec<FoodDetail> = client
        .fetch_foods(fdc_ids)
        .await
        .map_err(|e| format!("Food lookup failed: {}", e))?
        .into_iter()
        .map(FoodDetail::from)
        .collect();

    let missing = fdc_ids
        .iter()
        .copied()
        .filter(|id| !foods.iter().any(|f| f.fdc_id == Some(*id)))
        .collect();

    Ok(FoodDetailsResponse {
        total: foods.len(),
        foods,
        nutrient_labels: nutrient_labels(),
        missing,
    })
}

/// All loaded density categories
pub fn list_density_categories(table: &DensityTable) -> DensityCategoriesResponse {
    let categories: Vec<DensityEntry> = table.entries().into_iter().cloned().collect();
    DensityCategoriesResponse {
        total: categories.len(),
        categories,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use crate::usda::test_support::serve_once;

    fn converter() -> UnitConverter {
        let table = DensityTable::from_entries(vec![DensityEntry::from_bounds(
            "Fats and Oils",
            Some(0.91),
            Some(0.91),
        )]);
        UnitConverter::new(Arc::new(table))
    }

    #[test]
    fn test_convert_volume_reports_density() {
        let resp = convert_to_grams(&converter(), 1.0, "tbsp", Some("Fats and Oils".into())).unwrap();
        assert_eq!(resp.unit_kind, Some("volume"));
        assert_eq!(resp.density, Some(0.91));
        assert_eq!(resp.grams, Some(13.46));
    }

    #[test]
    fn test_convert_unknown_unit_is_null() {
        let resp = convert_to_grams(&converter(), 1.0, "bunch", None).unwrap();
        assert_eq!(resp.grams, None);
        assert_eq!(resp.unit_kind, None);
        let json = serde_json::to_value(&resp).unwrap();
        assert!(json["grams"].is_null());
    }

    #[test]
    fn test_convert_blank_category_ignored() {
        let resp = convert_to_grams(&converter(), 2.0, "oz", Some("  ".into())).unwrap();
        assert_eq!(resp.category, None);
        assert_eq!(resp.grams, Some(56.7));
        assert_eq!(resp.density, None);
    }

    #[test]
    fn test_convert_validation() {
        assert!(convert_to_grams(&converter(), -1.0, "g", None).is_err());
        assert!(convert_to_grams(&converter(), f64::NAN, "g", None).is_err());
        assert!(convert_to_grams(&converter(), 1.0, " ", None).is_err());
    }

    #[tokio::test]
    async fn test_food_details_per_gram() {
        let body = r#"[{"fdcId": 171287, "description": "Egg, whole, raw, fresh",
            "foodCategory": "Dairy and Egg Products",
            "foodNutrients": [
                {"number": "203", "amount": 12.6},
                {"number": "204", "amount": 9.51},
                {"number": "205", "amount": 0.7}
            ]}]"#;
        let (url, server) = serve_once("200 OK", body).await;
        let client = UsdaClient::new(url, "key", Duration::from_secs(5)).unwrap();

        let resp = food_details(&client, &[171287, 42]).await.unwrap();
        let request = server.await.unwrap();

        assert!(request.contains("fdcIds=171287%2C42"));
        assert_eq!(resp.total, 1);
        assert_eq!(resp.missing, vec![42]);
        let egg = &resp.foods[0];
        assert_eq!(egg.name, "egg, whole, raw, fresh");
        assert_eq!(egg.category.as_deref(), Some("Dairy and Egg Products"));
        assert_eq!(egg.nutrients.get(1), Some(0.13));
        assert_eq!(egg.nutrients.get(2), Some(0.1));
        assert_eq!(resp.nutrient_labels[0], "Energy (kcal)");
    }

    #[tokio::test]
    async fn test_food_details_validation() {
        let client = UsdaClient::new("http://127.0.0.1:9", "key", Duration::from_millis(50)).unwrap();
        assert!(food_details(&client, &[]).await.is_err());

        let too_many: Vec<u64> = (1..=(MAX_FDC_IDS as u64 + 1)).collect();
        let err = food_details(&client, &too_many).await.unwrap_err();
        assert!(err.contains("Too many ids"));
    }

    #[tokio::test]
    async fn test_food_details_remote_error() {
        let (url, _server) = serve_once("403 Forbidden", r#"{"error":"bad key"}"#).await;
        let client = UsdaClient::new(url, "key", Duration::from_secs(5)).unwrap();
        let err = food_details(&client, &[1]).await.unwrap_err();
        assert!(err.starts_with("Food lookup failed"));
    }

    #[test]
    fn test_list_density_categories() {
        let resp = list_density_categories(converter().densities());
        assert_eq!(resp.total, 1);
        assert_eq!(resp.categories[0].category, "Fats and Oils");
    }
}
