//! FoodData Central wire types
//!
//! Only the fields the estimator reads. Search results use
//! `nutrientNumber`/`value`; abridged food details use `number`/`amount`.

use serde::Deserialize;

use crate::models::{FoodCandidate, RawNutrient};

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub foods: Vec<FdcFood>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FdcFood {
    #[serde(default)]
    pub fdc_id: Option<u64>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub food_category: Option<String>,
    #[serde(default)]
    pub food_nutrients: Vec<FdcNutrient>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FdcNutrient {
    #[serde(default, alias = "number")]
    pub nutrient_number: Option<String>,
    #[serde(default, alias = "amount")]
    pub value: Option<f64>,
}

impl From<FdcFood> for FoodCandidate {
    fn from(food: FdcFood) -> Self {
        let nutrients = food
            .food_nutrients
            .into_iter()
            .filter_map(|n| match (n.nutrient_number, n.value) {
                (Some(code), Some(value)) => Some(RawNutrient::new(code, value)),
                _ => None,
            })
            .collect();

        FoodCandidate {
            fdc_id: food.fdc_id,
            description: food.description,
            category: food.food_category.filter(|c| !c.trim().is_empty()),
            nutrients,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_search_response() {
        let body = r#"{
            "totalHits": 2,
            "foods": [
                {
                    "fdcId": 169761,
                    "description": "Wheat flour, white, all-purpose, enriched, bleached",
                    "foodCategory": "Cereal Grains and Pasta",
                    "foodNutrients": [
                        {"nutrientId": 1003, "nutrientNumber": "203", "value": 10.3},
                        {"nutrientId": 1004, "nutrientNumber": "204", "value": 0.98},
                        {"nutrientId": 1008, "nutrientNumber": "208"}
                    ]
                },
                {"description": "Flour, coconut"}
            ]
        }"#;
        let response: SearchResponse = serde_json::from_str(body).unwrap();
        let candidates: Vec<FoodCandidate> =
            response.foods.into_iter().map(FoodCandidate::from).collect();

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].fdc_id, Some(169761));
        assert_eq!(candidates[0].category.as_deref(), Some("Cereal Grains and Pasta"));
        assert_eq!(candidates[0].nutrients, vec![
            RawNutrient::new("203", 10.3),
            RawNutrient::new("204", 0.98),
        ]);
        assert_eq!(candidates[1].category, None);
        assert!(candidates[1].nutrients.is_empty());
    }

    #[test]
    fn test_missing_foods_is_empty() {
        let response: SearchResponse = serde_json::from_str(r#"{"totalHits": 0}"#).unwrap();
        assert!(response.foods.is_empty());
    }

    #[test]
    fn test_decode_abridged_detail() {
        let body = r#"[{"fdcId": 1, "description": "Salt, table",
            "foodNutrients": [{"number": "307", "amount": 38758.0}]}]"#;
        let foods: Vec<FdcFood> = serde_json::from_str(body).unwrap();
        let candidate = FoodCandidate::from(foods.into_iter().next().unwrap());
        assert_eq!(candidate.nutrients, vec![RawNutrient::new("307", 38758.0)]);
    }
}
