//! Recipe Nutrition Estimator Library
//!
//! Approximate per-ingredient nutrition for recipes: unit-to-gram conversion,
//! category density lookup, FoodData Central matching, and bounded-parallel
//! aggregation across a recipe.

pub mod build_info;
pub mod config;
pub mod estimate;
pub mod mcp;
pub mod models;
pub mod nutrition;
pub mod parser;
pub mod tools;
pub mod usda;
