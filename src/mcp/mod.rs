//! MCP server
//!
//! Exposes the estimator tools over the Model Context Protocol.

mod server;

pub use server::NutritionService;
