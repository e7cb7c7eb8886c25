//! # recipebook-core
//!
//! Personal recipe collection with an incremental ingredient-similarity
//! index. Every insertion scores the new recipe against all stored recipes
//! and links it to its K most similar predecessors; queries return the K
//! heaviest links of a recipe, most similar first.
//!
//! ```text
//! add_recipe → score vs. every stored recipe → top-K accumulator → graph edges
//! similar_recipes → incident edges → top-K extractor → records by ordinal
//! ```
//!
//! The crate is synchronous and has no async dependencies.

/// Tuning constants and per-book configuration.
pub mod config;
/// Error type for every recipe book operation.
pub mod error;
/// Recipe records, ingredients, and the per-book ordinal generator.
pub mod recipe;
/// Similarity scoring, bounded top-K selection, and the similarity graph.
pub mod similarity;
/// Recipe book and persistence.
pub mod storage;

pub use config::{IndexConfig, LinkThreshold};
pub use error::{RecipeBookError, Result};
pub use recipe::{Ingredient, NewRecipe, Recipe};
pub use storage::{RecipeBook, SharedRecipeBook};
