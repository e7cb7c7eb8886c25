//! Storage layer: the recipe book and its on-disk record stream.
//!
//! Recipes live in memory in a [`RecipeBook`]. Durability is a plain
//! save/load of every record; loading re-inserts each recipe so ordinals and
//! similarity links are rebuilt from scratch.

/// Name- and ordinal-keyed recipe views plus the similarity graph.
pub mod book;
/// Sequential framed record store with CRC32 checks.
pub mod persistence;

pub use book::{RecipeBook, SharedRecipeBook};
pub use persistence::{load_recipes, save_recipes, LoadStats};
