//! Incremental ingredient-similarity index.
//!
//! On every insertion the new recipe is scored against each stored recipe,
//! a bounded accumulator keeps the K best, and those become weighted edges
//! in the similarity graph. Queries re-bound a recipe's incident edges to
//! the K heaviest.

/// Bounded top-K selection for one insertion.
pub mod accumulator;
/// Query-time top-K over incident edges.
pub mod extract;
/// Weighted undirected graph over recipe ordinals.
pub mod graph;
/// Ingredient-overlap scoring.
pub mod scorer;

pub use accumulator::TopKAccumulator;
pub use extract::top_k_edges;
pub use graph::{Edge, SimilarityGraph};
pub use scorer::{ingredient_similarity, recipe_similarity};
