//! Ingredient-overlap similarity between two recipes.
//!
//! The score counts how many ingredient names of `b` also appear in `a`,
//! divides by the longer list's length, then boosts small and medium
//! recipes so that near-complete overlaps of short lists still rank high:
//!
//! | larger list | score                              |
//! |-------------|------------------------------------|
//! | full match  | `1.0`                              |
//! | `<= 4`      | `min(0.95, 1.5 * shared/largest)`  |
//! | `<= 6`      | `min(0.95, 1.25 * shared/largest)` |
//! | otherwise   | `shared/largest`                   |
//!
//! Counting walks `b` against the name set of `a`, so duplicate names in `b`
//! are counted once each and the function is not symmetric in general.

use crate::config::{
    MEDIUM_RECIPE_MAX_INGREDIENTS, MEDIUM_RECIPE_MULTIPLIER, NO_COMPARISON, PARTIAL_OVERLAP_CAP,
    SMALL_RECIPE_MAX_INGREDIENTS, SMALL_RECIPE_MULTIPLIER,
};
use crate::recipe::{Ingredient, Recipe};
use std::collections::HashSet;

/// Similarity of two ingredient lists in `[0, 1]`.
pub fn ingredient_similarity(a: &[Ingredient], b: &[Ingredient]) -> f64 {
    let names: HashSet<&str> = a.iter().map(Ingredient::name).collect();
    let shared = b.iter().filter(|i| names.contains(i.name())).count();
    let largest = a.len().max(b.len());

    if shared == largest {
        return 1.0;
    }

    let average = shared as f64 / largest as f64;
    if largest <= SMALL_RECIPE_MAX_INGREDIENTS {
        PARTIAL_OVERLAP_CAP.min(SMALL_RECIPE_MULTIPLIER * average)
    } else if largest <= MEDIUM_RECIPE_MAX_INGREDIENTS {
        PARTIAL_OVERLAP_CAP.min(MEDIUM_RECIPE_MULTIPLIER * average)
    } else {
        average
    }
}

/// Similarity of two recipes, or [`NO_COMPARISON`] if either is missing.
pub fn recipe_similarity(a: Option<&Recipe>, b: Option<&Recipe>) -> f64 {
    match (a, b) {
        (Some(a), Some(b)) => ingredient_similarity(a.ingredients(), b.ingredients()),
        _ => NO_COMPARISON,
    }
}
