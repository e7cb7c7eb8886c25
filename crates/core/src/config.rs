//! Configuration for the recipe book and its similarity index.
//!
//! Tuning values and limits are compile-time constants defined here.
//! [`IndexConfig`] bundles the values a caller may choose per book; the CLI
//! builds one from its arguments.

use crate::error::{RecipeBookError, Result};

/// Number of similar recipes linked at insertion time and returned per query (K).
pub const MAX_SIMILAR_RECIPES: usize = 5;

/// Default number of graph vertices, i.e. the most recipes a book can hold.
pub const DEFAULT_CAPACITY: usize = 100;

/// Separator between quantity/units and the ingredient name in raw ingredient strings.
///
/// `"2 cups::flour"` parses to quantity `"2 cups"` and name `"flour"`.
pub const INGREDIENT_SEPARATOR: &str = "::";

/// Score returned when one side of a comparison is missing. Never a valid similarity.
pub const NO_COMPARISON: f64 = -1.0;

/// Recipes whose larger ingredient list has at most this many entries use the small tier.
pub const SMALL_RECIPE_MAX_INGREDIENTS: usize = 4;

/// Overlap multiplier for the small tier.
pub const SMALL_RECIPE_MULTIPLIER: f64 = 1.5;

/// Upper bound (inclusive) of the medium tier.
pub const MEDIUM_RECIPE_MAX_INGREDIENTS: usize = 6;

/// Overlap multiplier for the medium tier.
pub const MEDIUM_RECIPE_MULTIPLIER: f64 = 1.25;

/// Ceiling applied to boosted partial overlaps, keeping `1.0` for complete matches.
pub const PARTIAL_OVERLAP_CAP: f64 = 0.95;

/// Default directory holding the saved recipe book.
pub const DEFAULT_DATA_DIR: &str = "./data";

/// File name of the saved recipe book inside the data directory.
pub const BOOK_FILE_NAME: &str = "recipes.rbk";

/// Which scores are good enough to become a similarity link.
///
/// Two variants of the insertion logic exist in the wild: one only links
/// neighbours with a strictly positive score, the other also links
/// zero-similarity neighbours. The threshold is applied both when the
/// accumulator admits candidates and when a query picks incident edges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LinkThreshold {
    /// Score must be `> 0`.
    #[default]
    Positive,
    /// Score must be `>= 0`.
    NonNegative,
}

impl LinkThreshold {
    /// Returns `true` if `score` may become (or be returned as) a similarity link.
    #[inline]
    pub fn admits(self, score: f64) -> bool {
        match self {
            LinkThreshold::Positive => score > 0.0,
            LinkThreshold::NonNegative => score >= 0.0,
        }
    }
}

/// Per-book configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexConfig {
    /// Fixed number of graph vertices. Ordinals run from `0` to `capacity - 1`.
    pub capacity: usize,
    /// K: outgoing links per insertion and results per query.
    pub max_similar: usize,
    /// Which scores qualify as links.
    pub link_threshold: LinkThreshold,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            max_similar: MAX_SIMILAR_RECIPES,
            link_threshold: LinkThreshold::Positive,
        }
    }
}

impl IndexConfig {
    /// Default configuration with a different vertex capacity.
    ///
    /// K is lowered to `capacity` when the book is smaller than the default K.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            max_similar: MAX_SIMILAR_RECIPES.min(capacity),
            ..Self::default()
        }
    }

    /// Checks that the configuration can back a usable book.
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(RecipeBookError::InvalidConfig(
                "capacity must be greater than 0".into(),
            ));
        }
        if self.capacity > u32::MAX as usize {
            return Err(RecipeBookError::InvalidConfig(format!(
                "capacity {} exceeds the ordinal range",
                self.capacity
            )));
        }
        if self.max_similar == 0 {
            return Err(RecipeBookError::InvalidConfig(
                "max_similar must be greater than 0".into(),
            ));
        }
        if self.max_similar > self.capacity {
            return Err(RecipeBookError::InvalidConfig(format!(
                "max_similar {} exceeds capacity {}",
                self.max_similar, self.capacity
            )));
        }
        Ok(())
    }
}
