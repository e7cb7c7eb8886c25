//! The recipe book: name- and ordinal-keyed views over stored recipes plus
//! the similarity graph linking them.
//!
//! [`RecipeBook`] is a plain single-writer structure; every mutation takes
//! `&mut self`. [`SharedRecipeBook`] wraps one in a `RwLock` for callers that
//! need to share a book across threads.

use crate::config::IndexConfig;
use crate::error::{RecipeBookError, Result};
use crate::recipe::{NewRecipe, Ordinals, Recipe};
use crate::similarity::{ingredient_similarity, top_k_edges, SimilarityGraph, TopKAccumulator};
use crate::storage::persistence::{load_recipes, save_recipes};
use parking_lot::{RwLock, RwLockReadGuard};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

/// A collection of recipes with an incremental top-K similarity graph.
#[derive(Debug)]
pub struct RecipeBook {
    config: IndexConfig,
    ordinals: Ordinals,
    by_name: BTreeMap<String, Arc<Recipe>>,
    /// Indexed by ordinal. Holds every recipe ever added, including ones
    /// whose name was later taken over by a newer recipe.
    by_ordinal: Vec<Arc<Recipe>>,
    graph: SimilarityGraph,
}

impl Default for RecipeBook {
    fn default() -> Self {
        let config = IndexConfig::default();
        Self::empty(config)
    }
}

impl RecipeBook {
    /// Creates an empty book after validating `config`.
    pub fn new(config: IndexConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::empty(config))
    }

    /// Creates an empty book holding at most `capacity` recipes.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Self::new(IndexConfig::with_capacity(capacity))
    }

    fn empty(config: IndexConfig) -> Self {
        Self {
            config,
            ordinals: Ordinals::new(),
            by_name: BTreeMap::new(),
            by_ordinal: Vec::new(),
            graph: SimilarityGraph::new(config.capacity),
        }
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Number of recipes reachable by name.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Number of similarity links recorded so far.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn graph(&self) -> &SimilarityGraph {
        &self.graph
    }

    /// Adds a recipe, linking it to its K most similar predecessors.
    ///
    /// Fails with `Format` if an ingredient has an empty name and with
    /// `Capacity` if the book is full. On error nothing changes:
    /// no ordinal is consumed and no edge is added.
    pub fn add_recipe(&mut self, draft: NewRecipe) -> Result<Arc<Recipe>> {
        for ingredient in &draft.ingredients {
            ingredient.check()?;
        }
        let ordinal = self.ordinals.peek();
        self.graph.check_vertex(ordinal)?;

        let links = self.select_links(&draft);
        let ordinal = self.ordinals.next();
        for &(other, score) in &links {
            self.graph.add_edge(ordinal, other, score)?;
        }

        let recipe = Arc::new(Recipe::from_draft(ordinal, draft));
        if let Some(previous) = self
            .by_name
            .insert(recipe.name().to_string(), Arc::clone(&recipe))
        {
            tracing::warn!(
                "Recipe '{}' replaced (ordinal {} -> {})",
                recipe.name(),
                previous.ordinal(),
                ordinal
            );
        }
        self.by_ordinal.push(Arc::clone(&recipe));

        tracing::debug!(
            "Added recipe '{}' as ordinal {} with {} similarity link(s)",
            recipe.name(),
            ordinal,
            links.len()
        );
        Ok(recipe)
    }

    /// Parses raw `"quantity::name"` ingredient strings and adds the recipe.
    ///
    /// A malformed ingredient fails with `Format` before the book is touched.
    pub fn add_recipe_strings<S: AsRef<str>>(
        &mut self,
        name: &str,
        ingredient_strings: &[S],
        instructions: Vec<String>,
        source: Option<String>,
    ) -> Result<Arc<Recipe>> {
        let draft = NewRecipe::parse(name, ingredient_strings, instructions, source)?;
        self.add_recipe(draft)
    }

    /// Scores `draft` against every stored recipe in ordinal order and keeps the best K.
    fn select_links(&self, draft: &NewRecipe) -> Vec<(u32, f64)> {
        let mut accumulator =
            TopKAccumulator::new(self.config.max_similar, self.config.link_threshold);
        for existing in &self.by_ordinal {
            let score = ingredient_similarity(&draft.ingredients, existing.ingredients());
            accumulator.offer(existing.ordinal(), score);
        }
        accumulator.finish()
    }

    /// Looks a recipe up by name.
    pub fn get_recipe(&self, name: &str) -> Option<Arc<Recipe>> {
        self.by_name.get(name).cloned()
    }

    /// Looks a recipe up by ordinal.
    pub fn get_by_ordinal(&self, ordinal: u32) -> Option<Arc<Recipe>> {
        self.by_ordinal.get(ordinal as usize).cloned()
    }

    /// Recipe names in lexicographic order.
    pub fn all_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.by_name.keys().map(String::as_str)
    }

    /// Recipes ordered by name.
    pub fn all_recipes(&self) -> impl Iterator<Item = &Arc<Recipe>> + '_ {
        self.by_name.values()
    }

    /// True if `recipe` is the record this book stores under its ordinal.
    fn owns(&self, recipe: &Recipe) -> bool {
        self.by_ordinal
            .get(recipe.ordinal() as usize)
            .is_some_and(|stored| stored.as_ref() == recipe)
    }

    /// Up to K most similar recipes with their scores, most similar first.
    ///
    /// Returns an empty list for a recipe that is not stored in this book.
    pub fn similar_recipes_with_scores(&self, recipe: &Recipe) -> Vec<(Arc<Recipe>, f64)> {
        if !self.owns(recipe) {
            return Vec::new();
        }
        top_k_edges(
            &self.graph,
            recipe.ordinal(),
            self.config.max_similar,
            self.config.link_threshold,
        )
        .into_iter()
        .filter_map(|(other, score)| {
            self.by_ordinal
                .get(other as usize)
                .map(|r| (Arc::clone(r), score))
        })
        .collect()
    }

    /// Up to K most similar recipes, most similar first.
    pub fn similar_recipes(&self, recipe: &Recipe) -> Vec<Arc<Recipe>> {
        self.similar_recipes_with_scores(recipe)
            .into_iter()
            .map(|(r, _)| r)
            .collect()
    }

    /// Scores matching [`similar_recipes`](RecipeBook::similar_recipes), in the same order.
    pub fn similar_recipe_scores(&self, recipe: &Recipe) -> Vec<f64> {
        self.similar_recipes_with_scores(recipe)
            .into_iter()
            .map(|(_, s)| s)
            .collect()
    }

    /// Similar recipes for the recipe stored under `name`.
    pub fn similar_to(&self, name: &str) -> Result<Vec<(Arc<Recipe>, f64)>> {
        let recipe = self
            .get_recipe(name)
            .ok_or_else(|| RecipeBookError::NotFound(name.to_string()))?;
        Ok(self.similar_recipes_with_scores(&recipe))
    }

    /// Writes every recipe (in name order) to `path`. Returns the number written.
    pub fn save(&self, path: &Path) -> Result<usize> {
        save_recipes(path, self.all_recipes().map(Arc::as_ref))
    }

    /// Builds a new book from a saved file, re-inserting each recipe in file
    /// order. Ordinals and similarity links are recomputed.
    pub fn load(path: &Path, config: IndexConfig) -> Result<Self> {
        let (recipes, stats) = load_recipes(path)?;
        let mut book = Self::new(config)?;
        for recipe in &recipes {
            book.add_recipe(recipe.to_draft())?;
        }
        tracing::info!(
            "Loaded {} recipe(s) from {:?} ({} skipped, truncated={})",
            book.len(),
            path,
            stats.skipped,
            stats.truncated
        );
        Ok(book)
    }
}

/// Thread-safe handle to a [`RecipeBook`].
///
/// Writers are serialized by the lock; cloning yields another handle to the
/// same book.
#[derive(Debug, Clone, Default)]
pub struct SharedRecipeBook {
    inner: Arc<RwLock<RecipeBook>>,
}

impl SharedRecipeBook {
    pub fn new(book: RecipeBook) -> Self {
        Self {
            inner: Arc::new(RwLock::new(book)),
        }
    }

    pub fn add_recipe(&self, draft: NewRecipe) -> Result<Arc<Recipe>> {
        self.inner.write().add_recipe(draft)
    }

    pub fn get_recipe(&self, name: &str) -> Option<Arc<Recipe>> {
        self.inner.read().get_recipe(name)
    }

    /// Snapshot of all names in lexicographic order.
    pub fn all_names(&self) -> Vec<String> {
        self.inner.read().all_names().map(str::to_string).collect()
    }

    pub fn similar_recipes_with_scores(&self, recipe: &Recipe) -> Vec<(Arc<Recipe>, f64)> {
        self.inner.read().similar_recipes_with_scores(recipe)
    }

    pub fn save(&self, path: &Path) -> Result<usize> {
        self.inner.read().save(path)
    }

    /// Read access for anything not covered by the forwarding methods.
    pub fn read(&self) -> RwLockReadGuard<'_, RecipeBook> {
        self.inner.read()
    }
}
