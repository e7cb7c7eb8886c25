use proptest::prelude::*;
use recipebook_core::config::MAX_SIMILAR_RECIPES;
use recipebook_core::similarity::ingredient_similarity;
use recipebook_core::{
    Ingredient, IndexConfig, LinkThreshold, NewRecipe, RecipeBook, RecipeBookError,
};
use tempfile::TempDir;

fn draft(name: &str, ingredient_names: &[&str]) -> NewRecipe {
    let ingredients = ingredient_names
        .iter()
        .map(|n| Ingredient::new("1 unit", *n))
        .collect();
    NewRecipe::new(name, ingredients, vec![format!("cook {name}")], None)
}

fn numbered_draft(name: &str, ids: &[u8]) -> NewRecipe {
    let ingredients = ids
        .iter()
        .map(|i| Ingredient::new(format!("{i} g"), format!("ingredient {i}")))
        .collect();
    NewRecipe::new(name, ingredients, vec![format!("step for {name}")], None)
}

fn non_negative() -> IndexConfig {
    IndexConfig {
        link_threshold: LinkThreshold::NonNegative,
        ..IndexConfig::default()
    }
}

// ── Scenarios ──────────────────────────────────────────────────────────

#[test]
fn three_identical_recipes_are_fully_similar() {
    let mut book = RecipeBook::default();
    for name in ["a", "b", "c"] {
        book.add_recipe(draft(name, &["flour", "egg", "milk"])).unwrap();
    }
    let a = book.get_recipe("a").unwrap();
    let similar = book.similar_recipes_with_scores(&a);
    let names: Vec<&str> = similar.iter().map(|(r, _)| r.name()).collect();
    assert_eq!(names, vec!["b", "c"]);
    assert!(similar.iter().all(|&(_, score)| score == 1.0));
}

#[test]
fn disjoint_three_and_six_score_zero() {
    let small = draft("small", &["a", "b", "c"]);
    let large = draft("large", &["d", "e", "f", "g", "h", "i"]);
    assert_eq!(
        ingredient_similarity(&large.ingredients, &small.ingredients),
        0.0
    );
}

#[test]
fn three_of_five_scores_medium_tier() {
    let small = draft("small", &["a", "b", "c"]);
    let medium = draft("medium", &["a", "b", "c", "d", "e"]);
    assert_eq!(
        ingredient_similarity(&medium.ingredients, &small.ingredients),
        0.75
    );

    let mut book = RecipeBook::default();
    book.add_recipe(small).unwrap();
    let medium = book.add_recipe(medium).unwrap();
    assert_eq!(book.similar_recipe_scores(&medium), vec![0.75]);
}

#[test]
fn scoring_follows_formula_not_symmetry() {
    let a = draft("a", &["salt", "salt", "oil"]);
    let b = draft("b", &["salt", "pepper", "oil"]);
    // walking b against a's names: salt, oil -> 2 of 3 -> min(0.95, 1.0)
    assert_eq!(ingredient_similarity(&a.ingredients, &b.ingredients), 0.95);
    // walking a against b's names: salt, salt, oil -> 3 == largest
    assert_eq!(ingredient_similarity(&b.ingredients, &a.ingredients), 1.0);
}

// ── Threshold variants ─────────────────────────────────────────────────

#[test]
fn positive_threshold_never_links_zero_similarity() {
    let mut book = RecipeBook::default();
    book.add_recipe(draft("x", &["a", "b", "c"])).unwrap();
    let y = book
        .add_recipe(draft("y", &["d", "e", "f", "g", "h", "i"]))
        .unwrap();
    assert_eq!(book.edge_count(), 0);
    assert!(book.similar_recipes(&y).is_empty());
}

#[test]
fn non_negative_threshold_links_zero_similarity() {
    let mut book = RecipeBook::new(non_negative()).unwrap();
    let x = book.add_recipe(draft("x", &["a", "b", "c"])).unwrap();
    book.add_recipe(draft("y", &["d", "e", "f", "g", "h", "i"]))
        .unwrap();
    assert_eq!(book.edge_count(), 1);
    let similar = book.similar_recipes_with_scores(&x);
    assert_eq!(similar.len(), 1);
    assert_eq!(similar[0].0.name(), "y");
    assert_eq!(similar[0].1, 0.0);
}

// ── Persistence ────────────────────────────────────────────────────────

#[test]
fn save_then_load_round_trips_content() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("recipes.rbk");

    let mut book = RecipeBook::default();
    book.add_recipe(draft("pancakes", &["flour", "egg", "milk"]))
        .unwrap();
    book.add_recipe(draft("crepes", &["flour", "egg", "milk", "butter"]))
        .unwrap();
    book.add_recipe(NewRecipe::new(
        "omelette",
        vec![Ingredient::new("3", "egg"), Ingredient::new("1 tbsp", "butter")],
        vec!["whisk".into(), "fry".into()],
        Some("family".into()),
    ))
    .unwrap();

    assert_eq!(book.save(&path).unwrap(), 3);
    let loaded = RecipeBook::load(&path, IndexConfig::default()).unwrap();

    assert_eq!(
        loaded.all_names().collect::<Vec<_>>(),
        book.all_names().collect::<Vec<_>>()
    );
    for original in book.all_recipes() {
        let copy = loaded.get_recipe(original.name()).unwrap();
        assert_eq!(copy.ingredients(), original.ingredients());
        assert_eq!(copy.instructions(), original.instructions());
        assert_eq!(copy.source(), original.source());
    }
    // reloaded in name order, so ordinals are reassigned
    assert_eq!(loaded.get_recipe("crepes").unwrap().ordinal(), 0);
    assert_eq!(loaded.edge_count(), book.edge_count());
}

#[test]
fn failed_load_leaves_existing_book_usable() {
    let dir = TempDir::new().unwrap();
    let mut book = RecipeBook::default();
    book.add_recipe(draft("a", &["x"])).unwrap();

    let err = RecipeBook::load(&dir.path().join("missing.rbk"), IndexConfig::default())
        .unwrap_err();
    assert!(matches!(err, RecipeBookError::Io(_)));

    book.add_recipe(draft("b", &["x"])).unwrap();
    assert_eq!(book.len(), 2);
}

#[test]
fn failed_save_leaves_book_usable() {
    let dir = TempDir::new().unwrap();
    let mut book = RecipeBook::default();
    book.add_recipe(draft("a", &["x"])).unwrap();

    // target is an existing directory, so the final rename fails
    let target = dir.path().join("occupied");
    std::fs::create_dir_all(target.join("inner")).unwrap();
    assert!(book.save(&target).is_err());
    assert!(!dir.path().join("occupied.tmp").exists());

    book.add_recipe(draft("b", &["x"])).unwrap();
    assert_eq!(book.similar_recipe_scores(&book.get_recipe("a").unwrap()), vec![1.0]);
}

#[test]
fn load_beyond_capacity_is_capacity_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("recipes.rbk");
    let mut book = RecipeBook::default();
    for name in ["a", "b", "c"] {
        book.add_recipe(draft(name, &["x"])).unwrap();
    }
    book.save(&path).unwrap();

    let err = RecipeBook::load(&path, IndexConfig::with_capacity(2)).unwrap_err();
    assert!(matches!(err, RecipeBookError::Capacity { .. }));
}

// ── Properties ─────────────────────────────────────────────────────────

fn recipe_sets() -> impl Strategy<Value = Vec<Vec<u8>>> {
    prop::collection::vec(prop::collection::vec(0u8..12, 1..9), 1..25)
}

proptest! {
    #[test]
    fn self_similarity_is_one(ids in prop::collection::vec(0u8..40, 1..20)) {
        let recipe = numbered_draft("r", &ids);
        prop_assert_eq!(ingredient_similarity(&recipe.ingredients, &recipe.ingredients), 1.0);
    }

    #[test]
    fn scores_stay_in_unit_interval(a in prop::collection::vec(0u8..10, 1..12),
                                    b in prop::collection::vec(0u8..10, 1..12)) {
        let a = numbered_draft("a", &a);
        let b = numbered_draft("b", &b);
        let score = ingredient_similarity(&a.ingredients, &b.ingredients);
        prop_assert!((0.0..=1.0).contains(&score));
    }

    #[test]
    fn insertion_adds_min_k_n_edges(sets in recipe_sets()) {
        let mut book = RecipeBook::new(non_negative()).unwrap();
        for (n, ids) in sets.iter().enumerate() {
            let before = book.edge_count();
            book.add_recipe(numbered_draft(&format!("recipe {n}"), ids)).unwrap();
            prop_assert_eq!(book.edge_count() - before, n.min(MAX_SIMILAR_RECIPES));
        }
    }

    #[test]
    fn positive_links_are_bounded_and_positive(sets in recipe_sets()) {
        let mut book = RecipeBook::default();
        for (n, ids) in sets.iter().enumerate() {
            let before = book.edge_count();
            book.add_recipe(numbered_draft(&format!("recipe {n}"), ids)).unwrap();
            prop_assert!(book.edge_count() - before <= n.min(MAX_SIMILAR_RECIPES));
        }
        prop_assert!(book.graph().edges().iter().all(|e| e.weight > 0.0));
    }

    #[test]
    fn queries_are_bounded_and_descending(sets in recipe_sets()) {
        let mut book = RecipeBook::default();
        for (n, ids) in sets.iter().enumerate() {
            book.add_recipe(numbered_draft(&format!("recipe {n}"), ids)).unwrap();
        }
        for recipe in book.all_recipes() {
            let with_scores = book.similar_recipes_with_scores(recipe);
            prop_assert!(with_scores.len() <= MAX_SIMILAR_RECIPES);
            prop_assert!(with_scores.windows(2).all(|w| w[0].1 >= w[1].1));

            let names: Vec<String> = book
                .similar_recipes(recipe)
                .iter()
                .map(|r| r.name().to_string())
                .collect();
            let expected: Vec<String> = with_scores
                .iter()
                .map(|(r, _)| r.name().to_string())
                .collect();
            prop_assert_eq!(names, expected);
            let scores: Vec<f64> = with_scores.iter().map(|&(_, s)| s).collect();
            prop_assert_eq!(book.similar_recipe_scores(recipe), scores);
        }
    }
}
