//! Insertion and query throughput of the similarity index.
//!
//! Fills books of increasing size with synthetic recipes drawn from a small
//! ingredient vocabulary, then times `similar_recipes` over every recipe.
//!
//! Usage: cargo bench --bench insert_throughput

use recipebook_core::{Ingredient, IndexConfig, NewRecipe, RecipeBook};
use std::time::Instant;

const VOCABULARY: usize = 40;
const SIZES: [usize; 4] = [100, 1_000, 5_000, 10_000];

/// Deterministic pseudo-random ingredient list for recipe `seed`.
fn synthetic_recipe(seed: usize) -> NewRecipe {
    let count = 3 + (seed * 7) % 8;
    let ingredients = (0..count)
        .map(|j| {
            let id = (seed + 1).wrapping_mul(2654435761).wrapping_add(j * 40503) % VOCABULARY;
            Ingredient::new(format!("{} g", j + 1), format!("ingredient {id}"))
        })
        .collect();
    NewRecipe::new(format!("recipe {seed:06}"), ingredients, vec!["cook".into()], None)
}

fn main() {
    println!("{:>8} {:>14} {:>14} {:>10}", "recipes", "insert/s", "query/s", "edges");
    for &size in &SIZES {
        let mut book = match RecipeBook::new(IndexConfig::with_capacity(size)) {
            Ok(book) => book,
            Err(e) => {
                eprintln!("cannot build book of size {size}: {e}");
                continue;
            }
        };

        let start = Instant::now();
        for seed in 0..size {
            if let Err(e) = book.add_recipe(synthetic_recipe(seed)) {
                eprintln!("insert {seed} failed: {e}");
                return;
            }
        }
        let insert_secs = start.elapsed().as_secs_f64();

        let start = Instant::now();
        let mut returned = 0usize;
        for recipe in book.all_recipes() {
            returned += book.similar_recipes(recipe).len();
        }
        let query_secs = start.elapsed().as_secs_f64();

        println!(
            "{:>8} {:>14.0} {:>14.0} {:>10}",
            size,
            size as f64 / insert_secs,
            size as f64 / query_secs,
            book.edge_count()
        );
        std::hint::black_box(returned);
    }
}
