//! recipebook-cli: command-line front end for `recipebook-core`.
//!
//! Each invocation loads the saved book from the data directory, runs one
//! command, and saves the book again if the command changed it.

use clap::{Parser, Subcommand};
use recipebook_core::config::{self, IndexConfig, LinkThreshold};
use recipebook_core::{NewRecipe, Recipe, RecipeBook, RecipeBookError};
use serde::Serialize;
use std::error::Error;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Parser)]
#[command(name = "recipebook", about = "Recipe collection with ingredient similarity")]
pub struct Cli {
    /// Directory holding the saved recipe book
    #[arg(short, long, default_value = config::DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    /// Maximum number of recipes the book can hold
    #[arg(long, default_value_t = config::DEFAULT_CAPACITY)]
    pub capacity: usize,

    /// Also link recipes with zero ingredient overlap
    #[arg(long)]
    pub zero_links: bool,

    /// Emit logs on stderr as JSON lines
    #[arg(long)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add a recipe and show the recipes it was linked to
    Add {
        /// Recipe name
        name: String,
        /// Ingredient as "<quantity and units>::<name>" (repeatable)
        #[arg(short, long = "ingredient", required = true)]
        ingredients: Vec<String>,
        /// Instruction step (repeatable)
        #[arg(short, long = "step")]
        steps: Vec<String>,
        /// Where the recipe came from
        #[arg(long)]
        source: Option<String>,
    },
    /// Print one recipe
    Show {
        name: String,
        #[arg(long)]
        json: bool,
    },
    /// List recipe names in alphabetical order
    List,
    /// Show the recipes most similar to the named one
    Similar {
        name: String,
        #[arg(long)]
        json: bool,
    },
    /// Dump every recipe as JSON
    Export,
}

#[derive(Debug, Serialize)]
struct SimilarEntry<'a> {
    name: &'a str,
    score: f64,
}

impl Cli {
    pub fn index_config(&self) -> IndexConfig {
        IndexConfig {
            link_threshold: if self.zero_links {
                LinkThreshold::NonNegative
            } else {
                LinkThreshold::Positive
            },
            ..IndexConfig::with_capacity(self.capacity)
        }
    }

    pub fn book_path(&self) -> PathBuf {
        self.data_dir.join(config::BOOK_FILE_NAME)
    }
}

/// Loads the saved book, or starts an empty one if none exists yet.
pub fn open_book(path: &Path, config: IndexConfig) -> Result<RecipeBook, RecipeBookError> {
    if path.exists() {
        RecipeBook::load(path, config)
    } else {
        tracing::info!("No recipe book at {:?}, starting empty", path);
        RecipeBook::new(config)
    }
}

/// Runs one command, writing its output to `out`.
pub fn execute(cli: &Cli, out: &mut impl Write) -> Result<(), Box<dyn Error>> {
    let path = cli.book_path();
    let mut book = open_book(&path, cli.index_config())?;

    match &cli.command {
        Command::Add {
            name,
            ingredients,
            steps,
            source,
        } => {
            let draft = NewRecipe::parse(
                name.as_str(),
                ingredients.as_slice(),
                steps.clone(),
                source.clone(),
            )?;
            let recipe = book.add_recipe(draft)?;
            book.save(&path)?;
            writeln!(out, "Added '{}' (#{})", recipe.name(), recipe.ordinal())?;
            for (similar, score) in book.similar_recipes_with_scores(&recipe) {
                writeln!(out, "  {:.3}  {}", score, similar.name())?;
            }
        }
        Command::Show { name, json } => {
            let recipe = lookup(&book, name)?;
            if *json {
                writeln!(out, "{}", serde_json::to_string_pretty(recipe.as_ref())?)?;
            } else {
                print_recipe(out, &recipe)?;
            }
        }
        Command::List => {
            for name in book.all_names() {
                writeln!(out, "{name}")?;
            }
        }
        Command::Similar { name, json } => {
            let similar = book.similar_to(name)?;
            if *json {
                let entries: Vec<SimilarEntry<'_>> = similar
                    .iter()
                    .map(|(r, score)| SimilarEntry {
                        name: r.name(),
                        score: *score,
                    })
                    .collect();
                writeln!(out, "{}", serde_json::to_string_pretty(&entries)?)?;
            } else if similar.is_empty() {
                writeln!(out, "No similar recipes for '{name}'")?;
            } else {
                for (recipe, score) in &similar {
                    writeln!(out, "{:.3}  {}", score, recipe.name())?;
                }
            }
        }
        Command::Export => {
            let recipes: Vec<&Recipe> = book.all_recipes().map(Arc::as_ref).collect();
            writeln!(out, "{}", serde_json::to_string_pretty(&recipes)?)?;
        }
    }
    Ok(())
}

fn lookup(book: &RecipeBook, name: &str) -> Result<Arc<Recipe>, RecipeBookError> {
    book.get_recipe(name)
        .ok_or_else(|| RecipeBookError::NotFound(name.to_string()))
}

fn print_recipe(out: &mut impl Write, recipe: &Recipe) -> std::io::Result<()> {
    writeln!(out, "{}", recipe.name())?;
    if let Some(source) = recipe.source() {
        writeln!(out, "Source: {source}")?;
    }
    writeln!(out, "Ingredients:")?;
    for ingredient in recipe.ingredients() {
        writeln!(
            out,
            "  - {} {}",
            ingredient.quantity_and_units(),
            ingredient.name()
        )?;
    }
    if !recipe.instructions().is_empty() {
        writeln!(out, "Instructions:")?;
        for (i, step) in recipe.instructions().iter().enumerate() {
            writeln!(out, "  {}. {}", i + 1, step)?;
        }
    }
    Ok(())
}
