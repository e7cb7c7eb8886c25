//! Recipe records.
//!
//! A [`NewRecipe`] is what callers hand to the book. Once stored it becomes a
//! [`Recipe`] carrying the ordinal the book assigned; stored recipes are
//! immutable and only expose read-only views of their fields.

use crate::config::INGREDIENT_SEPARATOR;
use crate::error::{RecipeBookError, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// One ingredient line: free-form quantity/units plus the name used for matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    quantity_and_units: String,
    name: String,
}

impl Ingredient {
    /// Builds an ingredient without checking it. A book refuses recipes whose
    /// ingredients have an empty name when they are added.
    pub fn new(quantity_and_units: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            quantity_and_units: quantity_and_units.into(),
            name: name.into(),
        }
    }

    /// Parses `"<quantityAndUnits>::<name>"`.
    ///
    /// The string must split into exactly two parts on `::` and the name part
    /// must not be empty. The quantity part may be empty.
    pub fn parse(raw: &str) -> Result<Self> {
        let parts: Vec<&str> = raw.split(INGREDIENT_SEPARATOR).collect();
        match parts.as_slice() {
            [quantity, name] if !name.is_empty() => Ok(Self::new(*quantity, *name)),
            [_, _] => Err(RecipeBookError::Format {
                input: raw.to_string(),
                parts: 1,
            }),
            _ => Err(RecipeBookError::Format {
                input: raw.to_string(),
                parts: parts.len(),
            }),
        }
    }

    /// `Format` error if the name is empty, matching what [`parse`](Ingredient::parse) rejects.
    pub(crate) fn check(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(RecipeBookError::Format {
                input: format!("{}{}", self.quantity_and_units, INGREDIENT_SEPARATOR),
                parts: 1,
            });
        }
        Ok(())
    }

    pub fn quantity_and_units(&self) -> &str {
        &self.quantity_and_units
    }

    /// Name compared by the similarity scorer (exact string match).
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.quantity_and_units, self.name)
    }
}

impl PartialOrd for Ingredient {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ingredient {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name
            .cmp(&other.name)
            .then_with(|| self.quantity_and_units.cmp(&other.quantity_and_units))
    }
}

/// A recipe that has not been added to a book yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRecipe {
    pub name: String,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<String>,
    pub source: Option<String>,
}

impl NewRecipe {
    pub fn new(
        name: impl Into<String>,
        ingredients: Vec<Ingredient>,
        instructions: Vec<String>,
        source: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            ingredients,
            instructions,
            source,
        }
    }

    /// Builds a draft from raw `"quantity::name"` ingredient strings.
    ///
    /// Fails on the first malformed ingredient.
    pub fn parse<S: AsRef<str>>(
        name: impl Into<String>,
        ingredient_strings: &[S],
        instructions: Vec<String>,
        source: Option<String>,
    ) -> Result<Self> {
        let ingredients = ingredient_strings
            .iter()
            .map(|s| Ingredient::parse(s.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(name, ingredients, instructions, source))
    }
}

/// A stored recipe. Created by the book, never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    ordinal: u32,
    name: String,
    ingredients: Vec<Ingredient>,
    instructions: Vec<String>,
    source: Option<String>,
}

impl Recipe {
    pub(crate) fn from_draft(ordinal: u32, draft: NewRecipe) -> Self {
        Self {
            ordinal,
            name: draft.name,
            ingredients: draft.ingredients,
            instructions: draft.instructions,
            source: draft.source,
        }
    }

    /// Graph vertex id assigned at insertion.
    pub fn ordinal(&self) -> u32 {
        self.ordinal
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    pub fn instructions(&self) -> &[String] {
        &self.instructions
    }

    /// Where the recipe came from (e.g. a website), if recorded.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Copies the recipe content without its ordinal, ready for re-insertion.
    pub fn to_draft(&self) -> NewRecipe {
        NewRecipe {
            name: self.name.clone(),
            ingredients: self.ingredients.clone(),
            instructions: self.instructions.clone(),
            source: self.source.clone(),
        }
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Recipe [name={}, ingredients=[", self.name)?;
        for (i, ingredient) in self.ingredients.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{ingredient}")?;
        }
        write!(f, "], instructions={:?}", self.instructions)?;
        match &self.source {
            Some(source) => write!(f, ", source={source}]"),
            None => f.write_str("]"),
        }
    }
}

/// Hands out ordinals for one book. Each book owns its own generator, so
/// independent books never share or skip ordinals.
#[derive(Debug, Default)]
pub struct Ordinals {
    next: u32,
}

impl Ordinals {
    pub fn new() -> Self {
        Self::default()
    }

    /// The ordinal the next call to [`next`](Ordinals::next) will return.
    pub fn peek(&self) -> u32 {
        self.next
    }

    pub fn next(&mut self) -> u32 {
        let ordinal = self.next;
        self.next += 1;
        ordinal
    }
}
