use anyhow::{Context, Result};
use chrono::NaiveDate;
use csv::ReaderBuilder;
use std::collections::HashSet;
use std::io::Read;
use tracing::warn;

use crate::history::{EntryType, MealEntry};
use crate::recipe::{Recipe, RecipeId};

// Expected history column headers
const DATE_COL: &str = "date";
const ENTRY_TYPE_COL: &str = "entry_type";
const RECIPE_ID_COL: &str = "recipe_id";

/// Parses the recipe export: a JSON array of `{id, name, roles, category?}` objects.
///
/// Later duplicates of an id are dropped with a warning.
pub fn parse_recipes_json(content: &str) -> Result<Vec<Recipe>> {
    let recipes: Vec<Recipe> =
        serde_json::from_str(content).context("Recipe file is not a valid JSON recipe list")?;

    let mut seen: HashSet<RecipeId> = HashSet::new();
    let mut unique = Vec::with_capacity(recipes.len());
    for recipe in recipes {
        if seen.insert(recipe.id.clone()) {
            unique.push(recipe);
        } else {
            warn!("Skipping duplicate recipe id '{}' ({})", recipe.id, recipe.name);
        }
    }
    Ok(unique)
}

/// Reads meal-plan history rows from CSV with a `date,entry_type,recipe_id` header.
/// Blank `recipe_id` cells become entries without a recipe; rows with no date are skipped.
pub fn read_history_csv<R: Read>(reader: R) -> Result<Vec<MealEntry>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .ok_or_else(|| anyhow::anyhow!("Column '{}' not found", name))
    };
    let date_idx = column(DATE_COL)?;
    let entry_type_idx = column(ENTRY_TYPE_COL)?;
    let recipe_id_idx = column(RECIPE_ID_COL)?;

    let mut entries = Vec::new();
    for (row_index, result) in rdr.records().enumerate() {
        let record =
            result.with_context(|| format!("Failed to read history record at row index {}", row_index))?;

        let raw_date = record.get(date_idx).unwrap_or("");
        if raw_date.is_empty() {
            continue;
        }
        let date = NaiveDate::parse_from_str(raw_date, "%Y-%m-%d")
            .with_context(|| format!("Invalid date '{}' at row {}", raw_date, row_index))?;
        let entry_type = record
            .get(entry_type_idx)
            .unwrap_or("")
            .parse::<EntryType>()
            .unwrap_or(EntryType::Other);
        let recipe_id = record
            .get(recipe_id_idx)
            .filter(|id| !id.is_empty())
            .map(RecipeId::from);

        entries.push(MealEntry {
            date,
            entry_type,
            recipe_id,
        });
    }

    Ok(entries)
}
