use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::str::FromStr;

use crate::recipe::RecipeId;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    Breakfast,
    Lunch,
    Dinner,
    Side,
    #[serde(other)]
    Other,
}

impl FromStr for EntryType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "breakfast" => EntryType::Breakfast,
            "lunch" => EntryType::Lunch,
            "dinner" => EntryType::Dinner,
            "side" => EntryType::Side,
            _ => EntryType::Other,
        })
    }
}

/// One row of an existing meal plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealEntry {
    pub date: NaiveDate,
    pub entry_type: EntryType,
    #[serde(default)]
    pub recipe_id: Option<RecipeId>,
}

impl MealEntry {
    pub fn dinner(date: NaiveDate, recipe_id: impl Into<RecipeId>) -> Self {
        MealEntry {
            date,
            entry_type: EntryType::Dinner,
            recipe_id: Some(recipe_id.into()),
        }
    }

    /// Dinner entries that point at a recipe are the ones that block repeats.
    pub fn blocks_repeat(&self) -> bool {
        self.entry_type == EntryType::Dinner && self.recipe_id.is_some()
    }
}

/// Read access to previously planned meals.
pub trait MealHistory {
    /// Entries dated within `start..=end`.
    fn list_entries(&self, start: NaiveDate, end: NaiveDate) -> anyhow::Result<Vec<MealEntry>>;
}

/// History held in memory, e.g. loaded from a CSV export.
#[derive(Debug, Clone, Default)]
pub struct InMemoryHistory {
    entries: Vec<MealEntry>,
}

impl InMemoryHistory {
    pub fn new(entries: Vec<MealEntry>) -> Self {
        InMemoryHistory { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl MealHistory for InMemoryHistory {
    fn list_entries(&self, start: NaiveDate, end: NaiveDate) -> anyhow::Result<Vec<MealEntry>> {
        Ok(self
            .entries
            .iter()
            .filter(|entry| entry.date >= start && entry.date <= end)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_list_entries_is_inclusive() {
        let history = InMemoryHistory::new(vec![
            MealEntry::dinner(date("2024-05-01"), "a"),
            MealEntry::dinner(date("2024-05-03"), "b"),
            MealEntry::dinner(date("2024-05-05"), "c"),
        ]);
        let entries = history
            .list_entries(date("2024-05-01"), date("2024-05-03"))
            .unwrap();
        let ids: Vec<&str> = entries
            .iter()
            .filter_map(|e| e.recipe_id.as_ref().map(|id| id.as_str()))
            .collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_only_dinners_with_recipes_block_repeats() {
        let day = date("2024-05-01");
        assert!(MealEntry::dinner(day, "a").blocks_repeat());
        let note = MealEntry { date: day, entry_type: EntryType::Dinner, recipe_id: None };
        assert!(!note.blocks_repeat());
        let lunch = MealEntry {
            date: day,
            entry_type: EntryType::Lunch,
            recipe_id: Some(RecipeId::new("a")),
        };
        assert!(!lunch.blocks_repeat());
    }

    #[test]
    fn test_entry_type_parsing() {
        assert_eq!("Dinner".parse::<EntryType>().unwrap(), EntryType::Dinner);
        assert_eq!("snack".parse::<EntryType>().unwrap(), EntryType::Other);
    }
}
