use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::{ConfigError, PlanConfig};
use crate::history::MealHistory;
use crate::planner::pools::RecipePools;
use crate::planner::selector::{select_day, RecencySet};
use crate::planner::tie_break::TieBreak;
use crate::recipe::{Recipe, RecipeId};

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("invalid plan configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to read meal history between {start} and {end}")]
    History {
        start: NaiveDate,
        end: NaiveDate,
        #[source]
        source: anyhow::Error,
    },
}

/// Recipes chosen for a single date. Empty when no acceptable combination existed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayPlan {
    pub date: NaiveDate,
    pub recipes: Vec<Recipe>,
}

impl DayPlan {
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

/// A single `{date, recipe}` row for callers that persist the plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanEntry {
    pub date: NaiveDate,
    pub recipe_id: RecipeId,
    pub recipe_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Schedule {
    days: Vec<DayPlan>,
}

impl Schedule {
    pub fn days(&self) -> &[DayPlan] {
        &self.days
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = PlanEntry> + '_ {
        self.days.iter().flat_map(|day| {
            day.recipes.iter().map(move |recipe| PlanEntry {
                date: day.date,
                recipe_id: recipe.id.clone(),
                recipe_name: recipe.name.clone(),
            })
        })
    }

    pub fn empty_days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days.iter().filter(|day| day.is_empty()).map(|day| day.date)
    }

    pub fn filled_days(&self) -> usize {
        self.days.iter().filter(|day| !day.is_empty()).count()
    }
}

/// Loads the recency set from dinners already planned in the history window.
pub fn seed_recency<H: MealHistory + ?Sized>(
    history: &H,
    config: &PlanConfig,
) -> Result<RecencySet, PlanError> {
    let Some((start, end)) = config.history_window() else {
        return Ok(RecencySet::new());
    };
    let entries = history
        .list_entries(start, end)
        .map_err(|source| PlanError::History { start, end, source })?;

    let recency: RecencySet = entries
        .into_iter()
        .filter(|entry| entry.date >= start && entry.date <= end)
        .filter(|entry| entry.blocks_repeat())
        .filter_map(|entry| entry.recipe_id)
        .collect();
    info!(
        "Seeded {} recent recipe(s) from history {} to {}",
        recency.len(),
        start,
        end
    );
    Ok(recency)
}

/// Plans every date of the configured horizon in order.
///
/// History is read once. The same recency set is carried from one day to the
/// next, so a recipe picked on one day is excluded for the rest of the run.
/// Days that cannot be filled are kept as empty plans.
pub fn plan_horizon<H, T>(
    pools: &RecipePools,
    history: &H,
    config: &PlanConfig,
    tie_break: &mut T,
) -> Result<Schedule, PlanError>
where
    H: MealHistory + ?Sized,
    T: TieBreak + ?Sized,
{
    let mut recency = seed_recency(history, config)?;
    let schedule = plan_with_recency(pools, &mut recency, config, tie_break);
    Ok(schedule)
}

/// Runs the day-by-day loop against an already seeded recency set.
pub fn plan_with_recency<T: TieBreak + ?Sized>(
    pools: &RecipePools,
    recency: &mut RecencySet,
    config: &PlanConfig,
    tie_break: &mut T,
) -> Schedule {
    let mut days = Vec::with_capacity(config.days() as usize);
    for date in config.dates() {
        let recipes = select_day(pools, recency, config.min_roles_covered(), tie_break);
        if recipes.is_empty() {
            warn!("No valid meal combination for {}", date);
        } else {
            let names: Vec<&str> = recipes.iter().map(|r| r.name.as_str()).collect();
            debug!("{}: {}", date, names.join(" + "));
        }
        days.push(DayPlan { date, recipes });
    }
    Schedule { days }
}
