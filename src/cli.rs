use clap::Parser;
use std::path::PathBuf;

use crate::config::{DEFAULT_DAYS, DEFAULT_MIN_ROLES, DEFAULT_NO_REPEAT_DAYS};
use crate::export::OutputFormat;

#[derive(Parser, Debug)]
#[command(author, version, about = "Plans dinners that cover protein, starch and vegetable", long_about = None)]
pub struct Cli {
    /// Path to the JSON file of role-labelled recipes
    #[arg(short, long, env = "MEAL_PLANNER_RECIPES")]
    pub recipes: PathBuf,

    /// Path to a CSV export of existing meal-plan entries (date,entry_type,recipe_id)
    #[arg(long, env = "MEAL_PLANNER_HISTORY")]
    pub history: Option<PathBuf>,

    /// First day to plan, YYYY-MM-DD (defaults to today)
    #[arg(short, long, env = "MEAL_PLANNER_START_DATE")]
    pub start_date: Option<String>,

    /// Number of days to plan
    #[arg(short, long, default_value_t = DEFAULT_DAYS, allow_negative_numbers = true, env = "MEAL_PLANNER_DAYS")]
    pub days: i64,

    /// Days of history during which a dinner recipe may not repeat
    #[arg(long, default_value_t = DEFAULT_NO_REPEAT_DAYS, allow_negative_numbers = true, env = "MEAL_PLANNER_NO_REPEAT_DAYS")]
    pub no_repeat_days: i64,

    /// Minimum distinct roles a multi-recipe day must cover (1-3)
    #[arg(long, default_value_t = DEFAULT_MIN_ROLES, allow_negative_numbers = true, env = "MEAL_PLANNER_MIN_ROLES")]
    pub min_roles: i64,

    /// Only plan recipes with this category (e.g. dinner)
    #[arg(long, env = "MEAL_PLANNER_CATEGORY")]
    pub category: Option<String>,

    /// Seed for reproducible tie-breaks
    #[arg(long, env = "MEAL_PLANNER_SEED")]
    pub seed: Option<u64>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Write the schedule to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
