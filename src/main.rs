use anyhow::{Context, Result};
use chrono::Local;
use meal_planner::cli::parse_args;
use meal_planner::config::{parse_start_date, PlanConfig};
use meal_planner::data_loader::{parse_recipes_json, read_history_csv};
use meal_planner::export::render_schedule;
use meal_planner::history::InMemoryHistory;
use meal_planner::planner::{filter_by_category, plan_horizon, RandomTieBreak, RecipePools, Schedule};
use meal_planner::recipe::MealCategory;
use tokio::fs;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok(); // Load .env file for MEAL_PLANNER_* settings

    let cli_args = parse_args();

    let log_level = if cli_args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr)
        .init();

    // Validate configuration before touching any data.
    let start = match cli_args.start_date.as_deref() {
        Some(raw) => parse_start_date(raw)?,
        None => Local::now().date_naive(),
    };
    let config = PlanConfig::new(start, cli_args.days, cli_args.no_repeat_days, cli_args.min_roles)?;

    let recipe_content = fs::read_to_string(&cli_args.recipes)
        .await
        .with_context(|| format!("Failed to read recipe file '{}'", cli_args.recipes.display()))?;
    let mut recipes = parse_recipes_json(&recipe_content)?;
    info!("Loaded {} recipes from {}", recipes.len(), cli_args.recipes.display());

    if let Some(category) = cli_args.category.as_deref() {
        let category = MealCategory::parse(category);
        recipes = filter_by_category(recipes, &category);
        info!("{} recipes left after keeping category '{}'", recipes.len(), category);
    }

    let history = match &cli_args.history {
        Some(path) => {
            let content = fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read history file '{}'", path.display()))?;
            let entries = read_history_csv(content.as_bytes())
                .with_context(|| format!("Failed to parse history file '{}'", path.display()))?;
            InMemoryHistory::new(entries)
        }
        None => InMemoryHistory::default(),
    };

    let pools = RecipePools::build(&recipes);
    let summary = pools.summary();
    info!(
        "Pools: {} protein, {} starch, {} vegetable, {} complete",
        summary.protein, summary.starch, summary.vegetable, summary.complete
    );
    if pools.is_empty() {
        warn!("No recipe carries a role; every day will be empty");
    }

    let schedule: Schedule = match cli_args.seed {
        Some(seed) => plan_horizon(&pools, &history, &config, &mut RandomTieBreak::seeded(seed))?,
        None => plan_horizon(&pools, &history, &config, &mut RandomTieBreak::new())?,
    };
    info!(
        "Planned {}/{} day(s) starting {}",
        schedule.filled_days(),
        schedule.len(),
        config.start()
    );

    let rendered = render_schedule(&schedule, cli_args.format)?;
    match &cli_args.output {
        Some(path) => {
            fs::write(path, rendered)
                .await
                .with_context(|| format!("Failed to write schedule to '{}'", path.display()))?;
            info!("Schedule written to {}", path.display());
        }
        None => print!("{}", rendered),
    }

    Ok(())
}
