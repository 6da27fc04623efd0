use anyhow::{Context, Result};
use clap::ValueEnum;
use std::fmt::Write as _;

use crate::planner::Schedule;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human readable table, one line per day
    Text,
    /// The full schedule as JSON
    Json,
    /// `date,recipe_id,recipe_name` rows ready for import
    Csv,
}

pub fn render_schedule(schedule: &Schedule, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(schedule)),
        OutputFormat::Json => {
            serde_json::to_string_pretty(schedule).context("Failed to serialize schedule to JSON")
        }
        OutputFormat::Csv => render_csv(schedule),
    }
}

fn render_text(schedule: &Schedule) -> String {
    let mut out = String::new();
    for day in schedule.days() {
        let weekday = day.date.format("%a");
        if day.is_empty() {
            let _ = writeln!(out, "{} {}  (no valid combination)", weekday, day.date);
        } else {
            let names: Vec<&str> = day.recipes.iter().map(|r| r.name.as_str()).collect();
            let _ = writeln!(out, "{} {}  {}", weekday, day.date, names.join(" + "));
        }
    }
    out
}

fn render_csv(schedule: &Schedule) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for entry in schedule.entries() {
        writer.serialize(&entry).context("Failed to write schedule row")?;
    }
    let bytes = writer.into_inner().context("Failed to flush schedule CSV")?;
    String::from_utf8(bytes).context("Schedule CSV is not valid UTF-8")
}
