use chrono::{Duration, NaiveDate};
use thiserror::Error;

use crate::planner::selector::DEFAULT_MIN_ROLES_COVERED;

pub const DEFAULT_DAYS: i64 = 7;
pub const DEFAULT_NO_REPEAT_DAYS: i64 = 5;
pub const DEFAULT_MIN_ROLES: i64 = DEFAULT_MIN_ROLES_COVERED as i64;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("number of days to plan must be zero or more, got {0}")]
    NegativeDays(i64),
    #[error("no-repeat window must be zero or more days, got {0}")]
    NegativeNoRepeatWindow(i64),
    #[error("minimum role coverage must be between 1 and 3, got {0}")]
    InvalidMinRoles(i64),
    #[error("invalid start date '{value}': expected YYYY-MM-DD")]
    MalformedDate { value: String },
    #[error("planning window starting {start} does not fit in the calendar")]
    DateOutOfRange { start: NaiveDate },
}

/// Validated settings for one planning run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanConfig {
    start: NaiveDate,
    days: u32,
    no_repeat_days: u32,
    min_roles_covered: usize,
}

impl PlanConfig {
    /// Checks every setting up front so planning never starts from a bad configuration.
    pub fn new(
        start: NaiveDate,
        days: i64,
        no_repeat_days: i64,
        min_roles_covered: i64,
    ) -> Result<Self, ConfigError> {
        let days = u32::try_from(days).map_err(|_| ConfigError::NegativeDays(days))?;
        let no_repeat_days = u32::try_from(no_repeat_days)
            .map_err(|_| ConfigError::NegativeNoRepeatWindow(no_repeat_days))?;
        if !(1..=3).contains(&min_roles_covered) {
            return Err(ConfigError::InvalidMinRoles(min_roles_covered));
        }

        let config = PlanConfig {
            start,
            days,
            no_repeat_days,
            min_roles_covered: min_roles_covered as usize,
        };
        // Both ends of the history window, the last planned date included, must exist.
        if days > 0 {
            start
                .checked_sub_signed(Duration::days(i64::from(no_repeat_days)))
                .and_then(|_| start.checked_add_signed(Duration::days(i64::from(days) - 1)))
                .ok_or(ConfigError::DateOutOfRange { start })?;
        }
        Ok(config)
    }

    /// Default horizon (7 days, 5-day window, 2 roles) starting at `start`.
    pub fn starting(start: NaiveDate) -> Result<Self, ConfigError> {
        Self::new(start, DEFAULT_DAYS, DEFAULT_NO_REPEAT_DAYS, DEFAULT_MIN_ROLES)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn days(&self) -> u32 {
        self.days
    }

    pub fn no_repeat_days(&self) -> u32 {
        self.no_repeat_days
    }

    pub fn min_roles_covered(&self) -> usize {
        self.min_roles_covered
    }

    /// Every date to plan, in order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> {
        let start = self.start;
        (0..self.days).map(move |offset| start + Duration::days(i64::from(offset)))
    }

    /// Inclusive `(first, last)` range of history that seeds the recency set,
    /// or `None` when nothing is planned.
    pub fn history_window(&self) -> Option<(NaiveDate, NaiveDate)> {
        if self.days == 0 {
            return None;
        }
        let first = self.start - Duration::days(i64::from(self.no_repeat_days));
        let last = self.start + Duration::days(i64::from(self.days) - 1);
        Some((first, last))
    }
}

/// Parses an ISO `YYYY-MM-DD` start date.
pub fn parse_start_date(value: &str) -> Result<NaiveDate, ConfigError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| ConfigError::MalformedDate {
        value: value.to_string(),
    })
}
