pub mod horizon;
pub mod pools;
pub mod selector;
pub mod tie_break;

pub use horizon::{plan_horizon, seed_recency, DayPlan, PlanEntry, PlanError, Schedule};
pub use pools::{filter_by_category, PoolSummary, RecipePools};
pub use selector::{covered_roles, select_day, RecencySet, DEFAULT_MIN_ROLES_COVERED};
pub use tie_break::{FirstTieBreak, RandomTieBreak, TieBreak};
