//! Ranking View — deterministic display order for a normalized `SearchResult`.
//!
//! `MostRecent` compares `posted_date` as plain strings. That equals chronological order only
//! for strict `YYYY-MM-DD` dates, and entries with an empty date always sort after dated ones.
//! Changing this to calendar comparison would change observable ordering.

use serde::{Deserialize, Serialize};

use crate::search::models::{JobEntry, SearchResult};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    #[default]
    BestMatch,
    MostRecent,
}

/// Returns the jobs of `result` in display order. Never touches `result.jobs`.
/// Both orders are stable: ties keep their relative input order.
pub fn order(result: &SearchResult, mode: SortMode) -> Vec<JobEntry> {
    let mut jobs = result.jobs.clone();
    match mode {
        SortMode::BestMatch => jobs.sort_by(|a, b| b.match_score.cmp(&a.match_score)),
        SortMode::MostRecent => jobs.sort_by(|a, b| b.posted_date.cmp(&a.posted_date)),
    }
    jobs
}
