//! Per-project task statistics.

use serde::Serialize;

use crate::task::{TaskPriority, TaskStatus};

/// Task counts keyed by status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusBreakdown {
    pub todo: i64,
    pub in_progress: i64,
    pub done: i64,
}

/// Task counts keyed by priority.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorityBreakdown {
    pub low: i64,
    pub medium: i64,
    pub high: i64,
}

/// Summary of the live (non-deleted) tasks in a project.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStats {
    pub total: i64,
    pub by_status: StatusBreakdown,
    pub by_priority: PriorityBreakdown,
    pub unassigned: i64,
    /// Share of tasks in `Done`, as a percentage rounded to one decimal.
    pub completion_percent: f64,
}

impl ProjectStats {
    /// Build from grouped `(value, count)` rows as returned by the store.
    ///
    /// Rows carrying values outside the known vocabularies still count
    /// toward `total` but toward no bucket.
    pub fn from_counts(
        status_counts: &[(String, i64)],
        priority_counts: &[(String, i64)],
        unassigned: i64,
    ) -> Self {
        let mut by_status = StatusBreakdown::default();
        let mut total = 0;
        for (value, count) in status_counts {
            total += count;
            match TaskStatus::parse(value) {
                Ok(TaskStatus::Todo) => by_status.todo += count,
                Ok(TaskStatus::InProgress) => by_status.in_progress += count,
                Ok(TaskStatus::Done) => by_status.done += count,
                Err(_) => {}
            }
        }

        let mut by_priority = PriorityBreakdown::default();
        for (value, count) in priority_counts {
            match TaskPriority::parse(value) {
                Ok(TaskPriority::Low) => by_priority.low += count,
                Ok(TaskPriority::Medium) => by_priority.medium += count,
                Ok(TaskPriority::High) => by_priority.high += count,
                Err(_) => {}
            }
        }

        Self {
            total,
            completion_percent: completion_percent(by_status.done, total),
            by_status,
            by_priority,
            unassigned,
        }
    }
}

/// `done / total * 100`, rounded to one decimal; `0.0` for an empty project.
pub fn completion_percent(done: i64, total: i64) -> f64 {
    if total <= 0 {
        return 0.0;
    }
    let raw = done as f64 / total as f64 * 100.0;
    (raw * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(pairs: &[(&str, i64)]) -> Vec<(String, i64)> {
        pairs.iter().map(|(v, c)| (v.to_string(), *c)).collect()
    }

    #[test]
    fn empty_project_has_zero_completion() {
        let stats = ProjectStats::from_counts(&[], &[], 0);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.completion_percent, 0.0);
    }

    #[test]
    fn counts_are_bucketed() {
        let stats = ProjectStats::from_counts(
            &rows(&[("Todo", 2), ("In Progress", 1), ("Done", 3)]),
            &rows(&[("Low", 1), ("Medium", 4), ("High", 1)]),
            2,
        );
        assert_eq!(stats.total, 6);
        assert_eq!(stats.by_status.todo, 2);
        assert_eq!(stats.by_status.in_progress, 1);
        assert_eq!(stats.by_status.done, 3);
        assert_eq!(stats.by_priority.medium, 4);
        assert_eq!(stats.unassigned, 2);
        assert_eq!(stats.completion_percent, 50.0);
    }

    #[test]
    fn completion_is_rounded_to_one_decimal() {
        assert_eq!(completion_percent(1, 3), 33.3);
        assert_eq!(completion_percent(2, 3), 66.7);
        assert_eq!(completion_percent(3, 3), 100.0);
    }

    #[test]
    fn unknown_status_counts_toward_total_only() {
        let stats = ProjectStats::from_counts(&rows(&[("Backlog", 2), ("Done", 2)]), &[], 0);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.by_status.done, 2);
        assert_eq!(stats.completion_percent, 50.0);
    }
}
