use chrono::NaiveDate;

use crate::core::stats::{TaskStats, recent_tasks};
use crate::core::task::Task;

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    pub loading: bool,
    pub stats: TaskStats,
    pub recent: Vec<Task>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            loading: true,
            stats: TaskStats::default(),
            recent: Vec::new(),
        }
    }
}

impl DashboardState {
    /// `tasks` is the owner's list, newest first.
    pub fn loaded(&mut self, tasks: &[Task], today: NaiveDate) {
        self.stats = TaskStats::compute(tasks, today);
        self.recent = recent_tasks(tasks).to_vec();
        self.loading = false;
    }

    pub fn load_failed(&mut self) {
        self.loading = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sample_task;
    use crate::core::task::TaskStatus;

    #[test]
    fn loaded_fills_stats_and_recent() {
        let tasks: Vec<Task> = (0..7)
            .map(|i| sample_task(&format!("t{i}"), TaskStatus::Pending))
            .collect();
        let mut state = DashboardState::default();
        assert!(state.loading);
        state.loaded(&tasks, NaiveDate::from_ymd_opt(2026, 5, 14).unwrap());
        assert!(!state.loading);
        assert_eq!(state.stats.total, 7);
        assert_eq!(state.recent, tasks[..5].to_vec());
    }

    #[test]
    fn failure_keeps_previous_numbers() {
        let mut state = DashboardState::default();
        state.load_failed();
        assert!(!state.loading);
        assert_eq!(state.stats, TaskStats::default());
        assert!(state.recent.is_empty());
    }
}
