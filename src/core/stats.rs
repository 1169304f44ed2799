use chrono::NaiveDate;

use super::task::{Task, TaskStatus};

/// Number of tasks shown in the dashboard's "Recent Tasks" card.
pub const RECENT_LIMIT: usize = 5;

/// Dashboard counters for one owner's task collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskStats {
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub overdue: usize,
}

impl TaskStats {
    pub fn compute(tasks: &[Task], as_of: NaiveDate) -> Self {
        let mut stats = Self {
            total: tasks.len(),
            ..Self::default()
        };

        for task in tasks {
            match task.status {
                TaskStatus::Pending => stats.pending += 1,
                TaskStatus::InProgress => stats.in_progress += 1,
                TaskStatus::Completed => stats.completed += 1,
            }
            if task.is_overdue(as_of) {
                stats.overdue += 1;
            }
        }

        stats
    }
}

pub fn compute_stats(tasks: &[Task], as_of: NaiveDate) -> TaskStats {
    TaskStats::compute(tasks, as_of)
}

/// The newest tasks. The slice must already be ordered by `created_at`
/// descending; the list query asks the backend for that order.
pub fn recent_tasks(tasks: &[Task]) -> &[Task] {
    &tasks[..tasks.len().min(RECENT_LIMIT)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sample_task;
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, 14).unwrap()
    }

    #[test]
    fn empty_is_all_zero() {
        assert_eq!(compute_stats(&[], today()), TaskStats::default());
    }

    #[test]
    fn owner_scenario() {
        let mut overdue = sample_task("Renew passport", TaskStatus::Pending);
        overdue.due_date = Some(today() - Duration::days(3));
        let mut upcoming = sample_task("Book flights", TaskStatus::Pending);
        upcoming.due_date = Some(today() + Duration::days(3));
        let mut done_late = sample_task("File taxes", TaskStatus::Completed);
        done_late.due_date = Some(today() - Duration::days(10));

        let stats = compute_stats(&[overdue, upcoming, done_late], today());
        assert_eq!(
            stats,
            TaskStats {
                total: 3,
                pending: 2,
                in_progress: 0,
                completed: 1,
                overdue: 1,
            }
        );
    }

    #[test]
    fn due_today_is_not_overdue() {
        let mut task = sample_task("Call plumber", TaskStatus::InProgress);
        task.due_date = Some(today());
        assert_eq!(compute_stats(&[task], today()).overdue, 0);
    }

    #[test]
    fn status_counts_cover_total() {
        let tasks: Vec<Task> = (0..9)
            .map(|i| sample_task(&format!("t{i}"), TaskStatus::ALL[i % 3]))
            .collect();
        let stats = compute_stats(&tasks, today());
        assert_eq!(stats.total, tasks.len());
        assert_eq!(stats.pending + stats.in_progress + stats.completed, stats.total);
    }

    #[test]
    fn overdue_grows_as_days_pass() {
        let tasks: Vec<Task> = (0..6)
            .map(|i| {
                let mut t = sample_task(&format!("t{i}"), TaskStatus::ALL[i % 3]);
                t.due_date = Some(today() + Duration::days(i as i64 - 2));
                t
            })
            .collect();

        let mut previous = 0;
        for offset in -5..10 {
            let count = compute_stats(&tasks, today() + Duration::days(offset)).overdue;
            assert!(count >= previous);
            previous = count;
        }
    }

    #[test]
    fn recent_takes_first_five_in_order() {
        let tasks: Vec<Task> = (0..8)
            .map(|i| sample_task(&format!("t{i}"), TaskStatus::Pending))
            .collect();
        let recent = recent_tasks(&tasks);
        assert_eq!(recent.len(), 5);
        assert_eq!(recent, &tasks[..5]);
    }

    #[test]
    fn recent_on_short_list() {
        let tasks = vec![sample_task("only", TaskStatus::Pending)];
        assert_eq!(recent_tasks(&tasks).len(), 1);
        assert!(recent_tasks(&[]).is_empty());
    }
}
