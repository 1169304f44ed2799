use crate::core::filter::{Choice, FilterCriteria, filter_tasks};
use crate::core::task::{Priority, Task, TaskStatus};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    List,
    Grid,
}

/// Why the visible list is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    NoTasks,
    NoMatches,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskListState {
    pub loading: bool,
    pub tasks: Vec<Task>,
    pub criteria: FilterCriteria,
    pub view_mode: ViewMode,
}

impl Default for TaskListState {
    fn default() -> Self {
        Self {
            loading: true,
            tasks: Vec::new(),
            criteria: FilterCriteria::default(),
            view_mode: ViewMode::default(),
        }
    }
}

impl TaskListState {
    pub fn loaded(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
        self.loading = false;
    }

    pub fn load_failed(&mut self) {
        self.loading = false;
    }

    pub fn set_query(&mut self, query: String) {
        self.criteria.search_query = query;
    }

    pub fn set_status(&mut self, status: Choice<TaskStatus>) {
        self.criteria.status = status;
    }

    pub fn set_priority(&mut self, priority: Choice<Priority>) {
        self.criteria.priority = priority;
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    /// Tasks passing the current filters, in list order.
    pub fn visible(&self) -> Vec<Task> {
        filter_tasks(&self.tasks, &self.criteria)
    }

    pub fn empty_state(&self, visible: &[Task]) -> Option<EmptyState> {
        if !visible.is_empty() {
            None
        } else if self.tasks.is_empty() {
            Some(EmptyState::NoTasks)
        } else {
            Some(EmptyState::NoMatches)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sample_task;

    #[test]
    fn filters_recompute_from_source() {
        let mut state = TaskListState::default();
        state.loaded(vec![
            sample_task("Buy milk", TaskStatus::Pending),
            sample_task("Pay rent", TaskStatus::Completed),
        ]);

        state.set_status(Choice::Only(TaskStatus::Completed));
        assert_eq!(state.visible().len(), 1);
        state.set_status(Choice::All);
        assert_eq!(state.visible().len(), 2);
        assert_eq!(state.tasks.len(), 2);
    }

    #[test]
    fn empty_states() {
        let mut state = TaskListState::default();
        state.loaded(Vec::new());
        assert_eq!(state.empty_state(&state.visible()), Some(EmptyState::NoTasks));

        state.loaded(vec![sample_task("Buy milk", TaskStatus::Pending)]);
        state.set_query("zzz".into());
        assert_eq!(state.empty_state(&state.visible()), Some(EmptyState::NoMatches));

        state.set_query(String::new());
        assert_eq!(state.empty_state(&state.visible()), None);
    }

    #[test]
    fn failed_load_stops_spinner() {
        let mut state = TaskListState::default();
        state.load_failed();
        assert!(!state.loading);
        assert!(state.tasks.is_empty());
    }
}
