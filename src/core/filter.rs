use super::task::{Priority, Task, TaskStatus};

/// A filter value that is either a concrete choice or the "all" sentinel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Choice<T> {
    #[default]
    All,
    Only(T),
}

impl<T: PartialEq> Choice<T> {
    pub fn accepts(&self, value: &T) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == value,
        }
    }
}

/// Transient filter state of the task list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub search_query: String,
    pub status: Choice<TaskStatus>,
    pub priority: Choice<Priority>,
}

impl FilterCriteria {
    pub fn is_active(&self) -> bool {
        !self.search_query.is_empty() || self.status != Choice::All || self.priority != Choice::All
    }

    pub fn matches(&self, task: &Task) -> bool {
        self.matches_query(task) && self.status.accepts(&task.status) && self.priority.accepts(&task.priority)
    }

    fn matches_query(&self, task: &Task) -> bool {
        if self.search_query.is_empty() {
            return true;
        }
        let q = self.search_query.to_lowercase();
        task.title.to_lowercase().contains(&q) || task.description_text().to_lowercase().contains(&q)
    }
}

/// Stable filter: keeps input order, never re-sorts.
pub fn filter_tasks(tasks: &[Task], criteria: &FilterCriteria) -> Vec<Task> {
    tasks.iter().filter(|t| criteria.matches(t)).cloned().collect()
}
