use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [Self::Pending, Self::InProgress, Self::Completed];

    /// Column value used by the `tasks` table.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }

    pub fn from_column(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "in_progress" => Some(Self::InProgress),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Self::Low, Self::Medium, Self::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn from_column(s: &str) -> Option<Self> {
        match s {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

/// A row of the `tasks` table as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    #[serde(rename = "user_id")]
    pub owner_id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Description for display and matching; a missing description reads as empty.
    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    /// Due before `today` and still open.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        match self.due_date {
            Some(due) => due < today && !self.status.is_completed(),
            None => false,
        }
    }
}

/// The writable columns of a task. Sent on insert (with the owner) and on update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskFields {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub status: TaskStatus,
    pub due_date: Option<NaiveDate>,
}

/// Editable form values. Dates stay as text until the form validates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskForm {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub status: TaskStatus,
    pub due_date: String,
}

impl TaskForm {
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description_text().to_string(),
            priority: task.priority,
            status: task.status,
            due_date: task
                .due_date
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
        }
    }

    /// Parsed due date. `Ok(None)` when the field is blank.
    pub fn parsed_due_date(&self) -> Result<Option<NaiveDate>, chrono::ParseError> {
        let raw = self.due_date.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        NaiveDate::parse_from_str(raw, DATE_FORMAT).map(Some)
    }

    /// Column values for the backend. Callers validate first; an unparsable
    /// date is dropped here rather than sent.
    pub fn to_fields(&self) -> TaskFields {
        TaskFields {
            title: self.title.clone(),
            description: self.description.clone(),
            priority: self.priority,
            status: self.status,
            due_date: self.parsed_due_date().ok().flatten(),
        }
    }
}

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_backend_row_with_null_description() {
        let json = r#"{
            "id": "6f1c1f7e-9a3b-4b38-9d55-0d7f3b0c2a11",
            "user_id": "0b9f5e0a-3c1d-4e55-8a0f-1f2e3d4c5b6a",
            "title": "Buy milk",
            "description": null,
            "priority": "high",
            "status": "in_progress",
            "due_date": "2026-03-01",
            "created_at": "2026-02-01T10:00:00.123456+00:00",
            "updated_at": "2026-02-02T10:00:00+00:00"
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.title, "Buy milk");
        assert_eq!(task.description, None);
        assert_eq!(task.description_text(), "");
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.status, TaskStatus::InProgress);
        assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2026, 3, 1));
    }

    #[test]
    fn fields_serialize_with_column_names() {
        let fields = TaskFields {
            title: "Write report".into(),
            description: String::new(),
            priority: Priority::Low,
            status: TaskStatus::Completed,
            due_date: None,
        };
        let value = serde_json::to_value(&fields).unwrap();
        assert_eq!(value["priority"], "low");
        assert_eq!(value["status"], "completed");
        assert!(value["due_date"].is_null());
    }

    #[test]
    fn blank_due_date_becomes_none() {
        let form = TaskForm {
            title: "x".into(),
            due_date: "  ".into(),
            ..TaskForm::default()
        };
        assert_eq!(form.parsed_due_date().unwrap(), None);
        assert_eq!(form.to_fields().due_date, None);
    }

    #[test]
    fn form_defaults_to_medium_pending() {
        let form = TaskForm::default();
        assert_eq!(form.priority, Priority::Medium);
        assert_eq!(form.status, TaskStatus::Pending);
    }

    #[test]
    fn status_keywords_roundtrip() {
        for status in TaskStatus::ALL {
            assert_eq!(TaskStatus::from_column(status.as_str()), Some(status));
        }
        for priority in Priority::ALL {
            assert_eq!(Priority::from_column(priority.as_str()), Some(priority));
        }
        assert_eq!(TaskStatus::from_column("done"), None);
    }
}
