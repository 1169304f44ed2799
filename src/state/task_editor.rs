use chrono::NaiveDate;
use uuid::Uuid;

use crate::core::task::{Priority, Task, TaskFields, TaskForm, TaskStatus};
use crate::core::validate::{Field, FieldErrors, validate_task};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit(Uuid),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorPhase {
    /// Fetching the task being edited.
    Loading,
    Editing,
    Saving,
    ConfirmDelete,
    Deleting,
}

/// Shared create/edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskEditor {
    mode: EditorMode,
    phase: EditorPhase,
    pub form: TaskForm,
    pub errors: FieldErrors,
}

impl TaskEditor {
    pub fn create() -> Self {
        Self {
            mode: EditorMode::Create,
            phase: EditorPhase::Editing,
            form: TaskForm::default(),
            errors: FieldErrors::new(),
        }
    }

    pub fn edit(id: Uuid) -> Self {
        Self {
            mode: EditorMode::Edit(id),
            phase: EditorPhase::Loading,
            form: TaskForm::default(),
            errors: FieldErrors::new(),
        }
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn phase(&self) -> EditorPhase {
        self.phase
    }

    pub fn task_id(&self) -> Option<Uuid> {
        match self.mode {
            EditorMode::Create => None,
            EditorMode::Edit(id) => Some(id),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.phase == EditorPhase::Loading
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.phase, EditorPhase::Saving | EditorPhase::Deleting)
    }

    /// Prefill from the fetched row. Ignored unless this editor is waiting for that row.
    pub fn loaded(&mut self, task: &Task) {
        if self.phase != EditorPhase::Loading || self.mode != EditorMode::Edit(task.id) {
            return;
        }
        self.form = TaskForm::from_task(task);
        self.errors = FieldErrors::new();
        self.phase = EditorPhase::Editing;
    }

    pub fn set_title(&mut self, value: String) {
        self.form.title = value;
        self.errors.clear(Field::Title);
    }

    pub fn set_description(&mut self, value: String) {
        self.form.description = value;
    }

    pub fn set_priority(&mut self, priority: Priority) {
        self.form.priority = priority;
    }

    pub fn set_status(&mut self, status: TaskStatus) {
        self.form.status = status;
    }

    pub fn set_due_date(&mut self, value: String) {
        self.form.due_date = value;
        self.errors.clear(Field::DueDate);
    }

    /// Validate against `today` and move to saving. `None` when not editing
    /// or when a field is invalid.
    pub fn submit(&mut self, today: NaiveDate) -> Option<TaskFields> {
        if self.phase != EditorPhase::Editing {
            return None;
        }
        self.errors = validate_task(&self.form, today);
        if !self.errors.is_empty() {
            return None;
        }
        self.phase = EditorPhase::Saving;
        Some(self.form.to_fields())
    }

    /// Save was rejected; the form stays as typed.
    pub fn save_failed(&mut self) {
        if self.phase == EditorPhase::Saving {
            self.phase = EditorPhase::Editing;
        }
    }

    pub fn request_delete(&mut self) {
        if self.phase == EditorPhase::Editing && self.task_id().is_some() {
            self.phase = EditorPhase::ConfirmDelete;
        }
    }

    pub fn cancel_delete(&mut self) {
        if self.phase == EditorPhase::ConfirmDelete {
            self.phase = EditorPhase::Editing;
        }
    }

    /// Returns the id to delete once the user has confirmed.
    pub fn confirm_delete(&mut self) -> Option<Uuid> {
        if self.phase != EditorPhase::ConfirmDelete {
            return None;
        }
        self.phase = EditorPhase::Deleting;
        self.task_id()
    }

    pub fn delete_failed(&mut self) {
        if self.phase == EditorPhase::Deleting {
            self.phase = EditorPhase::Editing;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sample_task;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, 14).unwrap()
    }

    #[test]
    fn blank_title_blocks_save() {
        let mut editor = TaskEditor::create();
        assert_eq!(editor.submit(today()), None);
        assert_eq!(editor.phase(), EditorPhase::Editing);
        assert!(editor.errors.contains(Field::Title));

        editor.set_title("Write report".into());
        assert!(editor.errors.is_empty());
        let fields = editor.submit(today()).unwrap();
        assert_eq!(fields.title, "Write report");
        assert!(editor.is_busy());
        assert_eq!(editor.submit(today()), None);
    }

    #[test]
    fn past_due_date_rejected_on_create() {
        let mut editor = TaskEditor::create();
        editor.set_title("Late".into());
        editor.set_due_date("2026-05-13".into());
        assert_eq!(editor.submit(today()), None);
        assert!(editor.errors.contains(Field::DueDate));
        editor.set_due_date("2026-05-14".into());
        assert!(editor.submit(today()).is_some());
    }

    #[test]
    fn failed_save_keeps_form() {
        let mut editor = TaskEditor::create();
        editor.set_title("Keep me".into());
        editor.set_description("notes".into());
        editor.submit(today()).unwrap();
        editor.save_failed();
        assert_eq!(editor.phase(), EditorPhase::Editing);
        assert_eq!(editor.form.title, "Keep me");
        assert_eq!(editor.form.description, "notes");
    }

    #[test]
    fn edit_prefills_only_matching_task() {
        let task = sample_task("Existing", TaskStatus::InProgress);
        let mut editor = TaskEditor::edit(task.id);
        assert!(editor.is_loading());

        let other = sample_task("Other", TaskStatus::Pending);
        editor.loaded(&other);
        assert!(editor.is_loading());

        editor.loaded(&task);
        assert_eq!(editor.phase(), EditorPhase::Editing);
        assert_eq!(editor.form.title, "Existing");
        assert_eq!(editor.form.status, TaskStatus::InProgress);
    }

    #[test]
    fn delete_needs_confirmation() {
        let task = sample_task("Existing", TaskStatus::Pending);
        let mut editor = TaskEditor::edit(task.id);
        editor.loaded(&task);

        assert_eq!(editor.confirm_delete(), None);
        editor.request_delete();
        assert_eq!(editor.phase(), EditorPhase::ConfirmDelete);
        editor.cancel_delete();
        assert_eq!(editor.phase(), EditorPhase::Editing);

        editor.request_delete();
        assert_eq!(editor.confirm_delete(), Some(task.id));
        assert!(editor.is_busy());
        editor.delete_failed();
        assert_eq!(editor.phase(), EditorPhase::Editing);
    }

    #[test]
    fn create_mode_cannot_delete() {
        let mut editor = TaskEditor::create();
        editor.request_delete();
        assert_eq!(editor.phase(), EditorPhase::Editing);
    }
}
