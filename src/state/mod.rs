//! Screen state with explicit transitions, kept free of any widget types so
//! the behavior can be exercised without a window.

pub mod auth_form;
pub mod dashboard;
pub mod task_editor;
pub mod task_list;
pub mod toast;

/// Activation counter for the current screen. Async results are tagged with
/// the epoch they were issued under and dropped if the screen has changed
/// since.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Epoch(u64);

impl Epoch {
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    /// Whether a response issued under `self` may still touch the screen at `current`.
    pub fn is_current(self, current: Epoch) -> bool {
        self == current
    }
}

/// What a finished create, update or delete may still do besides notifying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Succeeded on the screen that issued it; go to the task list.
    ReturnToList,
    /// Failed on the screen that issued it; hand the form back.
    Reopen,
    /// The user has moved on; only the notification applies.
    NotifyOnly,
}

impl Completion {
    pub fn decide(issued: Epoch, current: Epoch, succeeded: bool) -> Self {
        match (issued.is_current(current), succeeded) {
            (false, _) => Self::NotifyOnly,
            (true, true) => Self::ReturnToList,
            (true, false) => Self::Reopen,
        }
    }
}
