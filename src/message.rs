use std::time::Instant;

use crate::core::filter::Choice;
use crate::core::task::{Priority, Task, TaskStatus};
use crate::remote::{RemoteError, Session};
use crate::route::Route;
use crate::state::Epoch;
use crate::state::task_list::ViewMode;

/// Sidebar entries, shown once signed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavPage {
    Dashboard,
    Tasks,
    NewTask,
}

impl NavPage {
    pub const ALL: &'static [NavPage] = &[NavPage::Dashboard, NavPage::Tasks, NavPage::NewTask];

    pub fn title(&self) -> String {
        match self {
            Self::Dashboard => crate::fl!("nav-dashboard"),
            Self::Tasks => crate::fl!("nav-tasks"),
            Self::NewTask => crate::fl!("nav-new-task"),
        }
    }

    pub fn icon_name(&self) -> &'static str {
        match self {
            Self::Dashboard => "view-grid-symbolic",
            Self::Tasks => "view-list-symbolic",
            Self::NewTask => "list-add-symbolic",
        }
    }

    pub fn route(&self) -> Route {
        match self {
            Self::Dashboard => Route::Dashboard,
            Self::Tasks => Route::Tasks,
            Self::NewTask => Route::NewTask,
        }
    }

    /// Entry highlighted for a route. The edit screen belongs under Tasks.
    pub fn for_route(route: Route) -> Option<NavPage> {
        match route {
            Route::Dashboard => Some(Self::Dashboard),
            Route::Tasks | Route::EditTask(_) => Some(Self::Tasks),
            Route::NewTask => Some(Self::NewTask),
            Route::Login | Route::Register | Route::Settings => None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    // Navigation
    Navigate(Route),

    // Session
    SessionRestored(Result<Option<Session>, RemoteError>),
    /// The access token was renewed before a call; apply it, then the call's result.
    SessionRefreshed(Session, Box<Message>),
    SignOut,
    SignedOut(Result<(), RemoteError>),
    PreviousBackendSignedOut(Result<(), RemoteError>),
    ToggleTheme,

    // Sign in / register
    AuthEmailChanged(String),
    AuthPasswordChanged(String),
    AuthConfirmChanged(String),
    AuthSubmit,
    SignedIn(Epoch, Result<Session, RemoteError>),
    SignedUp(Epoch, Result<Option<Session>, RemoteError>),

    // Dashboard
    DashboardLoaded(Epoch, Result<Vec<Task>, RemoteError>),

    // Task list
    TasksLoaded(Epoch, Result<Vec<Task>, RemoteError>),
    SearchChanged(String),
    StatusFilter(Choice<TaskStatus>),
    PriorityFilter(Choice<Priority>),
    SetViewMode(ViewMode),

    // Task form
    TaskLoaded(Epoch, Result<Option<Task>, RemoteError>),
    FormTitle(String),
    FormDescription(String),
    FormPriority(Priority),
    FormStatus(TaskStatus),
    FormDueDate(String),
    FormSubmit,
    TaskCreated(Epoch, Result<Task, RemoteError>),
    TaskUpdated(Epoch, Result<(), RemoteError>),
    RequestDelete,
    CancelDelete,
    ConfirmDelete,
    TaskDeleted(Epoch, Result<(), RemoteError>),

    // Settings
    SettingsUrlChanged(String),
    SettingsAnonKeyChanged(String),
    SaveBackendSettings,
    ToggleDebugLogging,

    // Notifications
    Tick(Instant),
    DismissToast(u64),
}
