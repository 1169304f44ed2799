use uuid::Uuid;

use crate::session::AuthState;

/// Screens of the app, addressed by path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Register,
    Dashboard,
    Tasks,
    NewTask,
    EditTask(Uuid),
    Settings,
}

impl Route {
    /// Resolve a path. Root and unknown paths land on the dashboard.
    pub fn parse(path: &str) -> Self {
        let segments: Vec<&str> = path
            .trim()
            .trim_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        match segments.as_slice() {
            ["login"] => Self::Login,
            ["register"] => Self::Register,
            ["dashboard"] => Self::Dashboard,
            ["tasks"] => Self::Tasks,
            ["tasks", "new"] => Self::NewTask,
            // An id that is not a UUID names no task; the nil id is reported missing.
            ["tasks", id, "edit"] => Self::EditTask(Uuid::parse_str(id).unwrap_or_default()),
            ["settings"] => Self::Settings,
            _ => Self::Dashboard,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Self::Login => "/login".to_string(),
            Self::Register => "/register".to_string(),
            Self::Dashboard => "/dashboard".to_string(),
            Self::Tasks => "/tasks".to_string(),
            Self::NewTask => "/tasks/new".to_string(),
            Self::EditTask(id) => format!("/tasks/{}/edit", id),
            Self::Settings => "/settings".to_string(),
        }
    }

    /// Reachable without a session.
    pub fn is_public(&self) -> bool {
        matches!(self, Self::Login | Self::Register | Self::Settings)
    }

    /// Sign-in and registration screens.
    pub fn is_auth_screen(&self) -> bool {
        matches!(self, Self::Login | Self::Register)
    }
}

/// Outcome of checking a route against the session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    /// The session lookup is still running; show a loading state.
    Loading,
    Allow(Route),
    Redirect(Route),
}

pub fn guard(route: Route, auth: &AuthState) -> Guard {
    match auth {
        AuthState::Uninitialized | AuthState::Resolving if !route.is_public() => Guard::Loading,
        AuthState::Authenticated(_) if route.is_auth_screen() => Guard::Redirect(Route::Dashboard),
        AuthState::Anonymous if !route.is_public() => Guard::Redirect(Route::Login),
        _ => Guard::Allow(route),
    }
}

/// Whether the current screen must be entered again once the session lookup
/// has moved auth from `before` to `after`: it was waiting on the lookup, or
/// the outcome now sends it elsewhere.
pub fn reenter_after_resolve(route: Route, before: &AuthState, after: &AuthState) -> bool {
    guard(route, before) == Guard::Loading || matches!(guard(route, after), Guard::Redirect(_))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::sample_session;

    #[test]
    fn parses_every_route() {
        let id = Uuid::new_v4();
        let routes = [
            Route::Login,
            Route::Register,
            Route::Dashboard,
            Route::Tasks,
            Route::NewTask,
            Route::EditTask(id),
            Route::Settings,
        ];
        for route in routes {
            assert_eq!(Route::parse(&route.path()), route);
        }
    }

    #[test]
    fn root_and_unknown_go_to_dashboard() {
        assert_eq!(Route::parse("/"), Route::Dashboard);
        assert_eq!(Route::parse(""), Route::Dashboard);
        assert_eq!(Route::parse("/nope"), Route::Dashboard);
        assert_eq!(Route::parse("/tasks/new/extra"), Route::Dashboard);
    }

    #[test]
    fn tolerates_trailing_slash() {
        assert_eq!(Route::parse("/tasks/"), Route::Tasks);
        assert_eq!(Route::parse("tasks/new"), Route::NewTask);
    }

    #[test]
    fn never_redirects_while_resolving() {
        for auth in [AuthState::Uninitialized, AuthState::Resolving] {
            assert_eq!(guard(Route::Tasks, &auth), Guard::Loading);
            assert_eq!(guard(Route::Dashboard, &auth), Guard::Loading);
            assert_eq!(guard(Route::Login, &auth), Guard::Allow(Route::Login));
        }
    }

    #[test]
    fn anonymous_is_sent_to_login() {
        let auth = AuthState::Anonymous;
        assert_eq!(guard(Route::NewTask, &auth), Guard::Redirect(Route::Login));
        assert_eq!(guard(Route::Register, &auth), Guard::Allow(Route::Register));
        assert_eq!(guard(Route::Settings, &auth), Guard::Allow(Route::Settings));
    }

    #[test]
    fn signed_in_skips_auth_screens() {
        let auth = AuthState::Authenticated(sample_session());
        assert_eq!(guard(Route::Login, &auth), Guard::Redirect(Route::Dashboard));
        let id = Uuid::new_v4();
        assert_eq!(guard(Route::EditTask(id), &auth), Guard::Allow(Route::EditTask(id)));
    }

    #[test]
    fn malformed_edit_id_is_an_edit_of_nothing() {
        assert_eq!(
            Route::parse("/tasks/not-a-uuid/edit"),
            Route::EditTask(Uuid::nil())
        );
        assert_eq!(Route::parse("/tasks/42/edit"), Route::EditTask(Uuid::nil()));
    }

    #[test]
    fn lookup_result_reenters_waiting_screen() {
        let signed_in = AuthState::Authenticated(sample_session());
        assert!(reenter_after_resolve(Route::Tasks, &AuthState::Resolving, &signed_in));
        assert!(reenter_after_resolve(
            Route::Dashboard,
            &AuthState::Resolving,
            &AuthState::Anonymous
        ));
    }

    #[test]
    fn lookup_result_moves_signed_in_user_off_login() {
        let signed_in = AuthState::Authenticated(sample_session());
        assert!(reenter_after_resolve(Route::Login, &AuthState::Resolving, &signed_in));
        assert!(!reenter_after_resolve(
            Route::Login,
            &AuthState::Resolving,
            &AuthState::Anonymous
        ));
    }

    #[test]
    fn lookup_result_leaves_settings_alone() {
        let signed_in = AuthState::Authenticated(sample_session());
        assert!(!reenter_after_resolve(Route::Settings, &AuthState::Resolving, &signed_in));
        assert!(!reenter_after_resolve(
            Route::Settings,
            &AuthState::Resolving,
            &AuthState::Anonymous
        ));
        // A late result after sign-in changes nothing
        assert!(!reenter_after_resolve(Route::Tasks, &signed_in, &signed_in));
    }
}
