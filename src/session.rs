//! Process-wide session and preference state, owned by the application and
//! handed to views explicitly.

use crate::config::ThemePreference;
use crate::remote::Session;

/// Lifecycle: `Uninitialized → Resolving → Authenticated | Anonymous`.
/// Sign-in and sign-out move between the two resolved states.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthState {
    #[default]
    Uninitialized,
    Resolving,
    Authenticated(Session),
    Anonymous,
}

impl AuthState {
    /// Still waiting on the startup session lookup.
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Uninitialized | Self::Resolving)
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            Self::Authenticated(session) => Some(session),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppContext {
    auth: AuthState,
    theme: ThemePreference,
}

impl AppContext {
    pub fn new(theme: ThemePreference) -> Self {
        Self {
            auth: AuthState::Uninitialized,
            theme,
        }
    }

    pub fn auth(&self) -> &AuthState {
        &self.auth
    }

    pub fn session(&self) -> Option<&Session> {
        self.auth.session()
    }

    pub fn theme(&self) -> ThemePreference {
        self.theme
    }

    /// The startup lookup has been issued.
    pub fn begin_resolve(&mut self) {
        if self.auth == AuthState::Uninitialized {
            self.auth = AuthState::Resolving;
        }
    }

    /// Result of the startup lookup. Ignored once the user has signed in or
    /// out in the meantime.
    pub fn resolved(&mut self, session: Option<Session>) {
        if !self.auth.is_pending() {
            log::debug!("Ignoring late session lookup result");
            return;
        }
        self.auth = match session {
            Some(session) => AuthState::Authenticated(session),
            None => AuthState::Anonymous,
        };
    }

    pub fn signed_in(&mut self, session: Session) {
        self.auth = AuthState::Authenticated(session);
    }

    pub fn signed_out(&mut self) {
        self.auth = AuthState::Anonymous;
    }

    /// Swap in a renewed session. Dropped unless the same user is still signed in.
    pub fn refreshed(&mut self, session: Session) -> bool {
        match &mut self.auth {
            AuthState::Authenticated(current) if current.owner_id() == session.owner_id() => {
                *current = session;
                true
            }
            _ => {
                log::debug!("Ignoring refreshed session for a signed-out user");
                false
            }
        }
    }

    /// The backend was switched. Returns the session issued by the old one and
    /// starts over so the new backend's stored session can be looked up.
    pub fn backend_changed(&mut self) -> Option<Session> {
        match std::mem::take(&mut self.auth) {
            AuthState::Authenticated(session) => Some(session),
            _ => None,
        }
    }

    /// Flip light/dark and return the new preference for persisting.
    pub fn toggle_theme(&mut self) -> ThemePreference {
        self.theme = self.theme.toggled();
        self.theme
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::sample_session;

    #[test]
    fn starts_pending() {
        let mut ctx = AppContext::new(ThemePreference::Dark);
        assert!(ctx.auth().is_pending());
        ctx.begin_resolve();
        assert_eq!(ctx.auth(), &AuthState::Resolving);
        assert!(ctx.auth().is_pending());
        assert!(ctx.session().is_none());
    }

    #[test]
    fn resolves_to_session_or_anonymous() {
        let mut ctx = AppContext::default();
        ctx.begin_resolve();
        ctx.resolved(Some(sample_session()));
        assert_eq!(ctx.session().map(|s| s.email()), Some("ada@example.com"));

        let mut ctx = AppContext::default();
        ctx.begin_resolve();
        ctx.resolved(None);
        assert_eq!(ctx.auth(), &AuthState::Anonymous);
    }

    #[test]
    fn late_lookup_does_not_override_sign_in() {
        let mut ctx = AppContext::default();
        ctx.begin_resolve();
        ctx.signed_in(sample_session());
        ctx.resolved(None);
        assert!(ctx.session().is_some());
    }

    #[test]
    fn sign_out_clears_session_but_keeps_theme() {
        let mut ctx = AppContext::new(ThemePreference::Light);
        ctx.signed_in(sample_session());
        assert_eq!(ctx.toggle_theme(), ThemePreference::Dark);
        ctx.signed_out();
        assert_eq!(ctx.auth(), &AuthState::Anonymous);
        assert_eq!(ctx.theme(), ThemePreference::Dark);
    }

    #[test]
    fn refreshed_session_replaces_tokens() {
        let mut ctx = AppContext::default();
        ctx.signed_in(sample_session());
        let renewed = Session {
            access_token: "renewed".into(),
            expires_at: Some(1_900_000_000),
            ..sample_session()
        };
        assert!(ctx.refreshed(renewed.clone()));
        assert_eq!(ctx.session(), Some(&renewed));
    }

    #[test]
    fn refresh_after_sign_out_is_dropped() {
        let mut ctx = AppContext::default();
        ctx.signed_in(sample_session());
        ctx.signed_out();
        assert!(!ctx.refreshed(sample_session()));
        assert_eq!(ctx.auth(), &AuthState::Anonymous);

        let mut ctx = AppContext::default();
        ctx.signed_in(sample_session());
        let stranger = Session {
            user: crate::remote::SessionUser {
                id: uuid::Uuid::new_v4(),
                email: None,
            },
            ..sample_session()
        };
        assert!(!ctx.refreshed(stranger));
        assert_eq!(ctx.session(), Some(&sample_session()));
    }

    #[test]
    fn backend_switch_hands_back_old_session_and_restarts_lookup() {
        let mut ctx = AppContext::new(ThemePreference::Dark);
        ctx.signed_in(sample_session());
        assert_eq!(ctx.backend_changed(), Some(sample_session()));
        assert!(ctx.auth().is_pending());
        assert_eq!(ctx.theme(), ThemePreference::Dark);

        // The new backend's stored session is accepted
        ctx.begin_resolve();
        ctx.resolved(Some(sample_session()));
        assert!(ctx.session().is_some());

        let mut ctx = AppContext::default();
        ctx.signed_out();
        assert_eq!(ctx.backend_changed(), None);
        ctx.begin_resolve();
        ctx.resolved(None);
        assert_eq!(ctx.auth(), &AuthState::Anonymous);
    }
}
