use serde::Serialize;

use super::{RemoteError, Session, SupabaseClient, ensure_success, keyring};

#[derive(Serialize)]
struct PasswordGrant<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RefreshGrant<'a> {
    refresh_token: &'a str,
}

impl SupabaseClient {
    /// Register a new account. `Ok(None)` means the project requires e-mail
    /// confirmation before a session is issued.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<Option<Session>, RemoteError> {
        let req = self
            .http
            .post(self.auth_url("signup"))
            .json(&PasswordGrant { email, password });
        let resp = ensure_success(self.authorize(req, None).send().await?).await?;
        let body: serde_json::Value = resp.json().await?;
        let session = parse_sign_up(body)?;
        if let Some(ref session) = session {
            self.persist(session).await;
        }
        Ok(session)
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, RemoteError> {
        let req = self
            .http
            .post(self.auth_url("token"))
            .query(&[("grant_type", "password")])
            .json(&PasswordGrant { email, password });
        let resp = ensure_success(self.authorize(req, None).send().await?).await?;
        let session: Session = resp.json().await?;
        log::info!("Signed in as {}", session.owner_id());
        self.persist(&session).await;
        Ok(session)
    }

    pub async fn refresh_session(&self, refresh_token: &str) -> Result<Session, RemoteError> {
        let req = self
            .http
            .post(self.auth_url("token"))
            .query(&[("grant_type", "refresh_token")])
            .json(&RefreshGrant { refresh_token });
        let resp = ensure_success(self.authorize(req, None).send().await?).await?;
        Ok(resp.json().await?)
    }

    /// Return `session`, renewed first when its access token is about to expire.
    /// A renewed session replaces the stored refresh token.
    pub async fn fresh_session(&self, session: &Session) -> Result<Session, RemoteError> {
        if !session.needs_refresh(chrono::Utc::now().timestamp()) {
            return Ok(session.clone());
        }
        log::debug!("Access token for {} is expiring, refreshing", session.owner_id());
        let fresh = self.refresh_session(&session.refresh_token).await?;
        self.persist(&fresh).await;
        Ok(fresh)
    }

    /// Revoke the session server-side, then forget the stored refresh token.
    ///
    /// A session the backend no longer recognizes counts as signed out.
    pub async fn sign_out(&self, session: &Session) -> Result<(), RemoteError> {
        let req = self.http.post(self.auth_url("logout"));
        let result = ensure_success(self.authorize(req, Some(session)).send().await?).await;
        logout_outcome(result.map(drop))?;
        self.forget_session().await;
        Ok(())
    }

    /// Drop the refresh token stored for this backend.
    pub async fn forget_session(&self) {
        if let Err(e) = keyring::forget_refresh_token(&self.base_url).await {
            log::warn!("Could not clear stored session: {}", e);
        }
    }

    /// Restore the session left by a previous run.
    ///
    /// A stored token the backend rejects is discarded and reported as no
    /// session; transport failures are returned so the caller can tell the user.
    pub async fn get_session(&self) -> Result<Option<Session>, RemoteError> {
        let Some(refresh_token) = keyring::load_refresh_token(&self.base_url).await? else {
            return Ok(None);
        };

        match self.refresh_session(&refresh_token).await {
            Ok(session) => {
                log::info!("Restored session for {}", session.owner_id());
                self.persist(&session).await;
                Ok(Some(session))
            }
            Err(RemoteError::Api { status, message }) => {
                log::warn!("Stored session rejected ({}): {}", status, message);
                self.forget_session().await;
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn persist(&self, session: &Session) {
        if let Err(e) = keyring::store_refresh_token(&self.base_url, &session.refresh_token).await {
            // The session still works for this run; it just won't survive a restart.
            log::warn!("Failed to store session: {}", e);
        }
    }
}

/// Logout answers 401/403/404 once the token is expired or already revoked.
pub(crate) fn logout_outcome(result: Result<(), RemoteError>) -> Result<(), RemoteError> {
    match result {
        Err(RemoteError::Api { status: 401 | 403 | 404, message }) => {
            log::info!("Session already gone on the backend: {}", message);
            Ok(())
        }
        other => other,
    }
}

/// Sign-up answers with a session when auto-confirm is on and with a bare user otherwise.
pub(crate) fn parse_sign_up(body: serde_json::Value) -> Result<Option<Session>, RemoteError> {
    if body.get("access_token").is_none() {
        return Ok(None);
    }
    serde_json::from_value(body)
        .map(Some)
        .map_err(|e| RemoteError::Decode(format!("sign-up session: {}", e)))
}
