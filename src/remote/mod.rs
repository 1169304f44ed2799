//! Client for the hosted backend: GoTrue auth and the PostgREST `tasks` table.

pub mod auth;
pub mod keyring;
pub mod tasks;

use std::fmt;

use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::TaskFlowConfig;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RemoteError {
    #[error("backend URL and anon key are not configured")]
    NotConfigured,
    #[error("request failed: {0}")]
    Network(String),
    #[error("{message} (HTTP {status})")]
    Api { status: u16, message: String },
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error("keyring error: {0}")]
    Keyring(String),
    #[error("no matching row")]
    NotFound,
}

impl RemoteError {
    /// Text suitable for a notification. Backend messages are shown verbatim.
    pub fn user_message(&self) -> String {
        match self {
            Self::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for RemoteError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Decode(e.to_string())
        } else {
            Self::Network(e.to_string())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
}

/// Seconds before `expires_at` at which the access token is renewed.
pub const REFRESH_MARGIN_SECS: i64 = 60;

/// An authenticated session. Tokens are kept out of `Debug` output.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: SessionUser,
}

impl Session {
    pub fn owner_id(&self) -> Uuid {
        self.user.id
    }

    pub fn email(&self) -> &str {
        self.user.email.as_deref().unwrap_or("")
    }

    /// Whether the access token is expired or about to be at `now` (unix seconds).
    /// Sessions without an expiry are taken to be long-lived.
    pub fn needs_refresh(&self, now: i64) -> bool {
        self.expires_at
            .is_some_and(|expires_at| expires_at - now <= REFRESH_MARGIN_SECS)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("user", &self.user)
            .field("expires_at", &self.expires_at)
            .finish_non_exhaustive()
    }
}

/// Thin wrapper over `reqwest` for one backend project. Cheap to clone.
#[derive(Clone)]
pub struct SupabaseClient {
    base_url: String,
    anon_key: String,
    http: Client,
}

impl SupabaseClient {
    pub fn new(base_url: &str, anon_key: &str) -> Result<Self, RemoteError> {
        let base_url = base_url.trim().trim_end_matches('/');
        if base_url.is_empty() || anon_key.trim().is_empty() {
            return Err(RemoteError::NotConfigured);
        }
        let http = Client::builder()
            .build()
            .map_err(|e| RemoteError::Network(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            base_url: base_url.to_string(),
            anon_key: anon_key.trim().to_string(),
            http,
        })
    }

    pub fn from_config(config: &TaskFlowConfig) -> Result<Self, RemoteError> {
        if !config.backend_ready() {
            return Err(RemoteError::NotConfigured);
        }
        Self::new(&config.supabase_url, &config.supabase_anon_key)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }

    fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    /// Attach the project key, plus the user's token when there is a session.
    fn authorize(&self, req: RequestBuilder, session: Option<&Session>) -> RequestBuilder {
        let req = req.header("apikey", &self.anon_key);
        match session {
            Some(session) => req.bearer_auth(&session.access_token),
            None => req.bearer_auth(&self.anon_key),
        }
    }
}

/// Turn a non-2xx response into `RemoteError::Api` carrying the backend's message.
async fn ensure_success(resp: Response) -> Result<Response, RemoteError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    let message = error_message(&body).unwrap_or_else(|| status.to_string());
    Err(RemoteError::Api {
        status: status.as_u16(),
        message,
    })
}

/// GoTrue and PostgREST disagree on the error key; take the first that is present.
pub(crate) fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["msg", "error_description", "message", "error"]
        .iter()
        .find_map(|key| value.get(*key).and_then(|v| v.as_str()))
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
pub(crate) fn sample_session() -> Session {
    Session {
        access_token: "access-secret".into(),
        refresh_token: "refresh-secret".into(),
        expires_at: Some(1_800_000_000),
        user: SessionUser {
            id: Uuid::parse_str("0b9f5e0a-3c1d-4e55-8a0f-1f2e3d4c5b6a").unwrap(),
            email: Some("ada@example.com".into()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_gotrue_msg() {
        let body = r#"{"code":400,"error_code":"invalid_credentials","msg":"Invalid login credentials"}"#;
        assert_eq!(error_message(body).as_deref(), Some("Invalid login credentials"));
    }

    #[test]
    fn picks_error_description_before_error() {
        let body = r#"{"error":"invalid_grant","error_description":"Email not confirmed"}"#;
        assert_eq!(error_message(body).as_deref(), Some("Email not confirmed"));
    }

    #[test]
    fn picks_postgrest_message() {
        let body = r#"{"code":"22P02","details":null,"hint":null,"message":"invalid input syntax for type uuid"}"#;
        assert_eq!(
            error_message(body).as_deref(),
            Some("invalid input syntax for type uuid")
        );
    }

    #[test]
    fn non_json_body_has_no_message() {
        assert_eq!(error_message("<html>502</html>"), None);
        assert_eq!(error_message(""), None);
    }

    #[test]
    fn debug_hides_tokens() {
        let rendered = format!("{:?}", sample_session());
        assert!(rendered.contains("ada@example.com"));
        assert!(!rendered.contains("access-secret"));
        assert!(!rendered.contains("refresh-secret"));
    }

    #[test]
    fn refresh_is_due_inside_margin() {
        let session = sample_session();
        let expires_at = session.expires_at.unwrap();
        assert!(!session.needs_refresh(expires_at - 3600));
        assert!(!session.needs_refresh(expires_at - REFRESH_MARGIN_SECS - 1));
        assert!(session.needs_refresh(expires_at - REFRESH_MARGIN_SECS));
        assert!(session.needs_refresh(expires_at + 10));
    }

    #[test]
    fn session_without_expiry_is_kept() {
        let session = Session {
            expires_at: None,
            ..sample_session()
        };
        assert!(!session.needs_refresh(i64::MAX));
    }

    #[test]
    fn client_requires_url_and_key() {
        assert_eq!(
            SupabaseClient::new("", "key").err(),
            Some(RemoteError::NotConfigured)
        );
        let client = SupabaseClient::new("https://abc.supabase.co/", "key").unwrap();
        assert_eq!(client.base_url(), "https://abc.supabase.co");
        assert_eq!(client.rest_url("tasks"), "https://abc.supabase.co/rest/v1/tasks");
        assert_eq!(client.auth_url("logout"), "https://abc.supabase.co/auth/v1/logout");
    }

    #[test]
    fn api_errors_show_backend_text() {
        let err = RemoteError::Api {
            status: 400,
            message: "User already registered".into(),
        };
        assert_eq!(err.user_message(), "User already registered");
        assert_eq!(err.to_string(), "User already registered (HTTP 400)");
    }
}
