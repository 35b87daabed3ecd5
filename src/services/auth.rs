//! Authentication Service
//!
//! Password verification is delegated to the hosted backend's token
//! endpoint; this service keeps the resulting sessions in an explicit map
//! and hands handlers an explicit `SessionState`, never a global singleton.

use crate::types::{Credentials, Session, SessionState};
use dashmap::DashMap;
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Authentication errors.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("No authenticated user")]
    Unauthenticated,

    #[error("Sign-in rejected: {0}")]
    Rejected(String),

    #[error("Auth backend error: {0}")]
    Backend(String),
}

impl From<reqwest::Error> for AuthError {
    fn from(e: reqwest::Error) -> Self {
        AuthError::Backend(e.to_string())
    }
}

/// Token response from the backend's password grant.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
    user: TokenUser,
}

#[derive(Debug, Deserialize)]
struct TokenUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

/// Error body the backend returns on a rejected grant.
#[derive(Debug, Deserialize)]
struct TokenError {
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    msg: Option<String>,
}

/// Session management backed by the hosted auth endpoint.
#[derive(Clone)]
pub struct AuthService {
    client: Client,
    base_url: String,
    api_key: String,
    /// Active sessions (token -> Session).
    sessions: Arc<DashMap<String, Session>>,
}

impl AuthService {
    /// Create a new auth service.
    pub fn new(base_url: String, api_key: String) -> Self {
        let client = Client::builder()
            .user_agent("journal/1.0")
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url,
            api_key,
            sessions: Arc::new(DashMap::new()),
        }
    }

    /// Exchange credentials for a session via the backend's password grant.
    pub async fn sign_in(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        let url = format!(
            "{}/auth/v1/token?grant_type=password",
            self.base_url.trim_end_matches('/')
        );

        let response = self
            .client
            .post(&url)
            .header("apikey", &self.api_key)
            .json(credentials)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let reason = response
                .json::<TokenError>()
                .await
                .ok()
                .and_then(|e| e.error_description.or(e.msg))
                .unwrap_or_else(|| status.to_string());
            warn!("Sign-in rejected for {}: {}", credentials.email, reason);
            return Err(AuthError::Rejected(reason));
        }

        let token: TokenResponse = response.json().await.map_err(AuthError::from)?;
        let session = Session {
            token: token.access_token,
            user_id: token.user.id,
            email: token.user.email.unwrap_or_else(|| credentials.email.clone()),
            expires_at: chrono::Utc::now().timestamp() + token.expires_in,
        };

        self.sessions.insert(session.token.clone(), session.clone());
        info!("Signed in {}", session.email);
        Ok(session)
    }

    /// Resolve the session state for a bearer token.
    ///
    /// Expired sessions are dropped and resolve to `SignedOut`.
    pub fn session_state(&self, token: Option<&str>) -> SessionState {
        let Some(token) = token else {
            return SessionState::SignedOut;
        };

        let expired = match self.sessions.get(token) {
            Some(entry) if !entry.is_expired() => return SessionState::SignedIn(entry.clone()),
            Some(_) => true,
            None => false,
        };

        if expired {
            self.sessions.remove(token);
            debug!("Dropped expired session");
        }
        SessionState::SignedOut
    }

    /// Invalidate a session token.
    pub fn sign_out(&self, token: &str) -> bool {
        self.sessions.remove(token).is_some()
    }

    /// Insert a session directly (tests and token refresh).
    pub fn install_session(&self, session: Session) {
        self.sessions.insert(session.token.clone(), session);
    }
}
