//! Authentication Types
//!
//! Password/session authentication is delegated to the hosted backend; these
//! types model what this service keeps: the session handed back by the
//! backend and an explicit signed-in/signed-out state value.

use serde::{Deserialize, Serialize};

/// Login request from a client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// A session established with the hosted backend.
///
/// The access token scopes every store call to the owning user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Bearer token issued by the backend.
    pub token: String,
    /// Owning user id; store rows are scoped to it.
    pub user_id: String,
    pub email: String,
    /// Session expiry, unix seconds.
    pub expires_at: i64,
}

impl Session {
    pub fn is_expired(&self) -> bool {
        chrono::Utc::now().timestamp() >= self.expires_at
    }
}

/// Explicit authentication state threaded through handlers.
///
/// An absent session is an application state, not an error condition.
#[derive(Debug, Clone)]
pub enum SessionState {
    SignedOut,
    SignedIn(Session),
}

impl SessionState {
    pub fn session(&self) -> Option<&Session> {
        match self {
            SessionState::SignedIn(session) => Some(session),
            SessionState::SignedOut => None,
        }
    }
}

/// Response for a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub authenticated: bool,
    pub session_token: String,
    pub user_id: String,
    pub email: String,
    pub expires_at: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_state_exposes_session() {
        let session = Session {
            token: "tok".to_string(),
            user_id: "u-1".to_string(),
            email: "a@b.c".to_string(),
            expires_at: i64::MAX,
        };
        let state = SessionState::SignedIn(session);
        assert_eq!(state.session().unwrap().user_id, "u-1");
        assert!(SessionState::SignedOut.session().is_none());
    }

    #[test]
    fn test_auth_response_serializes_camel_case() {
        let response = AuthResponse {
            authenticated: true,
            session_token: "tok".to_string(),
            user_id: "u-1".to_string(),
            email: "a@b.c".to_string(),
            expires_at: 0,
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"sessionToken\":\"tok\""));
        assert!(json.contains("\"userId\":\"u-1\""));
    }
}
