//! Authentication API
//!
//! Endpoints for the session/password flow delegated to the hosted backend:
//! - POST /api/auth/login - Exchange credentials for a session
//! - GET /api/auth/me - Current session details (requires auth)
//! - POST /api/auth/logout - Invalidate the current session

use axum::{
    extract::{FromRequestParts, State},
    http::{request::Parts, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use crate::api::ApiResponse;
use crate::services::AuthError;
use crate::types::{AuthResponse, Credentials, Session, SessionState};
use crate::AppState;

/// Create auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/me", get(get_me))
        .route("/logout", post(logout))
}

/// Convert AuthError to an HTTP response.
impl IntoResponse for AuthError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            AuthError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AuthError::Rejected(_) => StatusCode::UNAUTHORIZED,
            AuthError::Backend(_) => StatusCode::BAD_GATEWAY,
        };

        let body = Json(serde_json::json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}

/// POST /api/auth/login
async fn login(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<ApiResponse<AuthResponse>>, AuthError> {
    let session = state.auth_service.sign_in(&credentials).await?;

    let response = AuthResponse {
        authenticated: true,
        session_token: session.token.clone(),
        user_id: session.user_id,
        email: session.email,
        expires_at: session.expires_at,
    };

    Ok(Json(ApiResponse { data: response }))
}

/// GET /api/auth/me
async fn get_me(auth: Authenticated) -> Json<ApiResponse<Session>> {
    Json(ApiResponse { data: auth.session })
}

/// POST /api/auth/logout
async fn logout(
    State(state): State<AppState>,
    auth: Authenticated,
) -> Json<ApiResponse<LogoutResponse>> {
    let removed = state.auth_service.sign_out(&auth.session.token);
    Json(ApiResponse {
        data: LogoutResponse { success: removed },
    })
}

/// Logout response.
#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub success: bool,
}

/// Authenticated session extractor.
///
/// Handlers take `auth: Authenticated` to require a signed-in session; an
/// absent or expired session rejects with "No authenticated user".
pub struct Authenticated {
    pub session: Session,
}

#[axum::async_trait]
impl FromRequestParts<AppState> for Authenticated {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "));

        match state.auth_service.session_state(token) {
            SessionState::SignedIn(session) => Ok(Authenticated { session }),
            SessionState::SignedOut => Err(AuthError::Unauthenticated),
        }
    }
}
