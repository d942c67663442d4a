use axum::{
    Json,
    extract::{Request, State},
    http::{HeaderMap, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tower_sessions::Session;

use super::{ApiError, ApiResponse, AppState, LoginRequest, LoginResponse, MessageResponse};
use crate::constants::auth::{SESSION_USER_KEY, UNKNOWN_USER_AGENT};
use crate::models::user::{LoginEvent, NewUser, User};

// ============================================================================
// Middleware
// ============================================================================

/// Rejects requests without a logged-in session user.
pub async fn require_login(
    session: Session,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    session_user(&session).await?;
    Ok(next.run(request).await)
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /register
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewUser>,
) -> Result<(StatusCode, Json<ApiResponse<MessageResponse>>), ApiError> {
    let user_name = payload.user_name.clone();
    state.credentials.register_user(payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(MessageResponse::new(format!(
            "User {user_name} registered"
        )))),
    ))
}

/// POST /login
/// Verifies credentials, records the login and stores the user in the session.
pub async fn login(
    State(state): State<Arc<AppState>>,
    session: Session,
    headers: HeaderMap,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    if payload.user_name.is_empty() {
        return Err(ApiError::validation("User name is required"));
    }
    if payload.password.is_empty() {
        return Err(ApiError::validation("Password is required"));
    }

    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or(UNKNOWN_USER_AGENT);

    let user = state
        .credentials
        .check_user(&payload.user_name, &payload.password, user_agent)
        .await?;

    session
        .cycle_id()
        .await
        .map_err(|e| ApiError::internal(format!("Failed to create session: {e}")))?;
    session
        .insert(SESSION_USER_KEY, &user)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to create session: {e}")))?;

    tracing::info!(user_name = %user.user_name, "User logged in");

    Ok(Json(ApiResponse::success(LoginResponse {
        user_name: user.user_name,
        email: user.email,
        login_history: user.login_history,
    })))
}

/// POST /logout
pub async fn logout(session: Session) -> impl IntoResponse {
    let _ = session.flush().await;
    (StatusCode::OK, "Logged out")
}

/// GET /user/history
/// Login history as of the current session's login.
pub async fn login_history(
    session: Session,
) -> Result<Json<ApiResponse<Vec<LoginEvent>>>, ApiError> {
    let user = session_user(&session).await?;
    Ok(Json(ApiResponse::success(user.login_history)))
}

// ============================================================================
// Helpers
// ============================================================================

async fn session_user(session: &Session) -> Result<User, ApiError> {
    session
        .get::<User>(SESSION_USER_KEY)
        .await
        .map_err(|e| ApiError::internal(format!("Session error: {e}")))?
        .ok_or_else(|| ApiError::Unauthorized("Not authenticated".to_string()))
}
