use super::state::AppState;
use crate::analytics::{ACTION_QUICK_TILE_LAUNCHED, ACTION_SHORTCUT_LAUNCHED, CATEGORY_SHORTCUT};
use crate::capture::{CaptureGrant, CaptureToken};
use crate::error::ServiceError;
use crate::service::StartDisposition;
use crate::session::SessionState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use uuid::Uuid;

// ============================================================================
// Request/Response Types
// ============================================================================

/// The capture-permission result, forwarded by the launch surface.
#[derive(Debug, Deserialize)]
pub struct LaunchRequest {
    pub result_code: i32,

    /// Opaque capture token issued by the permission flow.
    pub data: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LaunchResponse {
    pub status: String,

    /// Restart policy for the host: always "not-sticky".
    pub disposition: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<Uuid>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings_uri: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct IdleResponse {
    pub state: SessionState,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /capture/shortcut
/// Launch a recording from the home-screen shortcut
pub async fn shortcut_launch(
    State(state): State<AppState>,
    Json(req): Json<LaunchRequest>,
) -> impl IntoResponse {
    launch(state, ACTION_SHORTCUT_LAUNCHED, req).await
}

/// POST /capture/quick-tile
/// Launch a recording from the quick-settings tile
pub async fn quick_tile_launch(
    State(state): State<AppState>,
    Json(req): Json<LaunchRequest>,
) -> impl IntoResponse {
    launch(state, ACTION_QUICK_TILE_LAUNCHED, req).await
}

async fn launch(state: AppState, action: &str, req: LaunchRequest) -> axum::response::Response {
    // Overlay draw permission comes first; without it the user is redirected
    // to the grant screen and nothing else happens.
    if let Err(e) = state.overlay_permission.check() {
        info!("{}", e);
        let settings_uri = state.overlay_permission.settings_uri();
        return (
            StatusCode::FORBIDDEN,
            Json(LaunchResponse {
                status: "overlay-permission-required".to_string(),
                disposition: StartDisposition::NotSticky.as_str().to_string(),
                session_id: None,
                settings_uri: Some(settings_uri),
            }),
        )
            .into_response();
    }

    state.analytics.send(CATEGORY_SHORTCUT, action);

    let grant = CaptureGrant::new(req.result_code, req.data.map(CaptureToken::new));

    match state.service.handle_start_request(grant).await {
        Ok(session_id) => (
            StatusCode::OK,
            Json(LaunchResponse {
                status: "starting".to_string(),
                disposition: StartDisposition::NotSticky.as_str().to_string(),
                session_id: Some(session_id),
                settings_uri: None,
            }),
        )
            .into_response(),
        // Duplicate triggers are expected; not an error for the caller.
        Err(ServiceError::SessionBusy) => (
            StatusCode::OK,
            Json(LaunchResponse {
                status: "busy".to_string(),
                disposition: StartDisposition::NotSticky.as_str().to_string(),
                session_id: None,
                settings_uri: None,
            }),
        )
            .into_response(),
        Err(e @ ServiceError::ConfigurationMissing) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse { error: e.to_string() }),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to start session: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse { error: e.to_string() }),
            )
                .into_response()
        }
    }
}

/// POST /capture/confirm
/// The overlay's user-start callback
pub async fn confirm_capture(State(state): State<AppState>) -> impl IntoResponse {
    if state.service.confirm().await {
        (StatusCode::OK, "OK").into_response()
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "No active recording session".to_string(),
            }),
        )
            .into_response()
    }
}

/// POST /capture/stop
/// Stop or cancel the active recording
pub async fn stop_capture(State(state): State<AppState>) -> impl IntoResponse {
    if state.service.stop().await {
        (StatusCode::OK, "OK").into_response()
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "No active recording session".to_string(),
            }),
        )
            .into_response()
    }
}

/// GET /capture/status
/// State and stats of the active session, or idle
pub async fn capture_status(State(state): State<AppState>) -> impl IntoResponse {
    match state.service.stats() {
        Some(stats) => (StatusCode::OK, Json(stats)).into_response(),
        None => (
            StatusCode::OK,
            Json(IdleResponse {
                state: SessionState::Idle,
            }),
        )
            .into_response(),
    }
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
