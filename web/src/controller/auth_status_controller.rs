//! Controller reporting which authentication backend the deployment runs.

use crate::controller::ApiResponse;
use crate::params::auth::AuthStatusResponse;
use crate::AppState;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use domain::AuthStatus;

/// GET current authentication backend status
#[utoipa::path(
    get,
    path = "/api/auth/status",
    responses(
        (status = 200, description = "Authentication backend status", body = AuthStatusResponse),
    )
)]
pub async fn read(State(app_state): State<AppState>) -> impl IntoResponse {
    let status = AuthStatus::from_config(&app_state.config);
    Json(ApiResponse::new(AuthStatusResponse::from(status)))
}
