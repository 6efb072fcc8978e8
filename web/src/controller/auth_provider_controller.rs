//! Controller reporting which authentication providers are configured.

use crate::controller::ApiResponse;
use crate::params::auth::AuthProvidersResponse;
use crate::AppState;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use domain::AvailableProviders;

/// GET available authentication providers
///
/// Availability is derived from environment variables at request time;
/// nothing is probed over the network.
#[utoipa::path(
    get,
    path = "/api/auth/providers",
    responses(
        (status = 200, description = "Provider availability map", body = AuthProvidersResponse),
    )
)]
pub async fn index(State(app_state): State<AppState>) -> impl IntoResponse {
    let providers = AvailableProviders::from_config(&app_state.config);
    Json(ApiResponse::new(AuthProvidersResponse::from(providers)))
}
