//! Controller for Supabase-facing reporting endpoints: the project
//! coordinates the frontend SDK boots from, the service-level provider map,
//! and a pass-through of the project's public auth settings.

use crate::controller::ApiResponse;
use crate::params::auth::SupabaseConfigResponse;
use crate::{AppState, Error};

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use domain::error::Error as DomainError;
use domain::SupabaseService;

/// GET Supabase project configuration
#[utoipa::path(
    get,
    path = "/api/auth/supabase/config",
    responses(
        (status = 200, description = "Supabase project URL, anon key and callback URL", body = SupabaseConfigResponse),
    )
)]
pub async fn config(State(app_state): State<AppState>) -> impl IntoResponse {
    let project = SupabaseService::project_config(&app_state.config);
    Json(ApiResponse::new(SupabaseConfigResponse::from(project)))
}

/// GET provider availability as seen through the Supabase service
#[utoipa::path(
    get,
    path = "/api/auth/supabase/providers",
    responses(
        (status = 200, description = "Supabase-mode provider map, or {\"native\":true} when disabled"),
    )
)]
pub async fn providers(State(app_state): State<AppState>) -> impl IntoResponse {
    let providers = app_state.supabase_ref().providers(&app_state.config);
    Json(ApiResponse::new(providers))
}

/// GET the Supabase project's public auth settings
///
/// Proxies `GET {SUPABASE_URL}/auth/v1/settings` unchanged. Answers 503 when
/// the Supabase service is disabled.
#[utoipa::path(
    get,
    path = "/api/auth/supabase/settings",
    responses(
        (status = 200, description = "Pass-through of the Supabase auth settings payload"),
        (status = 502, description = "Supabase unreachable"),
        (status = 503, description = "Supabase service is disabled"),
    )
)]
pub async fn settings(State(app_state): State<AppState>) -> Result<impl IntoResponse, Error> {
    let client = app_state
        .supabase_ref()
        .client()
        .ok_or_else(DomainError::config)?;

    let settings = client.auth_settings().await?;
    Ok(Json(ApiResponse::new(settings)))
}
