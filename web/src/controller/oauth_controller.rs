//! Controller for the OAuth entrypoint endpoints.
//!
//! When Supabase is enabled and the provider has a client ID configured the
//! browser is redirected to the Supabase authorize URL. Otherwise the
//! endpoint answers with a stub payload so the frontend can tell the flow is
//! not wired up. No code or token exchange happens here.
//!
//! Note: these endpoints are called via browser navigation, so they carry no
//! custom headers and sit behind the critical rate limit instead.

use crate::controller::ApiResponse;
use crate::AppState;

use axum::extract::State;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;

use domain::Provider;

/// GET Google OAuth entrypoint
#[utoipa::path(
    get,
    path = "/api/auth/oauth/google",
    responses(
        (status = 307, description = "Redirect to the Supabase authorize URL"),
        (status = 200, description = "Google OAuth is not configured; stub response"),
        (status = 429, description = "Too many requests"),
    )
)]
pub async fn google(State(app_state): State<AppState>) -> impl IntoResponse {
    oauth_entry(&app_state, Provider::Google)
}

/// GET GitHub OAuth entrypoint
#[utoipa::path(
    get,
    path = "/api/auth/oauth/github",
    responses(
        (status = 307, description = "Redirect to the Supabase authorize URL"),
        (status = 200, description = "GitHub OAuth is not configured; stub response"),
        (status = 429, description = "Too many requests"),
    )
)]
pub async fn github(State(app_state): State<AppState>) -> impl IntoResponse {
    oauth_entry(&app_state, Provider::Github)
}

fn oauth_entry(app_state: &AppState, provider: Provider) -> Response {
    match domain::oauth::authorize_url(&app_state.config, app_state.supabase_ref(), provider) {
        Some(url) => Redirect::temporary(&url).into_response(),
        None => Json(ApiResponse::<()>::message(format!(
            "{} OAuth endpoint",
            provider.display_name()
        )))
        .into_response(),
    }
}
