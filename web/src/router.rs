use crate::controller::{
    auth_provider_controller, auth_status_controller, health_check_controller, oauth_controller,
    supabase_controller,
};
use crate::middleware::rate_limit::{critical_rate_limit, RateLimiter};
use crate::{params, AppState};

use axum::http::{header, HeaderValue, Method};
use axum::middleware::from_fn_with_state;
use axum::routing::get;
use axum::Router;
use log::*;
use tower_http::cors::CorsLayer;

use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;

// This is the global definition of our OpenAPI spec. To be a part
// of the rendered spec, a path and schema must be listed here.
#[derive(OpenApi)]
#[openapi(
        info(
            title = "Supabase Auth Gateway API"
        ),
        paths(
            auth_provider_controller::index,
            auth_status_controller::read,
            oauth_controller::google,
            oauth_controller::github,
            supabase_controller::config,
            supabase_controller::providers,
            supabase_controller::settings,
            health_check_controller::health_check,
        ),
        components(
            schemas(
                params::auth::AuthProvidersResponse,
                params::auth::AuthStatusResponse,
                params::auth::SupabaseConfigResponse,
            )
        ),
        tags(
            (name = "supabase_auth_gateway", description = "Authentication configuration reporting API")
        )
    )]
struct ApiDoc;

pub fn define_routes(app_state: AppState) -> Router {
    Router::new()
        .merge(health_routes())
        .merge(auth_provider_routes(app_state.clone()))
        .merge(auth_status_routes(app_state.clone()))
        .merge(oauth_routes(app_state.clone()))
        .merge(supabase_routes(app_state.clone()))
        .merge(RapiDoc::with_openapi("/api-docs/openapi.json", ApiDoc::openapi()).path("/rapidoc"))
        .layer(cors_layer(&app_state))
}

fn health_routes() -> Router {
    Router::new().route("/health", get(health_check_controller::health_check))
}

fn auth_provider_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/api/auth/providers", get(auth_provider_controller::index))
        .with_state(app_state)
}

fn auth_status_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/api/auth/status", get(auth_status_controller::read))
        .with_state(app_state)
}

fn oauth_routes(app_state: AppState) -> Router {
    // OAuth entrypoints are bot bait, so they sit behind the critical rate limit
    let limiter = RateLimiter::from_config(&app_state.config);
    Router::new()
        .route("/api/auth/oauth/google", get(oauth_controller::google))
        .route("/api/auth/oauth/github", get(oauth_controller::github))
        .route_layer(from_fn_with_state(limiter, critical_rate_limit))
        .with_state(app_state)
}

fn supabase_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/api/auth/supabase/config", get(supabase_controller::config))
        .route(
            "/api/auth/supabase/providers",
            get(supabase_controller::providers),
        )
        .route(
            "/api/auth/supabase/settings",
            get(supabase_controller::settings),
        )
        .with_state(app_state)
}

fn cors_layer(app_state: &AppState) -> CorsLayer {
    let origins: Vec<HeaderValue> = app_state
        .config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(origin) => Some(origin),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {origin}");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use clap::Parser;
    use domain::SupabaseService;
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use service::config::Config;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_app(args: &[&str]) -> Router {
        let config = Config::parse_from([&["supabase_auth_gateway"][..], args].concat());
        let supabase = Arc::new(SupabaseService::new(&config).unwrap());
        define_routes(AppState::new(config, &supabase))
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_health_check() {
        let response = test_app(&[])
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"healthy");
    }

    #[tokio::test]
    async fn test_providers_with_nothing_configured() {
        let (status, body) = get_json(test_app(&[]), "/api/auth/providers").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "success": true,
                "data": {"google": false, "github": false, "email": true, "phone": false}
            })
        );
    }

    #[tokio::test]
    async fn test_providers_reflect_configuration() {
        let app = test_app(&[
            "--google-client-id",
            "google-id",
            "--twilio-account-sid",
            "AC123",
        ]);
        let (status, body) = get_json(app, "/api/auth/providers").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "success": true,
                "data": {"google": true, "github": false, "email": true, "phone": true}
            })
        );
    }

    #[tokio::test]
    async fn test_status_reports_backend_flags() {
        let app = test_app(&["--use-supabase-auth", "true", "--hybrid-mode", "true"]);
        let (status, body) = get_json(app, "/api/auth/status").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "success": true,
                "data": {"supabase_enabled": true, "hybrid_mode": true}
            })
        );
    }

    #[tokio::test]
    async fn test_oauth_stub_when_unconfigured() {
        let (status, body) = get_json(test_app(&[]), "/api/auth/oauth/google").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"success": true, "message": "Google OAuth endpoint"})
        );

        let (status, body) = get_json(test_app(&[]), "/api/auth/oauth/github").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"success": true, "message": "GitHub OAuth endpoint"})
        );
    }

    #[tokio::test]
    async fn test_oauth_redirects_when_configured() {
        let app = test_app(&[
            "--use-supabase-auth",
            "true",
            "--supabase-url",
            "https://myproject.supabase.co",
            "--supabase-key",
            "anon-key",
            "--google-client-id",
            "google-id",
        ]);
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/auth/oauth/google")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "https://myproject.supabase.co/auth/v1/authorize?provider=google"
        );
    }

    #[tokio::test]
    async fn test_supabase_config_exposes_project_coordinates() {
        let app = test_app(&[
            "--supabase-url",
            "https://myproject.supabase.co",
            "--supabase-key",
            "anon-key",
        ]);
        let (status, body) = get_json(app, "/api/auth/supabase/config").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "success": true,
                "data": {
                    "url": "https://myproject.supabase.co",
                    "key": "anon-key",
                    "callback": "https://myproject.supabase.co/auth/v1/callback"
                }
            })
        );
    }

    #[tokio::test]
    async fn test_supabase_providers_fall_back_to_native() {
        let (status, body) = get_json(test_app(&[]), "/api/auth/supabase/providers").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"success": true, "data": {"native": true}}));
    }

    #[tokio::test]
    async fn test_supabase_settings_unavailable_when_disabled() {
        let (status, body) = get_json(test_app(&[]), "/api/auth/supabase/settings").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let response = test_app(&[])
            .oneshot(
                Request::builder()
                    .uri("/api/auth/nope")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_oauth_routes_are_rate_limited() {
        let app = test_app(&["--critical-rate-limit-requests", "2"]);

        for _ in 0..2 {
            let response = app
                .clone()
                .oneshot(
                    Request::builder()
                        .uri("/api/auth/oauth/google")
                        .header("x-forwarded-for", "203.0.113.9")
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/auth/oauth/google")
                    .header("x-forwarded-for", "203.0.113.9")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }
}
