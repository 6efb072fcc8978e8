//! Response shapes for the auth reporting endpoints.

use domain::{AuthStatus, AvailableProviders, SupabaseProjectConfig};
use serde::Serialize;
use utoipa::ToSchema;

/// Response for `GET /api/auth/providers`
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthProvidersResponse {
    /// Whether Google OAuth login is configured
    pub google: bool,
    /// Whether GitHub OAuth login is configured
    pub github: bool,
    /// Email/password login, always available
    pub email: bool,
    /// Whether phone (Twilio) login is configured
    pub phone: bool,
}

impl From<AvailableProviders> for AuthProvidersResponse {
    fn from(providers: AvailableProviders) -> Self {
        Self {
            google: providers.google,
            github: providers.github,
            email: providers.email,
            phone: providers.phone,
        }
    }
}

/// Response for `GET /api/auth/status`
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthStatusResponse {
    /// Whether authentication is routed through Supabase
    pub supabase_enabled: bool,
    /// Whether native and Supabase authentication run side by side
    pub hybrid_mode: bool,
}

impl From<AuthStatus> for AuthStatusResponse {
    fn from(status: AuthStatus) -> Self {
        Self {
            supabase_enabled: status.supabase_enabled,
            hybrid_mode: status.hybrid_mode,
        }
    }
}

/// Response for `GET /api/auth/supabase/config` (frontend SDK bootstrap data,
/// anon key only — never a service key)
#[derive(Debug, Serialize, ToSchema)]
pub struct SupabaseConfigResponse {
    /// The Supabase project URL
    pub url: Option<String>,
    /// The Supabase anon (publishable) API key
    pub key: Option<String>,
    /// The OAuth callback URL registered with the project
    pub callback: Option<String>,
}

impl From<SupabaseProjectConfig> for SupabaseConfigResponse {
    fn from(project: SupabaseProjectConfig) -> Self {
        Self {
            url: project.url,
            key: project.key,
            callback: project.callback,
        }
    }
}
