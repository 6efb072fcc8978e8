//! Authentication backend status reporting.

use serde::Serialize;
use service::config::Config;

/// Which authentication backend(s) the deployment is running, as served by
/// `GET /api/auth/status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AuthStatus {
    /// Whether authentication is routed through Supabase.
    pub supabase_enabled: bool,
    /// Whether native and Supabase authentication run side by side.
    pub hybrid_mode: bool,
}

impl AuthStatus {
    pub fn from_config(config: &Config) -> Self {
        Self {
            supabase_enabled: config.use_supabase_auth,
            hybrid_mode: config.hybrid_mode,
        }
    }
}
