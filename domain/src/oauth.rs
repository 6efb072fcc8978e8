//! OAuth entrypoint URL building.
//!
//! The gateway never exchanges authorization codes or handles tokens; it
//! only knows how to send a browser to the Supabase authorize endpoint for
//! a configured provider.

use crate::provider::Provider;
use crate::supabase::SupabaseService;
use log::*;
use service::config::Config;

/// Build the Supabase authorize URL for an OAuth provider.
///
/// Returns `None` when the Supabase service is disabled, the provider has no
/// client ID configured, or the provider has no OAuth flow at all; callers
/// then fall back to the stub response.
pub fn authorize_url(
    config: &Config,
    supabase: &SupabaseService,
    provider: Provider,
) -> Option<String> {
    if !supabase.is_enabled() {
        return None;
    }

    let configured = match provider {
        Provider::Google => config.google_client_id().is_some(),
        Provider::Github => config.github_client_id().is_some(),
        // Email, phone and magic-link logins have no authorize redirect
        _ => return None,
    };
    if !configured {
        debug!("{} OAuth requested but no client ID is configured", provider);
        return None;
    }

    let base_url = config.supabase_url()?;
    let mut url = format!("{base_url}/auth/v1/authorize?provider={provider}");
    if let Some(redirect) = config.oauth_redirect_url() {
        url.push_str("&redirect_to=");
        url.push_str(&urlencoding::encode(&redirect));
    }

    info!("Redirecting to {} OAuth via Supabase", provider.display_name());
    Some(url)
}
