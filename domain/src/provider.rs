//! Authentication provider enumeration and availability reporting.
//!
//! A provider counts as available when the environment variable that
//! configures it is set to a non-empty value. Email/password login is
//! always available.

use serde::Serialize;
use service::config::Config;
use std::fmt;
use std::str::FromStr;

/// Authentication providers the gateway knows how to report on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Google,
    Github,
    Email,
    Phone,
    Magic,
}

impl Provider {
    /// Returns the provider identifier used in URLs and JSON keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Google => "google",
            Provider::Github => "github",
            Provider::Email => "email",
            Provider::Phone => "phone",
            Provider::Magic => "magic",
        }
    }

    /// Human-readable provider name for user-facing messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            Provider::Google => "Google",
            Provider::Github => "GitHub",
            Provider::Email => "Email",
            Provider::Phone => "Phone",
            Provider::Magic => "Magic Link",
        }
    }

    /// Whether the provider is configured via environment variables.
    pub fn is_configured(&self, config: &Config) -> bool {
        match self {
            Provider::Google => config.google_client_id().is_some(),
            Provider::Github => config.github_client_id().is_some(),
            Provider::Email => true,
            Provider::Phone => config.twilio_account_sid().is_some(),
            // Magic links ride on the Supabase email transport
            Provider::Magic => config.use_supabase_auth,
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct ProviderParseError;

impl FromStr for Provider {
    type Err = ProviderParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "google" => Ok(Provider::Google),
            "github" => Ok(Provider::Github),
            "email" => Ok(Provider::Email),
            "phone" => Ok(Provider::Phone),
            "magic" => Ok(Provider::Magic),
            _ => Err(ProviderParseError),
        }
    }
}

/// The provider availability map served by `GET /api/auth/providers`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AvailableProviders {
    pub google: bool,
    pub github: bool,
    pub email: bool,
    pub phone: bool,
}

impl AvailableProviders {
    pub fn from_config(config: &Config) -> Self {
        Self {
            google: Provider::Google.is_configured(config),
            github: Provider::Github.is_configured(config),
            email: true,
            phone: Provider::Phone.is_configured(config),
        }
    }
}
