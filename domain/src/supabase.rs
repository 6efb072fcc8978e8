//! Supabase service wrapper.
//!
//! Wires a [`SupabaseClient`] when `USE_SUPABASE_AUTH` is `"true"` and both
//! `SUPABASE_URL` and `SUPABASE_KEY` are set; otherwise the service exists
//! in a disabled state and the gateway keeps reporting native auth only.

use crate::error::Error;
use crate::gateway::supabase::SupabaseClient;
use log::*;
use serde::Serialize;
use service::config::Config;

pub struct SupabaseService {
    client: Option<SupabaseClient>,
    enabled: bool,
}

/// The provider map as seen through the Supabase service. A disabled service
/// offers only the native database-backed login; an enabled one reports the
/// Supabase login methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SupabaseProviders {
    Native {
        native: bool,
    },
    Supabase {
        google: bool,
        github: bool,
        email: bool,
        magic: bool,
    },
}

/// Public project coordinates the frontend needs to bootstrap the Supabase SDK.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SupabaseProjectConfig {
    pub url: Option<String>,
    pub key: Option<String>,
    pub callback: Option<String>,
}

impl SupabaseService {
    /// Create the service from configuration. A missing URL or key downgrades
    /// the service to disabled; only client construction itself can fail.
    pub fn new(config: &Config) -> Result<Self, Error> {
        if !config.use_supabase_auth {
            return Ok(Self {
                client: None,
                enabled: false,
            });
        }

        let (url, key) = match (config.supabase_url(), config.supabase_key()) {
            (Some(url), Some(key)) => (url, key),
            _ => {
                warn!("USE_SUPABASE_AUTH is set but SUPABASE_URL or SUPABASE_KEY is missing; Supabase auth stays disabled");
                return Ok(Self {
                    client: None,
                    enabled: false,
                });
            }
        };

        let client = SupabaseClient::new(url, &key, config)?;

        Ok(Self {
            client: Some(client),
            enabled: true,
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn client(&self) -> Option<&SupabaseClient> {
        self.client.as_ref()
    }

    /// Provider availability as seen through the Supabase service.
    pub fn providers(&self, config: &Config) -> SupabaseProviders {
        if !self.enabled {
            return SupabaseProviders::Native { native: true };
        }

        SupabaseProviders::Supabase {
            google: config.google_client_id().is_some(),
            github: config.github_client_id().is_some(),
            email: true,
            magic: true,
        }
    }

    pub fn project_config(config: &Config) -> SupabaseProjectConfig {
        SupabaseProjectConfig {
            url: config.supabase_url(),
            key: config.supabase_key(),
            callback: config.supabase_callback_url(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn config(args: &[&str]) -> Config {
        Config::parse_from([&["supabase_auth_gateway"][..], args].concat())
    }

    #[test]
    fn test_disabled_without_flag() {
        let service = SupabaseService::new(&config(&[
            "--supabase-url",
            "https://myproject.supabase.co",
            "--supabase-key",
            "anon-key",
        ]))
        .unwrap();
        assert!(!service.is_enabled());
        assert!(service.client().is_none());
    }

    #[test]
    fn test_disabled_when_url_or_key_missing() {
        let service = SupabaseService::new(&config(&["--use-supabase-auth", "true"])).unwrap();
        assert!(!service.is_enabled());

        let service = SupabaseService::new(&config(&[
            "--use-supabase-auth",
            "true",
            "--supabase-url",
            "https://myproject.supabase.co",
        ]))
        .unwrap();
        assert!(!service.is_enabled());
    }

    #[test]
    fn test_enabled_with_full_configuration() {
        let service = SupabaseService::new(&config(&[
            "--use-supabase-auth",
            "true",
            "--supabase-url",
            "https://myproject.supabase.co",
            "--supabase-key",
            "anon-key",
        ]))
        .unwrap();
        assert!(service.is_enabled());
        let client = service.client().unwrap();
        assert_eq!(client.base_url(), "https://myproject.supabase.co");
    }

    #[test]
    fn test_providers_fall_back_to_native_when_disabled() {
        let cfg = config(&["--google-client-id", "google-id"]);
        let service = SupabaseService::new(&cfg).unwrap();
        assert_eq!(
            service.providers(&cfg),
            SupabaseProviders::Native { native: true }
        );
        assert_eq!(
            serde_json::to_value(service.providers(&cfg)).unwrap(),
            serde_json::json!({"native": true})
        );
    }

    #[test]
    fn test_providers_when_enabled() {
        let cfg = config(&[
            "--use-supabase-auth",
            "true",
            "--supabase-url",
            "https://myproject.supabase.co",
            "--supabase-key",
            "anon-key",
            "--google-client-id",
            "google-id",
        ]);
        let service = SupabaseService::new(&cfg).unwrap();
        assert_eq!(
            service.providers(&cfg),
            SupabaseProviders::Supabase {
                google: true,
                github: false,
                email: true,
                magic: true,
            }
        );
    }

    #[test]
    fn test_project_config_exposes_url_key_and_callback() {
        let cfg = config(&[
            "--supabase-url",
            "https://myproject.supabase.co",
            "--supabase-key",
            "anon-key",
        ]);
        let project = SupabaseService::project_config(&cfg);
        assert_eq!(project.url.as_deref(), Some("https://myproject.supabase.co"));
        assert_eq!(project.key.as_deref(), Some("anon-key"));
        assert_eq!(
            project.callback.as_deref(),
            Some("https://myproject.supabase.co/auth/v1/callback")
        );
    }
}
