//! Supabase GoTrue API client.
//!
//! Thin pass-through client for the Supabase auth endpoints the gateway
//! exposes. Token issuance, code exchange and session handling stay with
//! the Supabase SDK on the frontend and are deliberately not implemented
//! here.

use crate::error::Error;
use log::*;
use serde_json::Value;
use service::config::Config;
use std::time::Duration;

/// HTTP client bound to one Supabase project, authenticated with the
/// project's anon key.
#[derive(Debug)]
pub struct SupabaseClient {
    client: reqwest::Client,
    base_url: String,
}

impl SupabaseClient {
    /// Create a new Supabase client for the given project URL and anon key.
    pub fn new(base_url: String, anon_key: &str, config: &Config) -> Result<Self, Error> {
        let headers = build_auth_headers(anon_key)?;

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .default_headers(headers)
            .connect_timeout(Duration::from_secs(config.supabase_connect_timeout_secs))
            .timeout(Duration::from_secs(config.supabase_request_timeout_secs))
            .build()?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the project's public auth settings (`GET /auth/v1/settings`),
    /// returned as-is to the caller.
    pub async fn auth_settings(&self) -> Result<Value, Error> {
        let url = format!("{}/auth/v1/settings", self.base_url);

        debug!("Fetching Supabase auth settings from {url}");

        let response = self.client.get(&url).send().await.inspect_err(|e| {
            warn!("Failed to reach Supabase auth settings endpoint: {e:?}");
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!("Supabase auth settings request failed: {status} - {error_text}");
            return Err(Error::external(format!(
                "Supabase responded with status {status}"
            )));
        }

        response.json::<Value>().await.map_err(|e| {
            warn!("Failed to decode Supabase auth settings payload: {e:?}");
            Error::external("Invalid Supabase auth settings payload").with_source(e)
        })
    }
}

/// Build authentication headers for the Supabase API
fn build_auth_headers(anon_key: &str) -> Result<reqwest::header::HeaderMap, Error> {
    let mut headers = reqwest::header::HeaderMap::new();

    let mut api_key = reqwest::header::HeaderValue::from_str(anon_key).map_err(|err| {
        warn!("Failed to create apikey header value: {err:?}");
        Error::internal("Failed to create apikey header value").with_source(err)
    })?;
    api_key.set_sensitive(true);
    headers.insert("apikey", api_key);

    let mut auth_header = reqwest::header::HeaderValue::from_str(&format!("Bearer {anon_key}"))
        .map_err(|err| {
            warn!("Failed to create authorization header value: {err:?}");
            Error::internal("Failed to create authorization header value").with_source(err)
        })?;
    auth_header.set_sensitive(true);
    headers.insert(reqwest::header::AUTHORIZATION, auth_header);

    Ok(headers)
}
