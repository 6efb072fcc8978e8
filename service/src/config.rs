use clap::builder::TypedValueParser as _;
use clap::Parser;
use dotenvy::dotenv;
use log::LevelFilter;
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Debug, PartialEq)]
pub enum RustEnv {
    Development,
    Production,
    Staging,
}

#[derive(Debug, PartialEq, Eq)]
pub struct RustEnvParseError;

impl FromStr for RustEnv {
    type Err = RustEnvParseError;
    fn from_str(level: &str) -> Result<RustEnv, Self::Err> {
        match level.to_lowercase().as_str() {
            "development" => Ok(RustEnv::Development),
            "production" => Ok(RustEnv::Production),
            "staging" => Ok(RustEnv::Staging),
            _ => Err(RustEnvParseError),
        }
    }
}

impl fmt::Display for RustEnv {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RustEnv::Development => write!(f, "development"),
            RustEnv::Production => write!(f, "production"),
            RustEnv::Staging => write!(f, "staging"),
        }
    }
}

#[derive(Clone, Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// A list of full CORS origin URLs that allowed to receive server responses.
    #[arg(
        long,
        env,
        value_delimiter = ',',
        use_value_delimiter = true,
        default_value = "http://localhost:3000,https://localhost:3000"
    )]
    pub allowed_origins: Vec<String>,

    /// Google OAuth client ID. Google login is reported as available when set.
    #[arg(long, env = "GOOGLE_CLIENT_ID")]
    google_client_id: Option<String>,

    /// GitHub OAuth client ID. GitHub login is reported as available when set.
    #[arg(long, env = "GITHUB_CLIENT_ID")]
    github_client_id: Option<String>,

    /// Twilio account SID. Phone login is reported as available when set.
    #[arg(long, env = "TWILIO_ACCOUNT_SID")]
    twilio_account_sid: Option<String>,

    /// Route authentication through the Supabase backend instead of native auth.
    #[arg(long, env = "USE_SUPABASE_AUTH", default_value_t = false, action = clap::ArgAction::Set)]
    pub use_supabase_auth: bool,

    /// Run native and Supabase authentication side by side during migration.
    #[arg(long, env = "HYBRID_MODE", default_value_t = false, action = clap::ArgAction::Set)]
    pub hybrid_mode: bool,

    /// The Supabase project URL (e.g. https://myproject.supabase.co)
    #[arg(long, env = "SUPABASE_URL")]
    supabase_url: Option<String>,

    /// The Supabase anon (publishable) API key.
    #[arg(long, env = "SUPABASE_KEY")]
    supabase_key: Option<String>,

    /// The OAuth callback URL registered with the Supabase project.
    /// Defaults to `{SUPABASE_URL}/auth/v1/callback` when unset.
    #[arg(long, env = "SUPABASE_CALLBACK_URL")]
    supabase_callback_url: Option<String>,

    /// Frontend URL Supabase should redirect back to after an OAuth login.
    #[arg(long, env = "OAUTH_REDIRECT_URL")]
    oauth_redirect_url: Option<String>,

    /// Timeout in seconds for establishing a connection to the Supabase API
    #[arg(long, env, default_value_t = 10)]
    pub supabase_connect_timeout_secs: u64,

    /// Timeout in seconds for a single Supabase API request
    #[arg(long, env, default_value_t = 30)]
    pub supabase_request_timeout_secs: u64,

    /// Maximum requests per client allowed on rate-limited (OAuth) routes per window
    #[arg(long, env, default_value_t = 20)]
    pub critical_rate_limit_requests: u64,

    /// Length in seconds of the rate-limit window on OAuth routes
    #[arg(long, env, default_value_t = 60)]
    pub critical_rate_limit_window_secs: u64,

    /// The host interface to listen for incoming connections
    #[arg(short, long, env, default_value = "127.0.0.1")]
    pub interface: Option<String>,

    /// The host TCP port to listen for incoming connections
    #[arg(short, long, env, default_value_t = 4000)]
    pub port: u16,

    /// Set the log level verbosity threshold (level) to control what gets displayed on console output
    #[arg(
        short,
        long,
        env,
        default_value_t = LevelFilter::Info,
        value_parser = clap::builder::PossibleValuesParser::new(["OFF", "ERROR", "WARN", "INFO", "DEBUG", "TRACE"])
            .map(|s| s.parse::<LevelFilter>().unwrap()),
        )]
    pub log_level_filter: LevelFilter,

    /// Set the Rust runtime environment to use.
    #[arg(
    short,
    long,
    env,
    default_value_t = RustEnv::Development,
    value_parser = clap::builder::PossibleValuesParser::new([
        "DEVELOPMENT", "PRODUCTION", "STAGING",
        "development", "production", "staging"
    ])
        .map(|s| s.parse::<RustEnv>().unwrap()),
    )]
    pub runtime_env: RustEnv,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

/// Normalizes an optional environment value: a set-but-blank variable
/// counts as unset, so the feature it gates reads as disabled.
fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl Config {
    pub fn new() -> Self {
        // Load .env file first
        dotenv().ok();
        // Then parse the command line parameters and flags
        Config::parse()
    }

    pub fn google_client_id(&self) -> Option<String> {
        non_empty(&self.google_client_id)
    }

    pub fn github_client_id(&self) -> Option<String> {
        non_empty(&self.github_client_id)
    }

    pub fn twilio_account_sid(&self) -> Option<String> {
        non_empty(&self.twilio_account_sid)
    }

    pub fn supabase_url(&self) -> Option<String> {
        non_empty(&self.supabase_url).map(|url| url.trim_end_matches('/').to_string())
    }

    pub fn supabase_key(&self) -> Option<String> {
        non_empty(&self.supabase_key)
    }

    /// Returns the OAuth callback URL registered with the Supabase project,
    /// falling back to the project's default callback endpoint.
    pub fn supabase_callback_url(&self) -> Option<String> {
        non_empty(&self.supabase_callback_url)
            .or_else(|| self.supabase_url().map(|url| format!("{url}/auth/v1/callback")))
    }

    pub fn oauth_redirect_url(&self) -> Option<String> {
        non_empty(&self.oauth_redirect_url)
    }

    pub fn runtime_env(&self) -> RustEnv {
        self.runtime_env.clone()
    }

    pub fn is_production(&self) -> bool {
        self.runtime_env() == RustEnv::Production
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        Config::parse_from([&["supabase_auth_gateway"][..], args].concat())
    }

    #[test]
    fn test_defaults_report_everything_unconfigured() {
        let config = parse(&[]);
        assert_eq!(config.google_client_id(), None);
        assert_eq!(config.github_client_id(), None);
        assert_eq!(config.twilio_account_sid(), None);
        assert!(!config.use_supabase_auth);
        assert!(!config.hybrid_mode);
        assert_eq!(config.supabase_url(), None);
        assert_eq!(config.supabase_key(), None);
        assert_eq!(config.port, 4000);
    }

    #[test]
    fn test_blank_values_count_as_unset() {
        let config = parse(&[
            "--google-client-id",
            "",
            "--twilio-account-sid",
            "   ",
            "--supabase-url",
            "",
        ]);
        assert_eq!(config.google_client_id(), None);
        assert_eq!(config.twilio_account_sid(), None);
        assert_eq!(config.supabase_url(), None);
        assert_eq!(config.supabase_callback_url(), None);
    }

    #[test]
    fn test_supabase_url_trailing_slash_is_trimmed() {
        let config = parse(&["--supabase-url", "https://myproject.supabase.co/"]);
        assert_eq!(
            config.supabase_url().as_deref(),
            Some("https://myproject.supabase.co")
        );
    }

    #[test]
    fn test_callback_url_falls_back_to_project_default() {
        let config = parse(&["--supabase-url", "https://myproject.supabase.co"]);
        assert_eq!(
            config.supabase_callback_url().as_deref(),
            Some("https://myproject.supabase.co/auth/v1/callback")
        );

        let config = parse(&[
            "--supabase-url",
            "https://myproject.supabase.co",
            "--supabase-callback-url",
            "https://example.com/callback",
        ]);
        assert_eq!(
            config.supabase_callback_url().as_deref(),
            Some("https://example.com/callback")
        );
    }

    #[test]
    fn test_boolean_flags_parse_explicit_values() {
        let config = parse(&["--use-supabase-auth", "true", "--hybrid-mode", "false"]);
        assert!(config.use_supabase_auth);
        assert!(!config.hybrid_mode);
    }

    #[test]
    fn test_rust_env_parsing() {
        assert_eq!("development".parse(), Ok(RustEnv::Development));
        assert_eq!("PRODUCTION".parse(), Ok(RustEnv::Production));
        assert_eq!("Staging".parse(), Ok(RustEnv::Staging));
        assert_eq!("qa".parse::<RustEnv>(), Err(RustEnvParseError));
    }

    #[test]
    fn test_is_production() {
        assert!(!parse(&[]).is_production());
        assert!(parse(&["--runtime-env", "production"]).is_production());
    }
}
