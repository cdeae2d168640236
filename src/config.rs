//! Startup configuration.
//!
//! Resolved once in `main` from environment variables and command-line
//! flags, then handed to the preflight and the app. Use the builder methods
//! to customize behavior in tests.

use chrono::{Local, NaiveDate};

use crate::api::DEFAULT_API_URL;

/// Environment variable overriding the backend base URL.
pub const ENV_API_URL: &str = "STRIDE_API_URL";
/// Environment variable supplying a Google ID token for headless sign-in.
pub const ENV_ID_TOKEN: &str = "STRIDE_ID_TOKEN";
/// Environment variable pinning the dashboard day (YYYY-MM-DD).
pub const ENV_DAY: &str = "STRIDE_DAY";

#[derive(Debug, Clone, PartialEq)]
pub struct StartupConfig {
    /// Backend base URL.
    pub api_url: String,
    /// Google ID token to exchange at startup instead of showing the
    /// sign-in screen.
    pub id_token: Option<String>,
    /// Fixed dashboard day; defaults to the local date when unset.
    pub fixed_day: Option<NaiveDate>,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            id_token: None,
            fixed_day: None,
        }
    }
}

impl StartupConfig {
    /// Create a new StartupConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the backend base URL.
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Set the startup ID token.
    pub fn with_id_token(mut self, token: impl Into<String>) -> Self {
        self.id_token = Some(token.into());
        self
    }

    /// Pin the dashboard to a fixed day.
    pub fn with_fixed_day(mut self, day: NaiveDate) -> Self {
        self.fixed_day = Some(day);
        self
    }

    /// Build from `STRIDE_*` environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var(ENV_API_URL) {
            if !url.is_empty() {
                config.api_url = url;
            }
        }
        if let Ok(token) = std::env::var(ENV_ID_TOKEN) {
            if !token.is_empty() {
                config.id_token = Some(token);
            }
        }
        if let Ok(day) = std::env::var(ENV_DAY) {
            config.fixed_day = NaiveDate::parse_from_str(&day, "%Y-%m-%d").ok();
        }
        config
    }

    /// Overlay `--api-url <url>` and `--id-token <token>` flags.
    /// Unknown arguments are ignored; flags win over environment variables.
    pub fn apply_args(mut self, args: &[String]) -> Self {
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--api-url" => {
                    if let Some(url) = iter.next() {
                        self.api_url = url.clone();
                    }
                }
                "--id-token" => {
                    if let Some(token) = iter.next() {
                        self.id_token = Some(token.clone());
                    }
                }
                _ => {}
            }
        }
        self
    }

    /// The day the dashboard opens on.
    pub fn dashboard_day(&self) -> NaiveDate {
        self.fixed_day.unwrap_or_else(|| Local::now().date_naive())
    }
}
