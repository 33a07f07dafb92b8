use anyhow::{Context, Result};
use std::time::Duration;

/// Backend the browser client talked to when no override was configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone)]
pub struct Config {
    // Diagnosis / translation backend
    pub api_base_url: String,

    // Local session API
    pub port: u16,

    // Notifications
    pub toast_duration: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let api_base_url = non_blank_var("API_BASE_URL")
            .or_else(|| non_blank_var("VITE_API_BASE_URL"))
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        Ok(Self {
            api_base_url: normalize_base_url(&api_base_url),

            port: match std::env::var("PORT") {
                Ok(v) => v
                    .parse()
                    .with_context(|| format!("PORT must be a port number, got '{}'", v))?,
                Err(_) => 3000,
            },

            toast_duration: match std::env::var("TOAST_DURATION_MS") {
                Ok(v) => Duration::from_millis(v.parse().with_context(|| {
                    format!("TOAST_DURATION_MS must be milliseconds, got '{}'", v)
                })?),
                Err(_) => Duration::from_secs(3),
            },
        })
    }

    /// Config pointing at a specific backend, with defaults for everything else.
    pub fn for_backend(api_base_url: &str) -> Self {
        Self {
            api_base_url: normalize_base_url(api_base_url),
            port: 3000,
            toast_duration: Duration::from_secs(3),
        }
    }

    /// Absolute URL for a backend endpoint path such as `/translate/`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_base_url, path)
    }
}

/// An empty assignment such as `API_BASE_URL=` in `.env` counts as unset.
fn non_blank_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
