use facedesk_core::{ConsoleSettings, Panel};
use std::time::Duration;

const DEFAULT_API_URL: &str = "http://localhost:8099";

/// CLI configuration, loaded from environment variables.
pub struct Config {
    /// Backend root URL; `/api/...` is appended.
    pub api_url: String,
    /// How long a toast stays visible.
    pub toast_ttl: Duration,
    /// Panel active when the interactive console opens.
    pub initial_panel: Panel,
}

impl Config {
    /// Load configuration from `FACEDESK_*` environment variables with defaults.
    pub fn from_env() -> Self {
        Self {
            api_url: std::env::var("FACEDESK_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            toast_ttl: Duration::from_millis(env_u64("FACEDESK_TOAST_TTL_MS", 3000)),
            initial_panel: std::env::var("FACEDESK_INITIAL_PANEL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(Panel::Models),
        }
    }

    pub fn console_settings(&self) -> ConsoleSettings {
        ConsoleSettings {
            toast_ttl: self.toast_ttl,
            initial_panel: self.initial_panel,
        }
    }
}

fn env_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
