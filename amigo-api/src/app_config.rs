use serde::Deserialize;
use std::env;

/// The poll interval is kept inside the band the chat page was tuned for.
pub const MIN_POLL_INTERVAL_MS: u64 = 300;
pub const MAX_POLL_INTERVAL_MS: u64 = 1000;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub chat: ChatConfig,
    pub booking: BookingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub request_timeout_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChatConfig {
    pub poll_interval_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BookingConfig {
    pub confirmation_auto_close_ms: u64,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .set_default("api.base_url", "http://localhost:8000")?
            .set_default("api.request_timeout_ms", 10_000)?
            .set_default("chat.poll_interval_ms", 1_000)?
            .set_default("booking.confirmation_auto_close_ms", 5_000)?
            // Start off by merging in the "default" configuration file
            .add_source(config::File::with_name("config/default").required(false))
            // Add in the current environment file
            // Default to 'development' env
            // Note that this file is _optional_
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add in a local configuration file
            // This file shouldn't be checked in to git
            .add_source(config::File::with_name("config/local").required(false))
            // Add in settings from the environment (with a prefix of AMIGO)
            // Eg.. `AMIGO__CHAT__POLL_INTERVAL_MS=500` would set the poll interval
            .add_source(config::Environment::with_prefix("AMIGO").separator("__"))
            .build()?;

        let mut loaded: AppConfig = s.try_deserialize()?;
        loaded.chat.poll_interval_ms = loaded
            .chat
            .poll_interval_ms
            .clamp(MIN_POLL_INTERVAL_MS, MAX_POLL_INTERVAL_MS);
        Ok(loaded)
    }

    /// Config pointing at a specific backend, defaults everywhere else.
    /// Integration tests use this to target an ephemeral mock server.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let mut cfg = Self::default();
        cfg.api.base_url = base_url.into();
        cfg
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: "http://localhost:8000".to_string(),
                request_timeout_ms: 10_000,
            },
            chat: ChatConfig {
                poll_interval_ms: 1_000,
            },
            booking: BookingConfig {
                confirmation_auto_close_ms: 5_000,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.api.base_url, "http://localhost:8000");
        assert_eq!(cfg.chat.poll_interval_ms, 1_000);
        assert_eq!(cfg.booking.confirmation_auto_close_ms, 5_000);
    }

    #[test]
    fn test_with_base_url_overrides_only_the_url() {
        let cfg = AppConfig::with_base_url("http://127.0.0.1:4010");
        assert_eq!(cfg.api.base_url, "http://127.0.0.1:4010");
        assert_eq!(cfg.api.request_timeout_ms, 10_000);
    }
}
