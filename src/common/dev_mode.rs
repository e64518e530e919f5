// src/common/dev_mode.rs
//! Development mode configuration
//! Lets a local client call every endpoint without minting a token

use std::env;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct DevModeConfig {
    pub enabled: bool,
    pub client_id: String,
}

impl DevModeConfig {
    pub fn from_env() -> Self {
        let enabled = env::var("DEV_MODE")
            .unwrap_or_else(|_| "false".to_string())
            .to_lowercase()
            == "true";

        let client_id = env::var("DEV_CLIENT_ID").unwrap_or_else(|_| "dev-client".to_string());

        Self { enabled, client_id }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

/// Log dev mode status on startup
pub fn log_dev_mode_status(config: &DevModeConfig) {
    if config.enabled {
        warn!(
            client_id = %config.client_id,
            "DEV MODE ENABLED: token checks bypassed, every scope granted. DO NOT USE IN PRODUCTION"
        );
    } else {
        info!("Production mode - bearer token required");
    }
}

/// CLI argument parsing for dev mode
pub fn parse_dev_mode_args<I>(args: I) -> Option<bool>
where
    I: IntoIterator<Item = String>,
{
    for arg in args {
        match arg.as_str() {
            "--dev" | "--dev-mode" => return Some(true),
            "--no-dev" | "--prod" | "--production" => return Some(false),
            _ => {}
        }
    }

    None
}

/// Override dev mode from CLI args
pub fn apply_cli_override(mut config: DevModeConfig) -> DevModeConfig {
    if let Some(cli_dev_mode) = parse_dev_mode_args(env::args()) {
        info!(dev_mode = cli_dev_mode, "CLI override applied");
        config.enabled = cli_dev_mode;
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dev_mode_config_defaults() {
        // Save original env vars
        let original_dev_mode = env::var("DEV_MODE").ok();

        env::remove_var("DEV_MODE");

        let config = DevModeConfig::from_env();
        assert!(!config.enabled, "Dev mode should be disabled by default");

        // Restore
        if let Some(val) = original_dev_mode {
            env::set_var("DEV_MODE", val);
        }
    }

    #[test]
    fn test_parse_dev_mode_args() {
        let args = |list: &[&str]| list.iter().map(|s| s.to_string()).collect::<Vec<_>>();

        assert_eq!(parse_dev_mode_args(args(&["api", "--dev"])), Some(true));
        assert_eq!(parse_dev_mode_args(args(&["api", "--prod"])), Some(false));
        assert_eq!(parse_dev_mode_args(args(&["api"])), None);
    }
}
