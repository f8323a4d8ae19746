//! Background token sweep configuration

use serde::{Deserialize, Serialize};

/// Configuration for the recurring refresh-token sweep
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SweepConfig {
    /// How often to run a sweep, in seconds
    pub interval_secs: u64,

    /// How long revoked rows are retained before physical deletion, in days
    pub retention_days: i64,

    /// Whether the background sweep is scheduled at all
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            interval_secs: 3600,
            retention_days: 7,
            enabled: default_enabled(),
        }
    }
}

impl SweepConfig {
    /// Create from environment variables
    ///
    /// Recognized variables: `TOKEN_SWEEP_INTERVAL_SECS`,
    /// `REVOKED_TOKEN_RETENTION_DAYS`, `TOKEN_SWEEP_ENABLED`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            interval_secs: std::env::var("TOKEN_SWEEP_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.interval_secs),
            retention_days: std::env::var("REVOKED_TOKEN_RETENTION_DAYS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.retention_days),
            enabled: std::env::var("TOKEN_SWEEP_ENABLED")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.enabled),
        }
    }
}

fn default_enabled() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sweep_config_default() {
        let config = SweepConfig::default();
        assert_eq!(config.interval_secs, 3600);
        assert_eq!(config.retention_days, 7);
        assert!(config.enabled);
    }
}
