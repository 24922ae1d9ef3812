//! Engine configuration management.

use serde::Deserialize;

/// Engine configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Fee accrual configuration.
    pub fee: FeeConfig,
}

/// Fee accrual configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct FeeConfig {
    /// Which fee policy the engine applies at check-in.
    #[serde(default)]
    pub policy: FeePolicyKind,
    /// Minimum billed minutes for the per-minute policy.
    #[serde(default = "default_minimum_minutes")]
    pub minimum_minutes: u64,
}

/// Fee policy selector.
///
/// `PerMinute` bills elapsed minutes (floored, with a configurable
/// minimum) times the item's per-use fee; `FlatRate` bills the per-use
/// fee once per checkout regardless of elapsed time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FeePolicyKind {
    /// Bill per elapsed minute.
    #[default]
    PerMinute,
    /// Bill a flat fee per checkout.
    FlatRate,
}

fn default_minimum_minutes() -> u64 {
    1
}

impl Default for FeeConfig {
    fn default() -> Self {
        Self {
            policy: FeePolicyKind::default(),
            minimum_minutes: default_minimum_minutes(),
        }
    }
}

impl EngineConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("RENTRA").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
