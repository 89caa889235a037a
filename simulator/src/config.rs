use crown_anchor_execution::TableConfig;
use serde::{Deserialize, Serialize};
use std::{path::PathBuf, str::FromStr, time::Duration};
use thiserror::Error;
use tracing::Level;

/// Configuration for the local backend, read from YAML.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,
    /// Where session records are kept. Omit to keep everything in memory.
    #[serde(default)]
    pub directory: Option<String>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Cosmetic pause between accepting a roll and revealing it.
    #[serde(default)]
    pub reveal_delay_ms: u64,
    #[serde(default)]
    pub table: TableConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            directory: None,
            log_level: default_log_level(),
            reveal_delay_ms: 0,
            table: TableConfig::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid log level: {value}")]
    InvalidLogLevel { value: String },
    #[error("table limits must satisfy 1 <= min <= max <= table (got {min}/{max}/{table})")]
    InvalidLimits { min: u64, max: u64, table: u64 },
    #[error("chip tiers must be > 0 (got {value:?})")]
    InvalidChipTiers { value: [u64; 4] },
}

pub struct ValidatedConfig {
    pub port: u16,
    pub directory: Option<PathBuf>,
    pub log_level: Level,
    pub reveal_delay: Duration,
    pub table: TableConfig,
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    pub fn validate(self) -> Result<ValidatedConfig, ConfigError> {
        let limits = self.table.limits;
        if !limits.is_valid() {
            return Err(ConfigError::InvalidLimits {
                min: limits.min_bet,
                max: limits.max_bet,
                table: limits.table_limit,
            });
        }
        if self.table.chip_tiers.contains(&0) {
            return Err(ConfigError::InvalidChipTiers {
                value: self.table.chip_tiers,
            });
        }

        let log_level =
            Level::from_str(&self.log_level).map_err(|_| ConfigError::InvalidLogLevel {
                value: self.log_level.clone(),
            })?;

        Ok(ValidatedConfig {
            port: self.port,
            directory: self.directory.map(PathBuf::from),
            log_level,
            reveal_delay: Duration::from_millis(self.reveal_delay_ms),
            table: self.table,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config() {
        let config: Config = serde_yaml::from_str("port: 9000\n").unwrap();
        let config = config.validate().unwrap();
        assert_eq!(config.port, 9000);
        assert!(config.directory.is_none());
        assert_eq!(config.log_level, Level::INFO);
        assert_eq!(config.reveal_delay, Duration::ZERO);
        assert_eq!(config.table.starting_balance, 100);
    }

    #[test]
    fn test_embedded_table() {
        let yaml = "
directory: ./data
log_level: debug
reveal_delay_ms: 1500
table:
  starting_balance: 500
  limits:
    minBet: 5
    maxBet: 50
    tableLimit: 200
";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        let config = config.validate().unwrap();
        assert_eq!(config.directory, Some(PathBuf::from("./data")));
        assert_eq!(config.log_level, Level::DEBUG);
        assert_eq!(config.reveal_delay, Duration::from_millis(1500));
        assert_eq!(config.table.starting_balance, 500);
        assert_eq!(config.table.limits.table_limit, 200);
        assert_eq!(config.table.chip_tiers, [1, 5, 10, 25]);
    }

    #[test]
    fn test_invalid_log_level() {
        let config = Config {
            log_level: "loud".to_string(),
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidLogLevel { value }) if value == "loud"
        ));
    }

    #[test]
    fn test_invalid_limits() {
        let mut config = Config::default();
        config.table.limits.min_bet = 200;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidLimits { min: 200, .. })
        ));
    }

    #[test]
    fn test_zero_chip_tier() {
        let mut config = Config::default();
        config.table.chip_tiers[2] = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidChipTiers { .. })
        ));
    }
}
