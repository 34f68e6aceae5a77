//! Server Configuration
//!
//! Environment-driven settings for the session and tick driver.

use std::env;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

use crate::game::player::MAX_PLAYERS;

/// Engine tic rate (Hz).
pub const DEFAULT_TICK_RATE: u32 = 35;

/// Highest tick rate with a non-zero microsecond period.
pub const MAX_TICK_RATE: u32 = 1_000_000;

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Tick rate for the driver loop (Hz).
    pub tick_rate: u32,
    /// Active player slots (1..=MAX_PLAYERS).
    pub player_slots: usize,
    /// Capacity of the position report queue feeding the tick owner.
    pub report_queue_capacity: usize,
    /// Log filter directive (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            tick_rate: DEFAULT_TICK_RATE,
            player_slots: MAX_PLAYERS,
            report_queue_capacity: 1024,
            log_level: "info".to_string(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let config = Self {
            tick_rate: parse_or(&lookup, "HELION_TICK_RATE", defaults.tick_rate)?,
            player_slots: parse_or(&lookup, "HELION_PLAYER_SLOTS", defaults.player_slots)?,
            report_queue_capacity: parse_or(
                &lookup,
                "HELION_REPORT_QUEUE",
                defaults.report_queue_capacity,
            )?,
            log_level: lookup("HELION_LOG").unwrap_or(defaults.log_level),
        };

        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_rate == 0 || self.tick_rate > MAX_TICK_RATE {
            return Err(ConfigError::OutOfRange("HELION_TICK_RATE"));
        }
        if self.player_slots == 0 || self.player_slots > MAX_PLAYERS {
            return Err(ConfigError::OutOfRange("HELION_PLAYER_SLOTS"));
        }
        if self.report_queue_capacity == 0 {
            return Err(ConfigError::OutOfRange("HELION_REPORT_QUEUE"));
        }
        Ok(())
    }

    /// Period of one tick, clamped to the accepted rate range.
    pub fn tick_duration(&self) -> Duration {
        let rate = self.tick_rate.clamp(1, MAX_TICK_RATE) as u64;
        Duration::from_micros(1_000_000 / rate)
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
        None => Ok(default),
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Value could not be parsed.
    #[error("invalid value for {key}: {value:?}")]
    Invalid {
        /// Variable name.
        key: &'static str,
        /// Raw value found.
        value: String,
    },

    /// Value parsed but is outside the accepted range.
    #[error("value out of range: {0}")]
    OutOfRange(&'static str),
}
