//! Configuration management for the tasklist shell.
//!
//! Loads configuration from environment variables with sensible defaults.

use crate::zone::DueZone;
use chrono::FixedOffset;
use chrono_tz::Tz;
use std::env;
use std::time::Duration;
use thiserror::Error;

/// Periodic sweep interval in seconds; unset or `0` sweeps only at start-up
pub const SWEEP_INTERVAL_VAR: &str = "TASKLIST_SWEEP_INTERVAL_SECS";
/// IANA zone name (e.g. `Europe/Paris`) for entering and showing due dates
pub const TIMEZONE_VAR: &str = "TASKLIST_TIMEZONE";
/// Fixed UTC offset in minutes, for when no named zone fits
pub const TIMEZONE_OFFSET_VAR: &str = "TASKLIST_TIMEZONE_OFFSET_MINUTES";
/// Seconds to wait for running effects on exit
pub const SHUTDOWN_TIMEOUT_VAR: &str = "TASKLIST_SHUTDOWN_TIMEOUT_SECS";

/// Errors raised for malformed configuration values
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable is set but cannot be used
    #[error("{var}={value:?} is invalid: {reason}")]
    Invalid {
        /// Variable name
        var: &'static str,
        /// Raw value
        value: String,
        /// Why it was rejected
        reason: &'static str,
    },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Interval of the periodic overdue sweep; `None` sweeps only at mount
    pub sweep_interval: Option<Duration>,
    /// Zone for due dates; the system zone unless configured
    pub due_zone: DueZone,
    /// How long to wait for in-flight effects on exit
    pub shutdown_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sweep_interval: None,
            due_zone: DueZone::Local,
            shutdown_timeout: Duration::from_secs(5),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if a variable is set to an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if a variable is set to an unusable value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let sweep_interval =
            parse_var::<u64, _>(&lookup, SWEEP_INTERVAL_VAR, "expected whole seconds")?
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs);

        let named = parse_var::<Tz, _>(&lookup, TIMEZONE_VAR, "expected an IANA zone name")?;
        let offset =
            parse_var::<i32, _>(&lookup, TIMEZONE_OFFSET_VAR, "expected whole minutes")?
                .map(|minutes| {
                    minutes
                        .checked_mul(60)
                        .and_then(FixedOffset::east_opt)
                        .ok_or_else(|| ConfigError::Invalid {
                            var: TIMEZONE_OFFSET_VAR,
                            value: minutes.to_string(),
                            reason: "offset must be within ±24 hours",
                        })
                })
                .transpose()?;

        let due_zone = match (named, offset) {
            (Some(_), Some(offset)) => {
                return Err(ConfigError::Invalid {
                    var: TIMEZONE_OFFSET_VAR,
                    value: (offset.local_minus_utc() / 60).to_string(),
                    reason: "cannot be combined with TASKLIST_TIMEZONE",
                });
            },
            (Some(tz), None) => DueZone::Named(tz),
            (None, Some(offset)) => DueZone::Fixed(offset),
            (None, None) => defaults.due_zone,
        };

        let shutdown_timeout =
            parse_var::<u64, _>(&lookup, SHUTDOWN_TIMEOUT_VAR, "expected whole seconds")?
                .map_or(defaults.shutdown_timeout, Duration::from_secs);

        Ok(Self {
            sweep_interval,
            due_zone,
            shutdown_timeout,
        })
    }
}

/// Reads and parses one variable; blank values count as unset
fn parse_var<T, F>(
    lookup: &F,
    var: &'static str,
    reason: &'static str,
) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(var) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed.parse().map(Some).map_err(|_| ConfigError::Invalid {
        var,
        value: raw.clone(),
        reason,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)] // Tests can unwrap

    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Config::from_lookup(|var| vars.get(var).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        assert_eq!(load(&[]).unwrap(), Config::default());
    }

    #[test]
    fn reads_all_variables() {
        let config = load(&[
            (SWEEP_INTERVAL_VAR, "30"),
            (TIMEZONE_OFFSET_VAR, "-300"),
            (SHUTDOWN_TIMEOUT_VAR, "1"),
        ])
        .unwrap();

        assert_eq!(config.sweep_interval, Some(Duration::from_secs(30)));
        assert_eq!(
            config.due_zone,
            DueZone::Fixed(FixedOffset::west_opt(5 * 3600).unwrap())
        );
        assert_eq!(config.shutdown_timeout, Duration::from_secs(1));
    }

    #[test]
    fn zero_or_blank_interval_disables_sweep() {
        assert_eq!(load(&[(SWEEP_INTERVAL_VAR, "0")]).unwrap().sweep_interval, None);
        assert_eq!(load(&[(SWEEP_INTERVAL_VAR, "  ")]).unwrap().sweep_interval, None);
    }

    #[test]
    fn rejects_garbage() {
        let error = load(&[(SWEEP_INTERVAL_VAR, "soon")]).unwrap_err();
        assert_eq!(
            error,
            ConfigError::Invalid {
                var: SWEEP_INTERVAL_VAR,
                value: "soon".to_string(),
                reason: "expected whole seconds",
            }
        );
        assert_eq!(
            error.to_string(),
            "TASKLIST_SWEEP_INTERVAL_SECS=\"soon\" is invalid: expected whole seconds"
        );
    }

    #[test]
    fn named_zone() {
        let config = load(&[(TIMEZONE_VAR, "America/New_York")]).unwrap();
        assert_eq!(config.due_zone, DueZone::Named(chrono_tz::America::New_York));

        assert!(matches!(
            load(&[(TIMEZONE_VAR, "Mars/Olympus_Mons")]),
            Err(ConfigError::Invalid { var: TIMEZONE_VAR, .. })
        ));
    }

    #[test]
    fn named_zone_and_offset_conflict() {
        let error = load(&[(TIMEZONE_VAR, "Europe/Paris"), (TIMEZONE_OFFSET_VAR, "60")])
            .unwrap_err();
        assert_eq!(
            error.to_string(),
            "TASKLIST_TIMEZONE_OFFSET_MINUTES=\"60\" is invalid: \
             cannot be combined with TASKLIST_TIMEZONE"
        );
    }

    #[test]
    fn rejects_out_of_range_offset() {
        let error = load(&[(TIMEZONE_OFFSET_VAR, "1500")]).unwrap_err();
        assert!(matches!(
            error,
            ConfigError::Invalid { var: TIMEZONE_OFFSET_VAR, .. }
        ));
    }
}
