//! Environment configuration for the off-chain GNP tools.
//!
//! Values come from the process environment, with `.env` loaded first when
//! present.

use std::path::PathBuf;

use gnp_core::{Opening, Tolerance};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const EVENT_LOG_VAR: &str = "GNP_EVENT_LOG";
pub const TOLERANCE_BPS_VAR: &str = "GNP_TOLERANCE_BPS";
pub const TOLERANCE_FLOOR_VAR: &str = "GNP_TOLERANCE_FLOOR";
pub const LOG_FILTER_VAR: &str = "GNP_LOG_FILTER";
pub const EXPECTED_TOTAL_VAR: &str = "GNP_EXPECTED_TOTAL";
pub const OPENING_TOTAL_VAR: &str = "GNP_OPENING_TOTAL";
pub const PROGRAM_ID_VAR: &str = "GNP_PROGRAM_ID";

const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("{key} has invalid value {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Transaction log file to replay
    pub event_log: PathBuf,
    pub tolerance: Tolerance,
    pub log_filter: String,
    /// Independently consulted total the replay is checked against
    pub expected_total: Option<u128>,
    /// Ledger total before the first record of the log
    pub opening: Opening,
    /// Base58 ledger program id, when not the built-in one
    pub program_id: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let event_log = lookup(EVENT_LOG_VAR)
            .map(PathBuf::from)
            .ok_or(ConfigError::Missing(EVENT_LOG_VAR))?;

        let defaults = Tolerance::default();
        let tolerance = Tolerance {
            bps: parse_or(&lookup, TOLERANCE_BPS_VAR, defaults.bps)?,
            floor: parse_or(&lookup, TOLERANCE_FLOOR_VAR, defaults.floor)?,
        };

        let log_filter = lookup(LOG_FILTER_VAR).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        let expected_total = match lookup(EXPECTED_TOTAL_VAR) {
            Some(raw) => Some(parse(EXPECTED_TOTAL_VAR, raw)?),
            None => None,
        };

        let opening = parse_or(&lookup, OPENING_TOTAL_VAR, Opening::Genesis)?;
        let program_id = lookup(PROGRAM_ID_VAR).map(|id| id.trim().to_string());

        Ok(Self {
            event_log,
            tolerance,
            log_filter,
            expected_total,
            opening,
            program_id,
        })
    }
}

fn parse<T: std::str::FromStr>(key: &'static str, raw: String) -> Result<T, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { key, value: raw })
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => parse(key, raw),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply() {
        let cfg = config(&[(EVENT_LOG_VAR, "logs/gnp.log")]).unwrap();
        assert_eq!(cfg.event_log, PathBuf::from("logs/gnp.log"));
        assert_eq!(cfg.tolerance, Tolerance::default());
        assert_eq!(cfg.log_filter, "info");
        assert_eq!(cfg.expected_total, None);
        assert_eq!(cfg.opening, Opening::Genesis);
        assert_eq!(cfg.program_id, None);
    }

    #[test]
    fn opening_and_program_id_are_read() {
        let cfg = config(&[
            (EVENT_LOG_VAR, "gnp.log"),
            (OPENING_TOTAL_VAR, "1100"),
            (PROGRAM_ID_VAR, " EjrrkoVLrwMvp5GYjSFqiPrShpTcT423UiAAfCRt6dpM "),
        ])
        .unwrap();
        assert_eq!(cfg.opening, Opening::Total(1_100));
        assert_eq!(cfg.program_id.as_deref(), Some("EjrrkoVLrwMvp5GYjSFqiPrShpTcT423UiAAfCRt6dpM"));

        let cfg = config(&[(EVENT_LOG_VAR, "gnp.log"), (OPENING_TOTAL_VAR, "first")]).unwrap();
        assert_eq!(cfg.opening, Opening::FirstRecord);

        let err = config(&[(EVENT_LOG_VAR, "gnp.log"), (OPENING_TOTAL_VAR, "later")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: OPENING_TOTAL_VAR, .. }));
    }

    #[test]
    fn overrides_are_parsed() {
        let cfg = config(&[
            (EVENT_LOG_VAR, "gnp.log"),
            (TOLERANCE_BPS_VAR, "5"),
            (TOLERANCE_FLOOR_VAR, " 10 "),
            (LOG_FILTER_VAR, "gnp_indexer=debug"),
            (EXPECTED_TOTAL_VAR, "1000000000"),
        ])
        .unwrap();
        assert_eq!(cfg.tolerance, Tolerance { bps: 5, floor: 10 });
        assert_eq!(cfg.log_filter, "gnp_indexer=debug");
        assert_eq!(cfg.expected_total, Some(1_000_000_000));
    }

    #[test]
    fn missing_log_is_an_error() {
        assert_eq!(config(&[]).unwrap_err(), ConfigError::Missing(EVENT_LOG_VAR));
    }

    #[test]
    fn garbage_is_rejected() {
        let err = config(&[(EVENT_LOG_VAR, "gnp.log"), (TOLERANCE_BPS_VAR, "one")]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                key: TOLERANCE_BPS_VAR,
                value: "one".to_string()
            }
        );
    }
}
