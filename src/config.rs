//! Configuration for pdfdom

use std::collections::HashMap;
use std::env;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::selection::DEFAULT_EPSILON;
use crate::snapshot::DEFAULT_CACHE_SIZE;
use crate::text::DEFAULT_LINE_SPACING_FACTOR;

pub const EPSILON_VAR: &str = "PDFDOM_EPSILON";
pub const LINE_SPACING_VAR: &str = "PDFDOM_LINE_SPACING";
pub const SNAPSHOT_CACHE_SIZE_VAR: &str = "PDFDOM_SNAPSHOT_CACHE_SIZE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Tolerance for point selection
    pub epsilon: f64,
    /// Spacing factor used by paragraph builders
    pub line_spacing: f64,
    /// Entries per snapshot cache map
    pub snapshot_cache_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            epsilon: DEFAULT_EPSILON,
            line_spacing: DEFAULT_LINE_SPACING_FACTOR,
            snapshot_cache_size: DEFAULT_CACHE_SIZE,
        }
    }
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: FromStr + Copy,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "Invalid configuration value, using default");
            default
        }),
        None => default,
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read settings from a dotenv style file, ignoring the process environment
    pub fn from_env_file(path: impl AsRef<Path>) -> Result<Self> {
        let vars = dotenvy::from_path_iter(path.as_ref())
            .map_err(|e| ModelError::Config(e.to_string()))?
            .collect::<std::result::Result<HashMap<String, String>, _>>()
            .map_err(|e| ModelError::Config(e.to_string()))?;
        Ok(Self::from_lookup(|key| vars.get(key).cloned()))
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        Config {
            epsilon: parse_or(&lookup, EPSILON_VAR, defaults.epsilon),
            line_spacing: parse_or(&lookup, LINE_SPACING_VAR, defaults.line_spacing),
            snapshot_cache_size: parse_or(
                &lookup,
                SNAPSHOT_CACHE_SIZE_VAR,
                defaults.snapshot_cache_size,
            ),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.epsilon.is_finite() || self.epsilon < 0.0 {
            return Err(ModelError::Config(format!(
                "epsilon must be a non-negative number, got {}",
                self.epsilon
            )));
        }
        if !self.line_spacing.is_finite() || self.line_spacing <= 0.0 {
            return Err(ModelError::Config(format!(
                "line spacing must be positive, got {}",
                self.line_spacing
            )));
        }
        if self.snapshot_cache_size == 0 {
            return Err(ModelError::Config(
                "snapshot cache size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config, Config::default());
        assert_eq!(config.epsilon, 0.01);
        assert_eq!(config.line_spacing, 1.2);
        assert_eq!(config.snapshot_cache_size, 64);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides_and_invalid_values() {
        let config = Config::from_lookup(lookup(&[
            (EPSILON_VAR, " 0.5 "),
            (LINE_SPACING_VAR, "double"),
            (SNAPSHOT_CACHE_SIZE_VAR, "8"),
        ]));
        assert_eq!(config.epsilon, 0.5);
        assert_eq!(config.line_spacing, 1.2);
        assert_eq!(config.snapshot_cache_size, 8);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad = Config {
            epsilon: -1.0,
            ..Config::default()
        };
        assert!(matches!(bad.validate(), Err(ModelError::Config(_))));

        let bad = Config {
            snapshot_cache_size: 0,
            ..Config::default()
        };
        assert!(bad.validate().is_err());

        let bad = Config {
            line_spacing: f64::NAN,
            ..Config::default()
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_from_env_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "PDFDOM_EPSILON=0.25").unwrap();
        writeln!(file, "# comment").unwrap();
        writeln!(file, "PDFDOM_SNAPSHOT_CACHE_SIZE=4").unwrap();
        let config = Config::from_env_file(file.path()).unwrap();
        assert_eq!(config.epsilon, 0.25);
        assert_eq!(config.snapshot_cache_size, 4);
        assert_eq!(config.line_spacing, 1.2);
    }

    #[test]
    fn test_missing_env_file() {
        assert!(matches!(
            Config::from_env_file("/no/such/.env"),
            Err(ModelError::Config(_))
        ));
    }
}
