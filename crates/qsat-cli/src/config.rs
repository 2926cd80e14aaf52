//! Configuration for the qsat CLI.
//!
//! Supports loading configuration from:
//! 1. Configuration files (YAML)
//! 2. Environment variables (with QSAT_ prefix)
//!
//! Configuration precedence (highest to lowest):
//! 1. Command-line flags
//! 2. Environment variables
//! 3. Configuration file
//! 4. Default values

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Complete CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Quantum counting settings
    #[serde(default)]
    pub counting: CountingConfig,

    /// Grover search settings
    #[serde(default)]
    pub search: SearchConfig,

    /// Adaptive solve loop settings
    #[serde(default)]
    pub solve: SolveConfig,

    /// Statevector simulator settings
    #[serde(default)]
    pub simulator: SimulatorConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Quantum counting settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountingConfig {
    /// Number of counting qubits
    #[serde(default = "default_precision")]
    pub precision: u32,

    /// Shots per counting run
    #[serde(default = "default_shots")]
    pub shots: u32,
}

/// Grover search settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Shots per search run
    #[serde(default = "default_shots")]
    pub shots: u32,
}

/// Adaptive solve loop settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveConfig {
    /// Maximum padding variables added to bring the iteration count above 1
    #[serde(default = "default_max_padding")]
    pub max_padding: u32,

    /// Iteration counts tried when the first candidate fails verification
    #[serde(default = "default_fallback_iterations")]
    pub fallback_iterations: Vec<usize>,
}

/// Statevector simulator settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatorConfig {
    /// Largest circuit width the simulator accepts
    #[serde(default = "default_max_qubits")]
    pub max_qubits: u32,

    /// RNG seed for reproducible sampling
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level used when no `-v` flag is given: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions
fn default_precision() -> u32 {
    5
}

fn default_shots() -> u32 {
    1000
}

fn default_max_padding() -> u32 {
    4
}

fn default_fallback_iterations() -> Vec<usize> {
    vec![10]
}

fn default_max_qubits() -> u32 {
    qsat_adapter_sim::DEFAULT_MAX_QUBITS
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for CountingConfig {
    fn default() -> Self {
        Self {
            precision: default_precision(),
            shots: default_shots(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            shots: default_shots(),
        }
    }
}

impl Default for SolveConfig {
    fn default() -> Self {
        Self {
            max_padding: default_max_padding(),
            fallback_iterations: default_fallback_iterations(),
        }
    }
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            max_qubits: default_max_qubits(),
            seed: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IoError(format!("{}: {e}", path.as_ref().display())))?;
        Self::from_yaml(&contents)
    }

    /// Parse configuration from YAML text.
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml_ng::from_str(contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with the following precedence:
    /// 1. Load from file if provided
    /// 2. Apply environment variable overrides
    pub fn load(config_file: Option<&str>) -> Result<Self, ConfigError> {
        let config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Config::default(),
        };

        let config = config.merge_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Merge environment variables into this configuration.
    ///
    /// `lookup` returns the value of a variable if it is set; absent
    /// variables leave the corresponding fields unchanged.
    pub fn merge_env<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("QSAT_PRECISION") {
            self.counting.precision = parse_env("QSAT_PRECISION", &v)?;
        }
        if let Some(v) = lookup("QSAT_COUNT_SHOTS") {
            self.counting.shots = parse_env("QSAT_COUNT_SHOTS", &v)?;
        }
        if let Some(v) = lookup("QSAT_SEARCH_SHOTS") {
            self.search.shots = parse_env("QSAT_SEARCH_SHOTS", &v)?;
        }
        if let Some(v) = lookup("QSAT_MAX_PADDING") {
            self.solve.max_padding = parse_env("QSAT_MAX_PADDING", &v)?;
        }
        if let Some(v) = lookup("QSAT_FALLBACK_ITERATIONS") {
            self.solve.fallback_iterations = v
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| parse_env("QSAT_FALLBACK_ITERATIONS", s))
                .collect::<Result<_, _>>()?;
        }
        if let Some(v) = lookup("QSAT_MAX_QUBITS") {
            self.simulator.max_qubits = parse_env("QSAT_MAX_QUBITS", &v)?;
        }
        if let Some(v) = lookup("QSAT_SEED") {
            self.simulator.seed = Some(parse_env("QSAT_SEED", &v)?);
        }
        if let Some(v) = lookup("QSAT_LOG_LEVEL") {
            self.logging.level = v;
        }
        Ok(self)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.counting.precision == 0 {
            return Err(ConfigError::ValidationError(
                "counting.precision must be at least 1".to_string(),
            ));
        }
        if self.counting.shots == 0 || self.search.shots == 0 {
            return Err(ConfigError::ValidationError(
                "shots must be greater than 0".to_string(),
            ));
        }
        if self.simulator.max_qubits == 0 {
            return Err(ConfigError::ValidationError(
                "simulator.max_qubits must be greater than 0".to_string(),
            ));
        }
        if self.simulator.max_qubits > 30 {
            return Err(ConfigError::ValidationError(format!(
                "simulator.max_qubits {} exceeds the statevector limit of 30",
                self.simulator.max_qubits
            )));
        }

        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => {
                return Err(ConfigError::ValidationError(format!(
                    "Invalid log level: {other}"
                )));
            }
        }

        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value
        .parse()
        .map_err(|_| ConfigError::ValidationError(format!("{key}: cannot parse '{value}'")))
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.counting.precision, 5);
        assert_eq!(config.counting.shots, 1000);
        assert_eq!(config.solve.max_padding, 4);
        assert_eq!(config.solve.fallback_iterations, vec![10]);
        assert_eq!(config.simulator.seed, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config =
            Config::from_yaml("counting:\n  precision: 7\nsimulator:\n  seed: 3\n").unwrap();
        assert_eq!(config.counting.precision, 7);
        assert_eq!(config.counting.shots, 1000);
        assert_eq!(config.simulator.seed, Some(3));
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(matches!(
            Config::from_yaml("counting: [1, 2"),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_validate_zero_precision() {
        let mut config = Config::default();
        config.counting.precision = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_invalid_log_level() {
        let mut config = Config::default();
        config.logging.level = "loud".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_overrides() {
        let env = |key: &str| match key {
            "QSAT_PRECISION" => Some("6".to_string()),
            "QSAT_SEED" => Some("42".to_string()),
            "QSAT_FALLBACK_ITERATIONS" => Some("3, 7".to_string()),
            _ => None,
        };
        let config = Config::default().merge_env(env).unwrap();
        assert_eq!(config.counting.precision, 6);
        assert_eq!(config.simulator.seed, Some(42));
        assert_eq!(config.solve.fallback_iterations, vec![3, 7]);
    }

    #[test]
    fn test_env_absent_is_noop() {
        let config = Config::default().merge_env(no_env).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_env_parse_error() {
        let env = |key: &str| (key == "QSAT_MAX_PADDING").then(|| "many".to_string());
        assert!(Config::default().merge_env(env).is_err());
    }
}
