//! Driver configuration
//!
//! Settings come from three layers, later ones winning:
//!
//! 1. The embedded `defaults.toml`
//! 2. A user TOML file, from `--config` or the `RECURSA_CONFIG` variable
//! 3. Command-line flags (`--strategy`, `--unchecked`), applied by the binaries
//!
//! # Example
//!
//! ```toml
//! [fibonacci]
//! strategy = "memoized"
//!
//! [limits]
//! stack_size_mib = 64
//! ```

use recursa_core::{EvalLimits, FibonacciStrategy};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Embedded default configuration
pub static DEFAULT_CONFIG: &str = include_str!("defaults.toml");

/// Environment variable naming a config file when `--config` is absent
pub const CONFIG_ENV: &str = "RECURSA_CONFIG";

const MIB: usize = 1024 * 1024;

/// One parsed TOML file. Every key is optional so user files can be partial.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub fibonacci: FibonacciTable,
    #[serde(default)]
    pub power: PowerTable,
    #[serde(default)]
    pub limits: LimitsTable,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FibonacciTable {
    pub strategy: Option<FibonacciStrategy>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PowerTable {
    pub checked: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LimitsTable {
    pub max_depth: Option<usize>,
    pub stack_size_mib: Option<usize>,
}

impl ConfigFile {
    /// Parse configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse driver config: {}", e))
    }

    /// Read and parse a TOML file
    pub fn from_path(path: &Path) -> Result<Self, String> {
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config {}: {}", path.display(), e))?;
        Self::from_toml(&content)
    }
}

/// Fully resolved driver settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverConfig {
    /// Fibonacci evaluator used by the `fibonacci` driver
    pub strategy: FibonacciStrategy,
    /// Route `power` through the checked evaluator
    pub checked: bool,
    /// Depth limit for checked evaluation
    pub max_depth: usize,
    /// Stack reserved for the evaluation thread, in MiB
    pub stack_size_mib: usize,
}

impl DriverConfig {
    /// Load the embedded defaults
    pub fn default_config() -> Result<Self, String> {
        let file = ConfigFile::from_toml(DEFAULT_CONFIG)?;
        let config = DriverConfig {
            strategy: file
                .fibonacci
                .strategy
                .ok_or("Default config is missing fibonacci.strategy")?,
            checked: file
                .power
                .checked
                .ok_or("Default config is missing power.checked")?,
            max_depth: file
                .limits
                .max_depth
                .ok_or("Default config is missing limits.max_depth")?,
            stack_size_mib: file
                .limits
                .stack_size_mib
                .ok_or("Default config is missing limits.stack_size_mib")?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Defaults merged with the file at `path`, if any
    pub fn load(path: Option<&Path>) -> Result<Self, String> {
        let mut config = Self::default_config()?;
        if let Some(path) = path {
            config.merge(ConfigFile::from_path(path)?);
            config.validate()?;
        }
        Ok(config)
    }

    /// Merge a parsed file into this config (file values override)
    pub fn merge(&mut self, other: ConfigFile) {
        if let Some(strategy) = other.fibonacci.strategy {
            self.strategy = strategy;
        }
        if let Some(checked) = other.power.checked {
            self.checked = checked;
        }
        if let Some(max_depth) = other.limits.max_depth {
            self.max_depth = max_depth;
        }
        if let Some(stack_size_mib) = other.limits.stack_size_mib {
            self.stack_size_mib = stack_size_mib;
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.max_depth == 0 {
            return Err("limits.max_depth must be positive".to_string());
        }
        if self.stack_size_mib == 0 {
            return Err("limits.stack_size_mib must be positive".to_string());
        }
        if self.stack_size_mib.checked_mul(MIB).is_none() {
            return Err(format!(
                "limits.stack_size_mib is too large ({})",
                self.stack_size_mib
            ));
        }
        Ok(())
    }

    /// Stack size for the evaluation thread, in bytes
    pub fn stack_size_bytes(&self) -> usize {
        self.stack_size_mib.saturating_mul(MIB)
    }

    /// Checked-evaluation limits, with `max_depth` capped to what the
    /// evaluation thread's stack can hold
    pub fn limits(&self) -> EvalLimits {
        EvalLimits::for_stack(self.max_depth, self.stack_size_bytes())
    }
}

/// Pick the config file: an explicit path wins over `RECURSA_CONFIG`
pub fn resolve_config_path(explicit: Option<PathBuf>) -> Option<PathBuf> {
    explicit.or_else(|| {
        std::env::var_os(CONFIG_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_default_config_parses() {
        let config = DriverConfig::default_config().unwrap();
        assert_eq!(config.strategy, FibonacciStrategy::Recursive);
        assert!(config.checked);
        assert_eq!(config.max_depth, 100_000);
        assert_eq!(config.stack_size_mib, 256);
        assert_eq!(config.stack_size_bytes(), 256 * 1024 * 1024);
    }

    #[test]
    fn test_merge_partial_file() {
        let mut config = DriverConfig::default_config().unwrap();
        let user = ConfigFile::from_toml(
            r#"
            [fibonacci]
            strategy = "iterative"
            "#,
        )
        .unwrap();
        config.merge(user);
        assert_eq!(config.strategy, FibonacciStrategy::Iterative);
        // Untouched keys keep their defaults
        assert!(config.checked);
        assert_eq!(config.max_depth, 100_000);
    }

    #[test]
    fn test_unknown_strategy_rejected() {
        let err = ConfigFile::from_toml("[fibonacci]\nstrategy = \"matrix\"\n").unwrap_err();
        assert!(err.contains("Failed to parse driver config"));
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(ConfigFile::from_toml("[power]\nfast = true\n").is_err());
        assert!(ConfigFile::from_toml("[cache]\n").is_err());
    }

    #[test]
    fn test_validate_rejects_zero() {
        let mut config = DriverConfig::default_config().unwrap();
        config.max_depth = 0;
        assert!(config.validate().is_err());

        let mut config = DriverConfig::default_config().unwrap();
        config.stack_size_mib = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_limits() {
        let mut config = DriverConfig::default_config().unwrap();
        config.max_depth = 42;
        assert_eq!(config.limits().max_depth, 42);
    }

    #[test]
    fn test_limits_capped_by_stack() {
        let mut config = DriverConfig::default_config().unwrap();
        config.max_depth = 1_000_000;
        config.stack_size_mib = 16;
        assert_eq!(
            config.limits().max_depth,
            16 * 1024 * 1024 / recursa_core::FRAME_BYTES_ESTIMATE
        );
    }

    #[test]
    fn test_default_depth_fits_default_stack() {
        let config = DriverConfig::default_config().unwrap();
        assert_eq!(config.limits().max_depth, config.max_depth);
    }

    #[test]
    #[serial]
    fn test_resolve_config_path() {
        let orig = std::env::var(CONFIG_ENV).ok();

        // SAFETY: #[serial] keeps env-mutating tests from running concurrently
        unsafe {
            std::env::set_var(CONFIG_ENV, "/tmp/from-env.toml");
        }
        assert_eq!(
            resolve_config_path(None),
            Some(PathBuf::from("/tmp/from-env.toml"))
        );
        assert_eq!(
            resolve_config_path(Some(PathBuf::from("cli.toml"))),
            Some(PathBuf::from("cli.toml"))
        );

        // SAFETY: as above
        unsafe {
            std::env::remove_var(CONFIG_ENV);
        }
        assert_eq!(resolve_config_path(None), None);

        // SAFETY: Restoring environment to original state
        unsafe {
            if let Some(v) = orig {
                std::env::set_var(CONFIG_ENV, v);
            }
        }
    }
}
