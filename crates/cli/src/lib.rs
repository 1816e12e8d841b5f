//! Recursa CLI Library
//!
//! The console shell around `recursa-core`, shared by the `fibonacci` and
//! `power` binaries.
//!
//! # Modules
//!
//! - `console`: prompts and scanf-style integer input
//! - `drivers`: the two programs, byte-exact console output
//! - `config`: embedded defaults, user TOML files, `RECURSA_CONFIG`
//! - `stack`: evaluation thread with a configurable stack size
//! - `logging`: stderr tracing subscriber

pub mod config;
pub mod console;
pub mod drivers;
pub mod logging;
pub mod stack;

pub use config::{ConfigFile, DriverConfig, resolve_config_path};
pub use console::{Console, InputError};
pub use drivers::{DriverError, run_fibonacci, run_power};

use std::path::PathBuf;

/// Load config for a binary, exiting with status 1 on failure
pub fn load_config_or_exit(explicit: Option<PathBuf>) -> DriverConfig {
    let path = resolve_config_path(explicit);
    match DriverConfig::load(path.as_deref()) {
        Ok(config) => {
            tracing::debug!(?path, ?config, "configuration loaded");
            config
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
