mod config;
pub mod database;

pub use config::{Config, DialogSection, FallbackConfig, JournalConfig, TimerConfig};
pub use database::{Database, TurnRecord};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/claritycoach[-dev]/` based on CLARITYCOACH_ENV.
///
/// Set CLARITYCOACH_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("CLARITYCOACH_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("claritycoach-dev")
    } else {
        base_dir.join("claritycoach")
    };

    std::fs::create_dir_all(&dir).map_err(|source| ConfigError::DataDir {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}
