//! Configuration loading and discovery for `anime4k.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::Anime4kConfig;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name searched for during discovery.
pub const CONFIG_FILE_NAME: &str = "anime4k.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse anime4k.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override scale factor
    pub scale: Option<f32>,
    /// Override color push strength
    pub push_strength: Option<f32>,
    /// Override gradient push strength
    pub push_grad_strength: Option<f32>,
    /// Override worker thread count
    pub threads: Option<usize>,
}

/// Find anime4k.toml by walking up from the current working directory.
///
/// Search order:
/// 1. Walk up from current directory looking for anime4k.toml
/// 2. Check XDG_CONFIG_HOME/anime4k/anime4k.toml (or ~/.config/anime4k/anime4k.toml)
pub fn find_config() -> Option<PathBuf> {
    if let Ok(cwd) = env::current_dir() {
        if let Some(path) = find_config_from(cwd) {
            return Some(path);
        }
    }

    find_xdg_config()
}

/// Find anime4k.toml in the XDG config directory.
pub fn find_xdg_config() -> Option<PathBuf> {
    let xdg_config = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok()?;

    let config_path = xdg_config.join("anime4k").join(CONFIG_FILE_NAME);
    if config_path.exists() {
        Some(config_path)
    } else {
        None
    }
}

/// Find anime4k.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from anime4k.toml.
///
/// If a path is provided, loads from that file. Otherwise, uses `find_config()`
/// to locate the config file. If no config file is found, returns the defaults.
///
/// # Example
/// ```ignore
/// let config = load_config(None)?;
/// let config = load_config(Some(Path::new("presets/anime4k.toml")))?;
/// ```
pub fn load_config(path: Option<&Path>) -> Result<Anime4kConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => {
            log::debug!("loading config from {}", p.display());
            load_config_file(&p)
        }
        None => Ok(Anime4kConfig::default()),
    }
}

/// Load configuration from a specific file path.
fn load_config_file(path: &Path) -> Result<Anime4kConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: Anime4kConfig = toml::from_str(&contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    Ok(config)
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values. The merged result
/// is validated again so bad flags are reported the same way as bad files.
pub fn merge_cli_overrides(
    config: &mut Anime4kConfig,
    overrides: &CliOverrides,
) -> Result<(), ConfigError> {
    if let Some(scale) = overrides.scale {
        config.upscale.scale = scale;
    }
    if let Some(strength) = overrides.push_strength {
        config.upscale.push_strength = Some(strength);
    }
    if let Some(strength) = overrides.push_grad_strength {
        config.upscale.push_grad_strength = Some(strength);
    }
    if let Some(threads) = overrides.threads {
        config.runtime.threads = threads;
    }

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }
    Ok(())
}
