//! Locating and reading `config.toml`.
//!
//! An explicit `--config` path must exist. Otherwise the first of
//! `pinline/config.toml` (relative to the working directory) and the
//! platform config directory that exists is used, and built-in defaults
//! apply when neither does.

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use pinline::{PinlineError, config::AppConfig};

const LOCAL_CONFIG: &str = "pinline/config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("configuration file {0} does not exist")]
    MissingFile(PathBuf),
}

impl From<ConfigError> for PinlineError {
    fn from(err: ConfigError) -> Self {
        PinlineError::Config(err.to_string())
    }
}

/// Files tried when no explicit path is given, in priority order.
fn implicit_candidates() -> Vec<(&'static str, PathBuf)> {
    let mut candidates = vec![("local", PathBuf::from(LOCAL_CONFIG))];
    match ProjectDirs::from("com", "pinline", "pinline") {
        Some(dirs) => candidates.push(("system", dirs.config_dir().join("config.toml"))),
        None => debug!("No platform configuration directory"),
    }
    candidates
}

/// Loads the renderer configuration.
///
/// # Errors
///
/// Returns [`PinlineError::Config`] if `explicit_path` does not exist or if
/// the chosen file is not valid configuration TOML, and [`PinlineError::Io`]
/// if it cannot be read.
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, PinlineError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::MissingFile(path.to_path_buf()).into());
        }
        info!(path = path.display().to_string(), source = "explicit"; "Using configuration file");
        return read_config(path);
    }

    for (source, path) in implicit_candidates() {
        if path.exists() {
            info!(path = path.display().to_string(), source = source; "Using configuration file");
            return read_config(&path);
        }
        debug!(path = path.display().to_string(), source = source; "Configuration file absent");
    }

    debug!("Using default configuration");
    Ok(AppConfig::default())
}

fn read_config(path: &Path) -> Result<AppConfig, PinlineError> {
    let content = fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|err| {
        ConfigError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
        .into()
    })
}
