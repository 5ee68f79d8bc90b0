use std::fs;
use std::path::{Path, PathBuf};

use color_eyre::eyre::WrapErr;
use tracing::debug;

use crate::config::AppConfig;

const CONFIG_DIR: &str = "quantum-admin";
const CONFIG_FILE: &str = "config.toml";

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join(CONFIG_DIR).join(CONFIG_FILE))
}

/// Load the config from `path`, or from the platform config directory when
/// no path is given. A missing file yields the defaults.
pub fn load(path: Option<&Path>) -> color_eyre::Result<AppConfig> {
    let Some(path) = path.map(Path::to_path_buf).or_else(config_path) else {
        debug!("No config directory found, using defaults");
        return Ok(AppConfig::default());
    };

    if !path.exists() {
        debug!(?path, "Config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    let content = fs::read_to_string(&path)
        .wrap_err_with(|| format!("Failed to read config file {}", path.display()))?;
    let config = parse(&content)
        .wrap_err_with(|| format!("Invalid config file {}", path.display()))?;
    debug!(?path, "Loaded config");
    Ok(config)
}

pub fn parse(content: &str) -> color_eyre::Result<AppConfig> {
    Ok(toml::from_str(content)?)
}
