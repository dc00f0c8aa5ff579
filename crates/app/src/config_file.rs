//! Loading `crawler.toml` from the platform config directory.

use directories::ProjectDirs;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crawler_core::GameConfig;

use crate::APP_NAME;

pub const CONFIG_FILE_NAME: &str = "crawler.toml";
pub const CONFIG_PATH_ENV: &str = "CRAWLER_CONFIG";

pub fn get_default_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", APP_NAME).map(|proj_dirs| {
        let mut path = proj_dirs.config_dir().to_path_buf();
        path.push(CONFIG_FILE_NAME);
        path
    })
}

/// An explicit `CRAWLER_CONFIG` path wins over the platform default.
pub fn resolve_path(env_override: Option<OsString>) -> Option<PathBuf> {
    env_override.filter(|value| !value.is_empty()).map(PathBuf::from).or_else(get_default_path)
}

pub fn load(path: &Path) -> io::Result<GameConfig> {
    let content = fs::read_to_string(path)?;
    GameConfig::from_toml_str(&content).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// A missing file means defaults; a present but broken one is still an error.
pub fn load_or_default(path: Option<&Path>) -> io::Result<GameConfig> {
    let Some(path) = path else {
        return Ok(GameConfig::default());
    };
    match load(path) {
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(GameConfig::default()),
        other => other,
    }
}
