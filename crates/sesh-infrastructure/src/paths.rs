//! Unified path management for sesh configuration files.

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// The platform configuration directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find configuration directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Path resolution for sesh.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/sesh/              # Config directory (XDG on Linux/macOS)
/// └── config.toml              # Application configuration
/// ```
pub struct SeshPaths;

impl SeshPaths {
    /// Returns the sesh configuration directory.
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|base| base.join("sesh"))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path of the configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }
}
