use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Optional on-disk configuration for the client
#[derive(Debug, Default, Deserialize)]
pub struct Profile {
    /// Base URL of the remote note service
    pub server_url: Option<String>,
    /// Path of the local fallback database
    pub db_path: Option<String>,
}

impl Profile {
    pub fn from_path(profile: &Path) -> Result<Option<Self>> {
        if !profile.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(profile).context("Failed to read profile file")?;

        let profile: Self = toml::from_str(&contents).context("Failed to deserialize profile")?;

        Ok(Some(profile))
    }
}

/// Get the XDG config directory, respecting XDG_CONFIG_HOME
fn get_config_dir() -> PathBuf {
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        PathBuf::from(xdg_config).join("memo")
    } else {
        directories::ProjectDirs::from("com", "memo", "memo")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Get the XDG data directory, respecting XDG_DATA_HOME
fn get_data_dir() -> PathBuf {
    if let Ok(xdg_data) = std::env::var("XDG_DATA_HOME") {
        PathBuf::from(xdg_data).join("memo")
    } else {
        directories::ProjectDirs::from("com", "memo", "memo")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

pub fn get_profile_path(arg_profile: &Option<String>) -> PathBuf {
    if let Some(path) = arg_profile {
        PathBuf::from(path)
    } else {
        get_config_dir().join("profile.toml")
    }
}

/// Default location of the local fallback database
pub fn default_db_path() -> PathBuf {
    get_data_dir().join("notes.db")
}
