use anyhow::{anyhow, Result};
use std::path::PathBuf;

pub fn get_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join("clipsync"))
        .ok_or_else(|| anyhow!("Could not determine the platform config directory"))
}

pub fn get_setting_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("setting.json"))
}
