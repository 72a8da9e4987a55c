use super::utils::get_setting_path;
use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::sync::RwLock;

// Global settings instance
pub static SETTING: Lazy<RwLock<Setting>> = Lazy::new(|| RwLock::new(Setting::default()));

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkSetting {
    // WebSocket server port
    #[serde(default = "default_webserver_port")]
    pub webserver_port: u16,
}

fn default_webserver_port() -> u16 {
    8000
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncSetting {
    // Whether the local clipboard poller runs
    #[serde(default = "default_auto_sync")]
    pub auto_sync: bool,
    // Local clipboard poll interval in milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

fn default_auto_sync() -> bool {
    true
}

fn default_poll_interval_ms() -> u64 {
    1_000
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Setting {
    #[serde(skip)]
    device_id: String, // Set once at startup, never serialized
    pub network: NetworkSetting,
    pub sync: SyncSetting,
}

impl Default for Setting {
    fn default() -> Self {
        Self {
            device_id: String::new(),
            network: NetworkSetting {
                webserver_port: default_webserver_port(),
            },
            sync: SyncSetting {
                auto_sync: default_auto_sync(),
                poll_interval_ms: default_poll_interval_ms(),
            },
        }
    }
}

impl Setting {
    /// Get a clone of the current settings.
    pub fn get_instance() -> Self {
        SETTING.read().unwrap().clone()
    }

    /// Load settings from `setting_path`, or from the default config
    /// directory when none is given. A missing file produces (and saves)
    /// the defaults.
    pub fn load(setting_path: Option<PathBuf>) -> Result<Self> {
        let setting_path = if let Some(path) = setting_path {
            path
        } else {
            get_setting_path()?
        };

        if let Ok(setting_str) = fs::read_to_string(&setting_path) {
            let setting: Setting = serde_json::from_str(&setting_str)
                .with_context(|| format!("Failed to parse settings file: {:?}", setting_path))?;

            SETTING.write().unwrap().clone_from(&setting);
            Ok(setting)
        } else {
            let default_setting = Setting::default();
            default_setting.save(Some(setting_path))?;
            Ok(default_setting)
        }
    }

    /// Save settings to `setting_path`, or to the default config directory
    /// when none is given.
    pub fn save(&self, setting_path: Option<PathBuf>) -> Result<()> {
        let setting_path = if let Some(path) = setting_path {
            path
        } else {
            get_setting_path()?
        };

        if let Some(parent) = setting_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let setting_str = serde_json::to_string_pretty(self)?;
        fs::write(&setting_path, setting_str)
            .with_context(|| format!("Failed to write settings file: {:?}", setting_path))?;

        SETTING.write().unwrap().clone_from(self);
        Ok(())
    }

    pub fn get_device_id(&self) -> String {
        self.device_id.clone()
    }

    pub fn set_device_id(&mut self, device_id: String) {
        self.device_id = device_id;
    }
}
