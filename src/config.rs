use cosmic::cosmic_config::{self, CosmicConfigEntry, cosmic_config_derive::CosmicConfigEntry};
use serde::{Deserialize, Serialize};

pub const APP_ID: &str = "dev.taskflow.app";
pub const CONFIG_VERSION: u64 = 1;

pub const ENV_SUPABASE_URL: &str = "TASKFLOW_SUPABASE_URL";
pub const ENV_SUPABASE_ANON_KEY: &str = "TASKFLOW_SUPABASE_ANON_KEY";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThemePreference {
    #[default]
    Light,
    Dark,
}

impl ThemePreference {
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize, CosmicConfigEntry)]
pub struct TaskFlowConfig {
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub theme: ThemePreference,
    pub debug_logging: bool,
}

impl TaskFlowConfig {
    /// Load the stored entry, falling back to defaults for missing keys.
    pub fn load() -> Option<(Self, cosmic_config::Config)> {
        let cosmic_cfg = match cosmic_config::Config::new(APP_ID, CONFIG_VERSION) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::error!("Failed to open config: {:?}", e);
                return None;
            }
        };
        let config = Self::get_entry(&cosmic_cfg).unwrap_or_else(|(errs, cfg)| {
            for e in errs {
                log::warn!("Config entry error: {:?}", e);
            }
            cfg
        });
        Some((config, cosmic_cfg))
    }

    /// Backend settings from the environment win over the stored ones.
    pub fn with_env_overrides(mut self) -> Self {
        self.apply_overrides(
            std::env::var(ENV_SUPABASE_URL).ok(),
            std::env::var(ENV_SUPABASE_ANON_KEY).ok(),
        );
        self
    }

    fn apply_overrides(&mut self, url: Option<String>, anon_key: Option<String>) {
        if let Some(url) = url.filter(|v| !v.trim().is_empty()) {
            self.supabase_url = url.trim().to_string();
        }
        if let Some(key) = anon_key.filter(|v| !v.trim().is_empty()) {
            self.supabase_anon_key = key.trim().to_string();
        }
    }

    pub fn backend_ready(&self) -> bool {
        let url = self.supabase_url.trim();
        (url.starts_with("https://") || url.starts_with("http://"))
            && !self.supabase_anon_key.trim().is_empty()
    }

    pub fn save(&self, cosmic_cfg: &cosmic_config::Config) {
        if let Err(e) = self.write_entry(cosmic_cfg) {
            log::error!("Failed to save config: {:?}", e);
        }
    }
}
