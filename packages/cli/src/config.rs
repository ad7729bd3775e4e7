use potatopay_editor::AutosaveConfig;
use potatopay_renderer::OverlayOptions;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_CONFIG_NAME: &str = "potatopay.config.json";

/// PotatoPay configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Base URL of the remote document API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Environment variable holding the bearer token
    #[serde(default = "default_token_env")]
    pub token_env: String,

    #[serde(default = "default_autosave_debounce_ms")]
    pub autosave_debounce_ms: u64,

    /// Script URL of the CSS framework loaded by overlay documents
    #[serde(default = "default_framework_src")]
    pub framework_src: String,
}

fn default_api_base_url() -> String {
    "https://api.potatopay.co/v1".to_string()
}

fn default_token_env() -> String {
    "POTATOPAY_TOKEN".to_string()
}

fn default_autosave_debounce_ms() -> u64 {
    potatopay_editor::DEFAULT_DEBOUNCE.as_millis() as u64
}

fn default_framework_src() -> String {
    OverlayOptions::default().framework_src
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    pub fn overlay_options(&self) -> OverlayOptions {
        OverlayOptions {
            framework_src: self.framework_src.clone(),
            ..Default::default()
        }
    }

    pub fn autosave_config(&self) -> AutosaveConfig {
        AutosaveConfig {
            debounce: Duration::from_millis(self.autosave_debounce_ms),
            ..Default::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            token_env: default_token_env(),
            autosave_debounce_ms: default_autosave_debounce_ms(),
            framework_src: default_framework_src(),
        }
    }
}
