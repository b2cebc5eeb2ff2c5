use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{Result, anyhow};

use crate::ai::openai::{DEFAULT_ENDPOINT, DEFAULT_MODEL};
use crate::content::Profile;

pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub api_key: Option<String>,
    pub endpoint: Option<String>,
    pub model: Option<String>,
    #[serde(default)]
    pub profile: Profile,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let config_content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&config_content)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create config directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let config_content = serde_json::to_string_pretty(self)?;
        fs::write(path, config_content)?;
        Ok(())
    }

    pub fn save_api_key(key: &str) -> Result<()> {
        let mut config = Self::load().unwrap_or_else(|_| Self::new());
        config.api_key = Some(key.to_string());
        config.save()
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT)
    }

    pub fn model(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    /// Environment variable first, then the config file.
    pub fn resolve_api_key(&self) -> Option<String> {
        Self::pick_key(std::env::var(API_KEY_ENV).ok(), self.api_key.clone())
    }

    /// Returns where the API key comes from: "env", "config", or None
    pub fn key_source(&self) -> Option<&'static str> {
        if env_key_present() {
            Some("env")
        } else if self.api_key.as_deref().is_some_and(|k| !k.is_empty()) {
            Some("config")
        } else {
            None
        }
    }

    fn pick_key(env_key: Option<String>, file_key: Option<String>) -> Option<String> {
        env_key
            .filter(|k| !k.is_empty())
            .or(file_key)
            .filter(|k| !k.is_empty())
    }

    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("folio"))
    }

    pub fn get_config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }
}

fn env_key_present() -> bool {
    std::env::var(API_KEY_ENV).is_ok_and(|k| !k.is_empty())
}

/// Show only the last four characters of a key.
pub fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 4 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{}", tail)
}
