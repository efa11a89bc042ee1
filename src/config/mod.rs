use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const ENV_BASE_URL: &str = "CODEWARS_BASE_URL";
pub const ENV_USER: &str = "CODEWARS_USER";

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("HOME directory not found")]
    NoHomeDir,

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, SettingsError>;

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub base_url: String,
    pub username: String,
    pub timeout_secs: u64,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: "https://www.codewars.com/api/v1/".to_string(),
            username: "colbydauph".to_string(),
            timeout_secs: 30,
            log_level: "warn".to_string(),
        }
    }
}

impl Settings {
    /// Reads `~/.cwhistory/settings.json`, then applies environment overrides.
    pub fn load() -> Result<Self> {
        let mut settings = Self::load_from(&Self::settings_path()?)?;
        settings.apply_env(|key| std::env::var(key).ok());
        Ok(settings)
    }

    /// Reads settings from `path`. A missing file yields the defaults.
    /// `//` and `/* */` comments are allowed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Settings::default());
        }
        let file = std::fs::File::open(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let reader = json_comments::StripComments::new(std::io::BufReader::new(file));
        serde_json::from_reader(reader).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Overrides fields from `CODEWARS_BASE_URL` and `CODEWARS_USER`.
    /// Empty values are ignored.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let present = |key: &str| lookup(key).filter(|v: &String| !v.trim().is_empty());
        if let Some(base_url) = present(ENV_BASE_URL) {
            self.base_url = base_url;
        }
        if let Some(username) = present(ENV_USER) {
            self.username = username;
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn settings_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(SettingsError::NoHomeDir)?;
        Ok(home.join(".cwhistory").join("settings.json"))
    }
}
