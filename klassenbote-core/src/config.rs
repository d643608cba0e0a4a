//! Global klassenbote configuration.

use std::path::PathBuf;

use config::{Config, File};
use serde::{Deserialize, Serialize};

use crate::error::{BoteError, BoteResult};

static DEFAULT_DATA_DIR: &str = "~/.local/share/klassenbote";
static DEFAULT_CLASS_NAME: &str = "10HBFI";
static DEFAULT_MESSENGER: &str = "whatsapp";

const SNAPSHOT_FILE: &str = "schedule.json";

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn is_default_data_dir(p: &PathBuf) -> bool {
    *p == default_data_dir()
}

fn default_class_name() -> String {
    DEFAULT_CLASS_NAME.to_string()
}

fn default_messenger() -> String {
    DEFAULT_MESSENGER.to_string()
}

/// Global configuration at ~/.config/klassenbote/config.toml
///
/// The group id can also come from the environment or the command line,
/// which both take precedence over this file.
#[derive(Serialize, Deserialize, Clone)]
pub struct KlassenboteConfig {
    /// Target group chat identifier, e.g. "49123456789-1234567890@g.us".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,

    /// Class name used in the greeting.
    #[serde(default = "default_class_name")]
    pub class_name: String,

    /// Messenger binary suffix: "whatsapp" resolves
    /// klassenbote-messenger-whatsapp on PATH.
    #[serde(default = "default_messenger")]
    pub messenger: String,

    #[serde(default = "default_data_dir", skip_serializing_if = "is_default_data_dir")]
    pub data_dir: PathBuf,
}

impl KlassenboteConfig {
    pub fn load() -> BoteResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        let config: KlassenboteConfig = Config::builder()
            .add_source(File::from(config_path).required(false))
            .build()
            .map_err(|e| BoteError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| BoteError::Config(e.to_string()))?;

        Ok(config)
    }

    pub fn config_path() -> BoteResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| BoteError::Config("Could not determine config directory".into()))?
            .join("klassenbote");

        Ok(config_dir.join("config.toml"))
    }

    /// Expanded data directory holding the schedule snapshot.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned();
        PathBuf::from(full_path_str)
    }

    /// Path of the persisted weekly snapshot.
    pub fn schedule_path(&self) -> PathBuf {
        self.data_path().join(SNAPSHOT_FILE)
    }

    /// Save the current config to ~/.config/klassenbote/config.toml
    pub fn save(&self) -> BoteResult<()> {
        let config_path = Self::config_path()?;

        let content =
            toml::to_string_pretty(self).map_err(|e| BoteError::Config(e.to_string()))?;

        std::fs::write(&config_path, content)
            .map_err(|e| BoteError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &std::path::Path) -> BoteResult<()> {
        let contents = format!(
            "\
# klassenbote configuration

# Target group chat:
# group_id = \"49123456789-1234567890@g.us\"

# Class name used in the greeting:
# class_name = \"{DEFAULT_CLASS_NAME}\"

# Messenger binary (klassenbote-messenger-<name> on PATH):
# messenger = \"{DEFAULT_MESSENGER}\"

# Where the schedule snapshot lives:
# data_dir = \"{DEFAULT_DATA_DIR}\"
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                BoteError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| BoteError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config: KlassenboteConfig = toml::from_str("").unwrap();
        assert_eq!(config.group_id, None);
        assert_eq!(config.class_name, "10HBFI");
        assert_eq!(config.messenger, "whatsapp");
        assert!(config.schedule_path().ends_with("klassenbote/schedule.json"));
    }

    #[test]
    fn test_explicit_values() {
        let config: KlassenboteConfig = toml::from_str(
            "group_id = \"123@g.us\"\nclass_name = \"9B\"\nmessenger = \"signal\"\n",
        )
        .unwrap();
        assert_eq!(config.group_id.as_deref(), Some("123@g.us"));
        assert_eq!(config.class_name, "9B");
        assert_eq!(config.messenger, "signal");
    }
}
