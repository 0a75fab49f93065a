use super::super::{RecallConfig, RecordMode, RetentionConfig};
use crate::error::ConfigError;
use directories::UserDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const MAX_PACING_DELAY_MS: u64 = 60_000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Workspace directory - computed from home, not serialized
    #[serde(skip)]
    pub workspace_dir: PathBuf,
    /// Path to config.toml - computed from home, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,

    #[serde(default)]
    pub retention: RetentionConfig,

    #[serde(default)]
    pub recall: RecallConfig,
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.retention.record_mode == RecordMode::WhitelistOnly
            && self.retention.whitelist.is_empty()
        {
            return Err(ConfigError::Validation(
                "retention.record_mode = \"whitelist_only\" requires a non-empty whitelist".into(),
            ));
        }

        if self.recall.pacing_delay_ms > MAX_PACING_DELAY_MS {
            return Err(ConfigError::Validation(format!(
                "recall.pacing_delay_ms must be <= {MAX_PACING_DELAY_MS}"
            )));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        let home =
            UserDirs::new().map_or_else(|| PathBuf::from("."), |u| u.home_dir().to_path_buf());
        let iris_dir = home.join(".iris-recall");

        Self {
            workspace_dir: iris_dir.join("workspace"),
            config_path: iris_dir.join("config.toml"),
            retention: RetentionConfig::default(),
            recall: RecallConfig::default(),
        }
    }
}
