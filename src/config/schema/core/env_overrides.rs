use super::Config;
use std::path::PathBuf;

impl Config {
    pub fn apply_env_overrides(&mut self) {
        if let Ok(workspace) = std::env::var("IRIS_RECALL_WORKSPACE")
            && !workspace.is_empty()
        {
            self.workspace_dir = PathBuf::from(shellexpand::tilde(&workspace).as_ref());
        }

        if let Ok(raw) = std::env::var("IRIS_RECALL_MAX_PER_USER")
            && let Ok(value) = raw.parse::<u32>()
        {
            self.retention.max_per_user = value;
        }

        if let Ok(raw) = std::env::var("IRIS_RECALL_MAX_AGE_HOURS")
            && let Ok(value) = raw.parse::<u32>()
        {
            self.retention.max_age_hours = value;
        }

        if let Ok(raw) = std::env::var("IRIS_RECALL_CLEANUP_INTERVAL_HOURS")
            && let Ok(value) = raw.parse::<u32>()
        {
            self.retention.cleanup_interval_hours = value;
        }

        if let Ok(raw) = std::env::var("IRIS_RECALL_PACING_MS")
            && let Ok(value) = raw.parse::<u64>()
        {
            self.recall.pacing_delay_ms = value;
        }
    }
}
