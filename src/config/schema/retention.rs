use serde::{Deserialize, Serialize};

/// Which observed messages are written to the history store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordMode {
    /// Whitelist gate off: every observed message is recorded.
    #[default]
    Disabled,
    /// Both directions are recorded only for whitelisted channels or users.
    WhitelistOnly,
    /// Every outbound message is recorded; inbound only when whitelisted.
    Mixed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetentionConfig {
    /// Keep at most this many messages per (user, channel); 0 = unlimited
    #[serde(default = "default_max_per_user")]
    pub max_per_user: u32,
    /// Drop messages older than this many hours; 0 = unlimited
    #[serde(default = "default_max_age_hours")]
    pub max_age_hours: u32,
    /// Period of the background eviction sweep; 0 = no scheduled sweep
    #[serde(default = "default_cleanup_interval_hours")]
    pub cleanup_interval_hours: u32,
    #[serde(default)]
    pub record_mode: RecordMode,
    /// Channel or user ids admitted by the record gate ("*" admits everything)
    #[serde(default)]
    pub whitelist: Vec<String>,
    /// Trim the (user, channel) pair to `max_per_user` right after each insert
    #[serde(default)]
    pub trim_on_insert: bool,
    /// Drop every retained record when the plugin is disposed
    #[serde(default = "default_purge_on_dispose")]
    pub purge_on_dispose: bool,
}

fn default_max_per_user() -> u32 {
    99
}
fn default_max_age_hours() -> u32 {
    24
}
fn default_cleanup_interval_hours() -> u32 {
    1
}
fn default_purge_on_dispose() -> bool {
    true
}

impl RetentionConfig {
    /// Both caps at zero means nothing is ever stored.
    pub fn is_enabled(&self) -> bool {
        self.max_per_user > 0 || self.max_age_hours > 0
    }
}

impl Default for RetentionConfig {
    fn default() -> Self {
        Self {
            max_per_user: default_max_per_user(),
            max_age_hours: default_max_age_hours(),
            cleanup_interval_hours: default_cleanup_interval_hours(),
            record_mode: RecordMode::default(),
            whitelist: Vec::new(),
            trim_on_insert: false,
            purge_on_dispose: default_purge_on_dispose(),
        }
    }
}
