use crate::channels::{MessageDirection, MessageEvent};
use crate::config::{RecordMode, RetentionConfig};
use std::collections::HashSet;

const WILDCARD: &str = "*";

/// Decides which observed messages enter the history store.
#[derive(Debug, Clone)]
pub struct RecordGate {
    mode: RecordMode,
    whitelist: HashSet<String>,
}

impl RecordGate {
    pub fn new(mode: RecordMode, whitelist: impl IntoIterator<Item = String>) -> Self {
        Self {
            mode,
            whitelist: whitelist.into_iter().collect(),
        }
    }

    pub fn mode(&self) -> RecordMode {
        self.mode
    }

    pub fn allows(&self, event: &MessageEvent) -> bool {
        match self.mode {
            RecordMode::Disabled => true,
            RecordMode::WhitelistOnly => self.is_whitelisted(event),
            RecordMode::Mixed => {
                event.direction == MessageDirection::Outbound || self.is_whitelisted(event)
            }
        }
    }

    fn is_whitelisted(&self, event: &MessageEvent) -> bool {
        self.whitelist.contains(WILDCARD)
            || self.whitelist.contains(&event.channel_id)
            || self.whitelist.contains(&event.user_id)
    }
}

impl From<&RetentionConfig> for RecordGate {
    fn from(config: &RetentionConfig) -> Self {
        Self::new(config.record_mode, config.whitelist.iter().cloned())
    }
}
