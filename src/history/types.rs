use serde::{Deserialize, Serialize};

/// One observed chat message, keyed by its platform message id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRecord {
    pub message_id: String,
    pub user_id: String,
    pub channel_id: String,
    /// Milliseconds since the Unix epoch, taken when the message was observed.
    pub timestamp: i64,
}

impl MessageRecord {
    pub fn new(
        message_id: impl Into<String>,
        user_id: impl Into<String>,
        channel_id: impl Into<String>,
        timestamp: i64,
    ) -> Self {
        Self {
            message_id: message_id.into(),
            user_id: user_id.into(),
            channel_id: channel_id.into(),
            timestamp,
        }
    }
}

/// Lookup of the newest records in one channel, optionally for one author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryQuery {
    pub channel_id: String,
    pub user_id: Option<String>,
    /// `None` returns every match; `Some(n)` is clamped to at least 1.
    pub limit: Option<usize>,
}

impl HistoryQuery {
    pub fn channel(channel_id: impl Into<String>) -> Self {
        Self {
            channel_id: channel_id.into(),
            user_id: None,
            limit: None,
        }
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn effective_limit(&self) -> Option<usize> {
        self.limit.map(|limit| limit.max(1))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserChannelPair {
    pub user_id: String,
    pub channel_id: String,
}
