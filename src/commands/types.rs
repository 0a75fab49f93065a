/// A parsed `/recall` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecallCommand {
    /// Recall the newest `number` messages, optionally only from `user`.
    Recall { user: Option<String>, number: usize },
    Stop,
    Status,
    /// Unparseable arguments; answered with the usage line.
    Invalid,
}

/// Where a command was issued.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandContext {
    pub channel_id: String,
    pub user_id: String,
    /// Ids of messages the invocation quoted or replied to.
    pub quoted: Vec<String>,
}

impl CommandContext {
    pub fn new(channel_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            channel_id: channel_id.into(),
            user_id: user_id.into(),
            quoted: Vec::new(),
        }
    }

    pub fn with_quoted(mut self, message_ids: impl IntoIterator<Item = String>) -> Self {
        self.quoted = message_ids.into_iter().collect();
        self
    }
}
