use std::future::Future;
use std::pin::Pin;

/// Whether the bot received the message or sent it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageDirection {
    Inbound,
    Outbound,
}

/// A message observed on a channel.
///
/// `user_id` identifies the author (for outbound messages, the bot itself).
/// `channel_id` identifies the conversation (e.g. Discord channel/thread ID).
#[derive(Debug, Clone)]
pub struct MessageEvent {
    pub message_id: String,
    pub user_id: String,
    pub channel_id: String,
    pub direction: MessageDirection,
}

impl MessageEvent {
    pub fn inbound(
        message_id: impl Into<String>,
        user_id: impl Into<String>,
        channel_id: impl Into<String>,
    ) -> Self {
        Self {
            message_id: message_id.into(),
            user_id: user_id.into(),
            channel_id: channel_id.into(),
            direction: MessageDirection::Inbound,
        }
    }

    pub fn outbound(
        message_id: impl Into<String>,
        user_id: impl Into<String>,
        channel_id: impl Into<String>,
    ) -> Self {
        Self {
            direction: MessageDirection::Outbound,
            ..Self::inbound(message_id, user_id, channel_id)
        }
    }
}

/// The slice of a messaging platform the recall path needs.
pub trait Channel: Send + Sync {
    /// Human-readable channel name
    fn name(&self) -> &str;

    /// Delete one message on the platform.
    ///
    /// Errors cover permission failures and messages that no longer exist;
    /// callers count them and move on.
    fn delete_message<'a>(
        &'a self,
        channel_id: &'a str,
        message_id: &'a str,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send + 'a>>;
}
