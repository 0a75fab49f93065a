use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for the recall plugin.
///
/// Library callers match on these to decide what to tell the user; the
/// operator binary wraps them in `anyhow` context chains.
#[derive(Debug, Error)]
pub enum IrisError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Storage ─────────────────────────────────────────────────────────
    #[error("storage: {0}")]
    Storage(#[from] StorageError),

    // ── Recall ──────────────────────────────────────────────────────────
    #[error("recall: {0}")]
    Recall(#[from] RecallError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Storage errors ─────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("sqlx: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

// ─── Recall errors ──────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum RecallError {
    /// History is not retained and the request carried no quoted message.
    #[error("no message source: history retention is disabled")]
    NoSource,

    #[error("no recallable messages found")]
    NoCandidates,

    #[error("candidate lookup failed: {0}")]
    Storage(#[from] StorageError),
}

impl RecallError {
    /// Short, human-readable reply for the chat surface.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::NoSource => "message history is disabled; reply to a message to recall it",
            Self::NoCandidates => "nothing to recall",
            Self::Storage(_) => "recall failed",
        }
    }
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, IrisError>;
