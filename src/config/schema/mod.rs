mod core;
mod recall;
mod retention;

pub use self::core::Config;
pub use recall::RecallConfig;
pub use retention::{RecordMode, RetentionConfig};
