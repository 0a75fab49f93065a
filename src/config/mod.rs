pub mod schema;

pub use schema::{Config, RecallConfig, RecordMode, RetentionConfig};
