pub mod sqlite;
pub mod traits;
pub mod types;

pub use sqlite::SqliteHistoryStore;
pub use traits::{HistoryStore, StoreFuture};
pub use types::{HistoryQuery, MessageRecord, UserChannelPair};
