#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::unnecessary_literal_bound,
    clippy::module_name_repetitions,
    clippy::struct_field_names,
    clippy::must_use_candidate,
    clippy::new_without_default,
    clippy::return_self_not_must_use
)]

pub mod channels;
pub mod commands;
pub mod config;
pub mod error;
pub mod history;
pub mod plugin;
pub mod recall;
pub mod retention;

pub use channels::{Channel, MessageDirection, MessageEvent};
pub use commands::{CommandContext, RecallCommand};
pub use config::Config;
pub use error::{IrisError, Result};
pub use history::{HistoryStore, SqliteHistoryStore};
pub use plugin::HistoryPlugin;
