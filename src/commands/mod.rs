pub mod handlers;
pub mod parser;
pub mod types;

pub use handlers::{render_recall, render_status, render_stop};
pub use parser::{USAGE, coerce_number, parse_command};
pub use types::{CommandContext, RecallCommand};
