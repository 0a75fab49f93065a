pub mod traits;

pub use traits::{Channel, MessageDirection, MessageEvent};
