mod executor;
mod registry;
mod service;
mod task;

pub use executor::{RecallExecutor, RecallOutcome};
pub use registry::{TaskGuard, TaskRegistry, TaskSnapshot};
pub use service::{RecallReport, RecallRequest, RecallService};
pub use task::RecallTask;
