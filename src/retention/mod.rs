mod gate;
mod policy;
mod scheduler;
mod sweep;

pub use gate::RecordGate;
pub use policy::{MS_PER_HOUR, RetentionPolicy};
pub use scheduler::{SweepHandle, spawn_eviction_loop, spawn_eviction_loop_every};
pub use sweep::{SweepReport, age_sweep, count_sweep, run_sweep, trim_pair};
