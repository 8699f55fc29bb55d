/*!
 * Process Module
 * Process timing state machine, demand generation and construction
 */

pub mod factory;
pub mod timing;
pub mod types;
pub mod workload;

// Re-export for convenience
pub use factory::ProcessFactory;
pub use timing::{Process, ProcessResult};
pub use types::{Demand, TimeAccounting};
pub use workload::{jitter, RandomWorkload, ScriptedWorkload, Workload};
