/*!
 * Events Module
 * Discrete-event records and the queue that orders them
 */

pub mod queue;
pub mod types;

pub use queue::{EventQueue, Timeline};
pub use types::{Event, EventKind};
