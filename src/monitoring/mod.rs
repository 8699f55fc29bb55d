/*!
 * Monitoring Module
 * Logging setup
 */

pub mod tracer;

pub use tracer::init_tracing;
