/*!
 * Devices Module
 * Memory admission and I/O service collaborating with the CPU
 */

pub mod io;
pub mod memory;

pub use io::IoDevice;
pub use memory::MemoryQueue;
