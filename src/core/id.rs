/*!
 * ID Generation
 * Run-scoped identifier generators
 */

use super::types::{Pid, SliceId};

/// Generic ID generator interface
pub trait IdGenerator<T> {
    /// Generate next ID
    fn next_id(&mut self) -> T;

    /// Peek at the ID the next call will return (for debugging)
    fn current(&self) -> T;
}

/// Monotonic counter generator
///
/// Owned by a single simulation run. Two runs never share a counter, so
/// process ids restart at the configured start value for every run.
#[derive(Debug, Clone)]
pub struct SequentialGenerator<T> {
    counter: u64,
    _marker: std::marker::PhantomData<T>,
}

impl<T> SequentialGenerator<T> {
    /// Create new generator starting at given value
    #[inline]
    pub fn new(start: u64) -> Self {
        Self {
            counter: start,
            _marker: std::marker::PhantomData,
        }
    }

    /// Create new generator starting at 1
    #[inline]
    pub fn default_start() -> Self {
        Self::new(1)
    }
}

impl<T> Default for SequentialGenerator<T> {
    fn default() -> Self {
        Self::default_start()
    }
}

impl IdGenerator<Pid> for SequentialGenerator<Pid> {
    #[inline]
    fn next_id(&mut self) -> Pid {
        let id = Pid(self.counter);
        self.counter += 1;
        id
    }

    #[inline]
    fn current(&self) -> Pid {
        Pid(self.counter)
    }
}

impl IdGenerator<SliceId> for SequentialGenerator<SliceId> {
    #[inline]
    fn next_id(&mut self) -> SliceId {
        let id = SliceId(self.counter);
        self.counter += 1;
        id
    }

    #[inline]
    fn current(&self) -> SliceId {
        SliceId(self.counter)
    }
}

/// Process ID generator (no recycling - ids identify processes in reports)
pub type PidGenerator = SequentialGenerator<Pid>;

/// CPU slice generator
pub type SliceGenerator = SequentialGenerator<SliceId>;
