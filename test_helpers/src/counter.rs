//! Invocation counter shared between a test and the steps it registers.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Cloneable counter; all clones observe the same count.
///
/// # Examples
///
/// ```
/// use test_helpers::Counter;
///
/// let counter = Counter::new();
/// let step_counter = counter.clone();
/// step_counter.increment();
/// assert_eq!(counter.get(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Counter {
    count: Arc<AtomicUsize>,
}

impl Counter {
    /// Create a counter starting at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one and returns the new count.
    pub fn increment(&self) -> usize {
        self.count.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Current count.
    #[must_use]
    pub fn get(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}
