//! A cloneable log of calls made by steps under test.
//!
//! Steps run synchronously, but they are `'static` closures, so each one holds
//! its own clone of the log. All clones append to the same list.
//!
//! # Examples
//!
//! ```
//! use test_helpers::CallLog;
//!
//! let log = CallLog::new();
//! let writer = log.clone();
//! writer.push("condition");
//! assert_eq!(log.entries(), ["condition"]);
//! ```

use std::sync::Arc;

use parking_lot::Mutex;

/// Shared, ordered record of labels.
#[derive(Clone, Debug, Default)]
pub struct CallLog {
    entries: Arc<Mutex<Vec<String>>>,
}

impl CallLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `label`.
    pub fn push(&self, label: impl Into<String>) {
        self.entries.lock().push(label.into());
    }

    /// Snapshot of every label in the order it was pushed.
    #[must_use]
    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().clone()
    }

    /// Returns `true` when nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}
