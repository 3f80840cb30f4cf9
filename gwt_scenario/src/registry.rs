//! Ordered registries of pending conditions and actions.

use crate::step::Step;

/// A registered step and the key its result is stored under.
pub type Entry = (Option<String>, Step);

/// Pending steps in registration order.
///
/// Keyed entries replace an existing entry with the same key in place;
/// unkeyed entries are appended. Draining empties the registry, so every
/// entry is evaluated at most once.
#[derive(Debug, Default)]
pub struct CallbackRegistry {
    entries: Vec<Entry>,
}

impl CallbackRegistry {
    /// Create an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Registers `step` under `key`, or unkeyed when `key` is `None` or empty.
    pub fn add(&mut self, step: Step, key: Option<&str>) {
        let Some(name) = key.filter(|candidate| !candidate.is_empty()) else {
            self.entries.push((None, step));
            return;
        };
        let existing = self
            .entries
            .iter_mut()
            .find(|(existing, _)| existing.as_deref() == Some(name));
        match existing {
            Some((_, slot)) => *slot = step,
            None => self.entries.push((Some(name.to_owned()), step)),
        }
    }

    /// Removes and returns every entry in registration order.
    pub fn drain_all(&mut self) -> Vec<Entry> {
        std::mem::take(&mut self.entries)
    }

    /// Number of pending entries.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when nothing is pending.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
