//! Shared widget state.
//!
//! The host replicates widget state to every collaborator. The widget only sees
//! it through [`SyncedState`], and only ever changes a value relative to its
//! previous value so concurrent writers cannot leave it in an invalid state.

use std::collections::HashMap;

use thiserror::Error;

use crate::crdt::WidgetId;

/// Shared state errors.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("CRDT error: {0}")]
    Crdt(#[from] loro::LoroError),
    #[error("Widget not found: {0}")]
    UnknownWidget(WidgetId),
}

/// Result type for shared state operations.
pub type StateResult<T> = Result<T, StateError>;

/// Host-provided key/value state shared with all collaborators.
pub trait SyncedState {
    /// Read a boolean entry. `None` when the entry is missing or null.
    fn get_bool(&self, key: &str) -> Option<bool>;

    /// Replace an entry with `update(previous)`, where a missing entry reads
    /// as `default`. Returns the value written.
    fn update_bool(
        &mut self,
        key: &str,
        default: bool,
        update: &dyn Fn(bool) -> bool,
    ) -> StateResult<bool>;
}

/// A named boolean entry with a default, like a single synced-state hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncedBool {
    pub key: &'static str,
    pub default: bool,
}

impl SyncedBool {
    pub const fn new(key: &'static str, default: bool) -> Self {
        Self { key, default }
    }

    /// Current value; missing or null entries read as the default.
    pub fn get(&self, state: &dyn SyncedState) -> bool {
        state.get_bool(self.key).unwrap_or(self.default)
    }

    /// Flip the value and return the new one.
    pub fn toggle(&self, state: &mut dyn SyncedState) -> StateResult<bool> {
        state.update_bool(self.key, self.default, &|prev| !prev)
    }
}

/// In-memory state for testing and ephemeral use.
///
/// Each write bumps a version counter, so the map behaves like a set of
/// versioned cells.
#[derive(Debug, Clone, Default)]
pub struct MemorySyncedState {
    values: HashMap<String, Option<bool>>,
    version: u64,
}

impl MemorySyncedState {
    /// Create empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an explicit null, as a host may before the first write.
    pub fn set_null(&mut self, key: &str) {
        self.values.insert(key.to_string(), None);
        self.version += 1;
    }

    /// Number of writes so far.
    pub fn version(&self) -> u64 {
        self.version
    }
}

impl SyncedState for MemorySyncedState {
    fn get_bool(&self, key: &str) -> Option<bool> {
        self.values.get(key).copied().flatten()
    }

    fn update_bool(
        &mut self,
        key: &str,
        default: bool,
        update: &dyn Fn(bool) -> bool,
    ) -> StateResult<bool> {
        let next = update(self.get_bool(key).unwrap_or(default));
        self.values.insert(key.to_string(), Some(next));
        self.version += 1;
        Ok(next)
    }
}
