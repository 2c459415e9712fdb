//! Loro-backed document holding the synced state of widget instances.
//!
//! # Schema
//!
//! ```text
//! LoroDoc
//! └── "widgets": LoroMap<WidgetId, LoroMap>
//!     └── <widget id>: LoroMap<String, LoroValue> (synced state entries)
//! ```
//!
//! Map entries merge last-writer-wins. Concurrent toggles computed from the
//! same stale value write the same result, so one of them is absorbed; every
//! replica still converges to the same boolean.

use loro::{Container, ExportMode, LoroDoc, LoroMap, LoroResult, LoroValue, ValueOrContainer, VersionVector};
use uuid::Uuid;

use crate::state::{StateError, StateResult, SyncedState};

/// Key for the widgets map in the document.
pub const WIDGETS_KEY: &str = "widgets";

/// Unique identifier for widget instances.
pub type WidgetId = Uuid;

/// A CRDT document containing every widget instance's synced state.
pub struct WidgetDocument {
    doc: LoroDoc,
}

impl WidgetDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self { doc: LoroDoc::new() }
    }

    /// Create a document from a snapshot.
    pub fn from_snapshot(bytes: &[u8]) -> LoroResult<Self> {
        let doc = LoroDoc::new();
        doc.import(bytes)?;
        Ok(Self { doc })
    }

    /// Get the underlying LoroDoc.
    pub fn loro_doc(&self) -> &LoroDoc {
        &self.doc
    }

    /// Peer ID of this replica.
    pub fn peer_id(&self) -> u64 {
        self.doc.peer_id()
    }

    /// Set the peer ID of this replica.
    pub fn set_peer_id(&self, peer_id: u64) -> LoroResult<()> {
        self.doc.set_peer_id(peer_id)
    }

    fn widgets_map(&self) -> LoroMap {
        self.doc.get_map(WIDGETS_KEY)
    }

    fn widget_map(&self, id: WidgetId) -> Option<LoroMap> {
        match self.widgets_map().get(&id.to_string())? {
            ValueOrContainer::Container(Container::Map(map)) => Some(map),
            _ => None,
        }
    }

    /// Add a widget instance with empty state and return its ID.
    pub fn insert_widget(&mut self) -> StateResult<WidgetId> {
        let id = Uuid::new_v4();
        self.widgets_map()
            .insert_container(&id.to_string(), LoroMap::new())?;
        self.doc.commit();
        log::debug!("Inserted widget {}", id);
        Ok(id)
    }

    /// Delete a widget instance together with its state.
    pub fn remove_widget(&mut self, id: WidgetId) -> StateResult<()> {
        if !self.contains_widget(id) {
            return Err(StateError::UnknownWidget(id));
        }
        self.widgets_map().delete(&id.to_string())?;
        self.doc.commit();
        log::debug!("Removed widget {}", id);
        Ok(())
    }

    /// Check whether a widget instance exists.
    pub fn contains_widget(&self, id: WidgetId) -> bool {
        self.widget_map(id).is_some()
    }

    /// Number of widget instances.
    pub fn widget_count(&self) -> usize {
        self.widgets_map().len()
    }

    /// IDs of all widget instances.
    pub fn widget_ids(&self) -> Vec<WidgetId> {
        match self.widgets_map().get_deep_value() {
            LoroValue::Map(map) => map
                .keys()
                .filter_map(|key| Uuid::parse_str(key).ok())
                .collect(),
            _ => vec![],
        }
    }

    /// Synced state of one widget instance.
    pub fn synced_state(&self, id: WidgetId) -> StateResult<CrdtSyncedState<'_>> {
        let map = self.widget_map(id).ok_or(StateError::UnknownWidget(id))?;
        Ok(CrdtSyncedState { doc: &self.doc, map })
    }

    /// Export the document as a snapshot (full state).
    pub fn export_snapshot(&self) -> Vec<u8> {
        self.doc.export(ExportMode::Snapshot).unwrap_or_default()
    }

    /// Export incremental updates since a version.
    pub fn export_updates(&self, since: &VersionVector) -> Vec<u8> {
        self.doc.export(ExportMode::updates(since)).unwrap_or_default()
    }

    /// Import a snapshot or updates from another replica.
    pub fn import(&mut self, bytes: &[u8]) -> LoroResult<()> {
        self.doc.import(bytes)?;
        Ok(())
    }

    /// Get the current version vector.
    pub fn version(&self) -> VersionVector {
        self.doc.oplog_vv()
    }
}

impl Default for WidgetDocument {
    fn default() -> Self {
        Self::new()
    }
}

/// One widget's synced state inside a [`WidgetDocument`].
pub struct CrdtSyncedState<'a> {
    doc: &'a LoroDoc,
    map: LoroMap,
}

impl SyncedState for CrdtSyncedState<'_> {
    fn get_bool(&self, key: &str) -> Option<bool> {
        match self.map.get(key)? {
            ValueOrContainer::Value(LoroValue::Bool(b)) => Some(b),
            ValueOrContainer::Value(LoroValue::Null) => None,
            _ => {
                log::warn!("Ignoring non-boolean synced state for key {}", key);
                None
            }
        }
    }

    fn update_bool(
        &mut self,
        key: &str,
        default: bool,
        update: &dyn Fn(bool) -> bool,
    ) -> StateResult<bool> {
        let next = update(self.get_bool(key).unwrap_or(default));
        self.map.insert(key, next)?;
        self.doc.commit();
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::SyncedBool;

    const RAISED: SyncedBool = SyncedBool::new("raised", false);

    /// Exchange pending updates between two replicas.
    fn sync(a: &mut WidgetDocument, b: &mut WidgetDocument) {
        let a_version = a.version();
        let b_version = b.version();
        let from_a = a.export_updates(&b_version);
        let from_b = b.export_updates(&a_version);
        b.import(&from_a).expect("import into b");
        a.import(&from_b).expect("import into a");
    }

    #[test]
    fn test_insert_and_remove_widget() {
        let mut doc = WidgetDocument::new();
        let id = doc.insert_widget().unwrap();
        assert_eq!(doc.widget_count(), 1);
        assert!(doc.contains_widget(id));
        assert_eq!(doc.widget_ids(), vec![id]);

        doc.remove_widget(id).unwrap();
        assert_eq!(doc.widget_count(), 0);
        assert!(!doc.contains_widget(id));
        assert!(matches!(doc.synced_state(id), Err(StateError::UnknownWidget(_))));
        assert!(matches!(doc.remove_widget(id), Err(StateError::UnknownWidget(_))));
    }

    #[test]
    fn test_new_widget_reads_default() {
        let mut doc = WidgetDocument::new();
        let id = doc.insert_widget().unwrap();
        let state = doc.synced_state(id).unwrap();
        assert_eq!(state.get_bool("raised"), None);
        assert!(!RAISED.get(&state));
    }

    #[test]
    fn test_null_entry_reads_default() {
        let mut doc = WidgetDocument::new();
        let id = doc.insert_widget().unwrap();
        doc.widget_map(id)
            .unwrap()
            .insert("raised", LoroValue::Null)
            .unwrap();
        let state = doc.synced_state(id).unwrap();
        assert_eq!(state.get_bool("raised"), None);
        assert!(!RAISED.get(&state));
    }

    #[test]
    fn test_toggle_round_trip() {
        let mut doc = WidgetDocument::new();
        let id = doc.insert_widget().unwrap();
        let mut state = doc.synced_state(id).unwrap();

        assert!(RAISED.toggle(&mut state).unwrap());
        assert!(RAISED.get(&state));
        assert!(!RAISED.toggle(&mut state).unwrap());
        assert!(!RAISED.get(&state));
    }

    #[test]
    fn test_widgets_are_independent() {
        let mut doc = WidgetDocument::new();
        let first = doc.insert_widget().unwrap();
        let second = doc.insert_widget().unwrap();

        RAISED.toggle(&mut doc.synced_state(first).unwrap()).unwrap();

        assert!(RAISED.get(&doc.synced_state(first).unwrap()));
        assert!(!RAISED.get(&doc.synced_state(second).unwrap()));
    }

    #[test]
    fn test_snapshot_restores_state() {
        let mut doc = WidgetDocument::new();
        let id = doc.insert_widget().unwrap();
        RAISED.toggle(&mut doc.synced_state(id).unwrap()).unwrap();

        let restored = WidgetDocument::from_snapshot(&doc.export_snapshot()).unwrap();
        assert!(restored.contains_widget(id));
        assert!(RAISED.get(&restored.synced_state(id).unwrap()));
    }

    #[test]
    fn test_toggle_replicates() {
        let mut a = WidgetDocument::new();
        a.set_peer_id(1).unwrap();
        let id = a.insert_widget().unwrap();
        let mut b = WidgetDocument::from_snapshot(&a.export_snapshot()).unwrap();
        b.set_peer_id(2).unwrap();

        RAISED.toggle(&mut a.synced_state(id).unwrap()).unwrap();
        sync(&mut a, &mut b);

        assert!(RAISED.get(&b.synced_state(id).unwrap()));
    }

    #[test]
    fn test_concurrent_toggles_converge() {
        let mut a = WidgetDocument::new();
        a.set_peer_id(1).unwrap();
        let id = a.insert_widget().unwrap();
        let mut b = WidgetDocument::from_snapshot(&a.export_snapshot()).unwrap();
        b.set_peer_id(2).unwrap();

        // Stale concurrent edits: a toggles once, b toggles twice.
        RAISED.toggle(&mut a.synced_state(id).unwrap()).unwrap();
        RAISED.toggle(&mut b.synced_state(id).unwrap()).unwrap();
        RAISED.toggle(&mut b.synced_state(id).unwrap()).unwrap();
        sync(&mut a, &mut b);

        let on_a = a.synced_state(id).unwrap().get_bool("raised");
        let on_b = b.synced_state(id).unwrap().get_bool("raised");
        assert!(on_a.is_some());
        assert_eq!(on_a, on_b);
    }

    #[test]
    fn test_same_stale_toggle_is_absorbed() {
        let mut a = WidgetDocument::new();
        a.set_peer_id(1).unwrap();
        let id = a.insert_widget().unwrap();
        let mut b = WidgetDocument::from_snapshot(&a.export_snapshot()).unwrap();
        b.set_peer_id(2).unwrap();

        RAISED.toggle(&mut a.synced_state(id).unwrap()).unwrap();
        RAISED.toggle(&mut b.synced_state(id).unwrap()).unwrap();
        sync(&mut a, &mut b);

        assert!(RAISED.get(&a.synced_state(id).unwrap()));
        assert!(RAISED.get(&b.synced_state(id).unwrap()));
    }
}
