//! Host capabilities beyond shared state and menus.

use crate::menu::PropertyMenu;
use crate::state::SyncedState;

/// Lets connector tools snap to the widget's boundary.
pub trait StickableHost {
    /// Whether the current canvas has connectors at all.
    fn supports_connectors(&self) -> bool;

    /// Declare the widget a valid connector anchor.
    fn register_stickable_host(&mut self);
}

/// Stickable host that counts registrations.
#[derive(Debug, Clone, Default)]
pub struct MemoryStickableHost {
    supports_connectors: bool,
    registrations: usize,
}

impl MemoryStickableHost {
    /// A canvas with connector tools.
    pub fn with_connectors() -> Self {
        Self {
            supports_connectors: true,
            registrations: 0,
        }
    }

    /// A canvas without connector tools.
    pub fn without_connectors() -> Self {
        Self::default()
    }

    pub fn is_registered(&self) -> bool {
        self.registrations > 0
    }

    pub fn registrations(&self) -> usize {
        self.registrations
    }
}

impl StickableHost for MemoryStickableHost {
    fn supports_connectors(&self) -> bool {
        self.supports_connectors
    }

    fn register_stickable_host(&mut self) {
        self.registrations += 1;
    }
}

/// The host seams available to one render or menu activation.
pub struct WidgetContext<'a> {
    pub state: &'a mut dyn SyncedState,
    pub menu: &'a mut dyn PropertyMenu,
    pub stickable: &'a mut dyn StickableHost,
}

impl<'a> WidgetContext<'a> {
    pub fn new(
        state: &'a mut dyn SyncedState,
        menu: &'a mut dyn PropertyMenu,
        stickable: &'a mut dyn StickableHost,
    ) -> Self {
        Self {
            state,
            menu,
            stickable,
        }
    }
}
