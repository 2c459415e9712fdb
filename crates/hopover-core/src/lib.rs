//! Hopover Core Library
//!
//! A collaborative "intersection" widget: a vertical and a horizontal line that
//! either cross flat or, in raised mode, hop over each other with a small arc.
//!
//! The widget is pure data in, scene out. Shared state, the property menu and
//! connector anchoring are reached through narrow host traits so the widget can
//! run against the Loro-backed [`WidgetDocument`] or the in-memory fakes.

pub mod arc;
pub mod color;
pub mod crdt;
pub mod geometry;
pub mod host;
pub mod menu;
pub mod registry;
pub mod scene;
pub mod state;
pub mod widget;

pub use color::SerializableColor;
pub use crdt::{CrdtSyncedState, WidgetDocument, WidgetId, WIDGETS_KEY};
pub use geometry::{ArcGeometry, GeometryConstants, GeometryError, IntersectionGeometry};
pub use host::{MemoryStickableHost, StickableHost, WidgetContext};
pub use menu::{MemoryPropertyMenu, PropertyMenu, PropertyMenuEvent, PropertyMenuItem, PropertyMenuItemType};
pub use registry::{RegistryError, Widget, WidgetRegistry};
pub use scene::{FrameNode, RectangleNode, SceneNode, VectorImageNode};
pub use state::{MemorySyncedState, StateError, StateResult, SyncedBool, SyncedState};
pub use widget::{IntersectionWidget, RAISED_KEY, RAISED_LABEL};
