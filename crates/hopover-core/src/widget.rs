//! The intersection widget.

use crate::arc::arc_svg;
use crate::geometry::{GeometryConstants, IntersectionGeometry};
use crate::host::WidgetContext;
use crate::menu::{PropertyMenuEvent, PropertyMenuItem};
use crate::registry::Widget;
use crate::scene::{FrameNode, RectangleNode, SceneNode, VectorImageNode};
use crate::state::{StateResult, SyncedBool, SyncedState};

/// Synced state key and menu property name for raised mode.
pub const RAISED_KEY: &str = "raised";
/// Label and tooltip of the raised mode toggle.
pub const RAISED_LABEL: &str = "Raised mode";

const RAISED: SyncedBool = SyncedBool::new(RAISED_KEY, false);

/// Two crossing lines that can be switched to a "hop over" rendering.
#[derive(Debug, Clone, Default)]
pub struct IntersectionWidget {
    constants: GeometryConstants,
}

impl IntersectionWidget {
    pub const NAME: &'static str = "intersection";

    /// Create a widget with the default dimensions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a widget with custom dimensions.
    pub fn with_constants(constants: GeometryConstants) -> Self {
        Self { constants }
    }

    pub fn constants(&self) -> &GeometryConstants {
        &self.constants
    }

    /// Whether raised mode is on. Missing or null state reads as `false`.
    pub fn raised(&self, state: &dyn SyncedState) -> bool {
        RAISED.get(state)
    }

    /// Flip raised mode relative to its previous value and return the new value.
    pub fn toggle_raised(&self, state: &mut dyn SyncedState) -> StateResult<bool> {
        let raised = RAISED.toggle(state)?;
        log::debug!("Raised mode toggled to {}", raised);
        Ok(raised)
    }

    /// The property menu for a given raised value.
    pub fn property_menu_items(&self, raised: bool) -> Vec<PropertyMenuItem> {
        vec![PropertyMenuItem::toggle(RAISED_KEY, RAISED_LABEL, raised)]
    }

    /// Handle a property menu activation. Returns whether it was recognized.
    pub fn handle_property_menu(
        &self,
        state: &mut dyn SyncedState,
        event: &PropertyMenuEvent,
    ) -> StateResult<bool> {
        if event.property_name != RAISED_KEY {
            log::debug!("Ignoring unknown property menu item {:?}", event.property_name);
            return Ok(false);
        }
        self.toggle_raised(state)?;
        Ok(true)
    }

    /// Build the scene for a raised value. Pure.
    pub fn build_scene(&self, raised: bool) -> SceneNode {
        let geometry = IntersectionGeometry::compute(&self.constants);
        let color = self.constants.color;
        let rect = |r| SceneNode::Rectangle(RectangleNode::from_rect(r, color));

        let frame = FrameNode::new(geometry.frame).with_child(rect(geometry.vertical));
        let frame = if raised {
            let arc = VectorImageNode::new(geometry.arc.placement, arc_svg(&geometry.arc, color));
            frame
                .with_child(rect(geometry.left_segment))
                .with_child(rect(geometry.right_segment))
                .with_child(SceneNode::VectorImage(arc))
        } else {
            frame.with_child(rect(geometry.horizontal))
        };

        SceneNode::Frame(frame)
    }
}

impl Widget for IntersectionWidget {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn render(&self, ctx: &mut WidgetContext<'_>) -> SceneNode {
        // Read once; the whole render uses this value.
        let raised = self.raised(&*ctx.state);

        ctx.menu.set_items(self.property_menu_items(raised));
        if ctx.stickable.supports_connectors() {
            ctx.stickable.register_stickable_host();
        }

        self.build_scene(raised)
    }

    fn on_property_menu(
        &self,
        ctx: &mut WidgetContext<'_>,
        event: &PropertyMenuEvent,
    ) -> StateResult<bool> {
        self.handle_property_menu(&mut *ctx.state, event)
    }
}
