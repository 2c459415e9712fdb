//! Widget registration entry point.

use thiserror::Error;

use crate::host::WidgetContext;
use crate::menu::PropertyMenuEvent;
use crate::scene::SceneNode;
use crate::state::{StateError, StateResult};

/// Registry errors.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("A widget is already registered: {0}")]
    AlreadyRegistered(String),
    #[error("No widget registered")]
    NotRegistered,
    #[error(transparent)]
    State(#[from] StateError),
}

/// A widget the host can render.
pub trait Widget {
    /// Name used in logs and error messages.
    fn name(&self) -> &str;

    /// Describe the widget's current appearance.
    fn render(&self, ctx: &mut WidgetContext<'_>) -> SceneNode;

    /// React to a property menu activation. Returns whether it was recognized.
    fn on_property_menu(
        &self,
        ctx: &mut WidgetContext<'_>,
        event: &PropertyMenuEvent,
    ) -> StateResult<bool>;
}

/// Holds the single widget a bundle exposes to the host.
#[derive(Default)]
pub struct WidgetRegistry {
    widget: Option<Box<dyn Widget>>,
}

impl WidgetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the entry point. Only one widget may be registered.
    pub fn register(&mut self, widget: Box<dyn Widget>) -> Result<(), RegistryError> {
        if let Some(existing) = &self.widget {
            return Err(RegistryError::AlreadyRegistered(existing.name().to_string()));
        }
        log::debug!("Registered widget {}", widget.name());
        self.widget = Some(widget);
        Ok(())
    }

    pub fn is_registered(&self) -> bool {
        self.widget.is_some()
    }

    /// Render the registered widget.
    pub fn render(&self, ctx: &mut WidgetContext<'_>) -> Result<SceneNode, RegistryError> {
        let widget = self.widget.as_ref().ok_or(RegistryError::NotRegistered)?;
        Ok(widget.render(ctx))
    }

    /// Route a property menu activation to the registered widget.
    pub fn dispatch_menu(
        &self,
        ctx: &mut WidgetContext<'_>,
        event: &PropertyMenuEvent,
    ) -> Result<bool, RegistryError> {
        let widget = self.widget.as_ref().ok_or(RegistryError::NotRegistered)?;
        Ok(widget.on_property_menu(ctx, event)?)
    }
}
