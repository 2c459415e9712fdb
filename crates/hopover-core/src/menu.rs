//! Property menu shown by the host when the widget is selected.

use serde::{Deserialize, Serialize};

/// Kind of property menu control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyMenuItemType {
    /// Two-state switch.
    Toggle,
}

/// One control in the property menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyMenuItem {
    pub item_type: PropertyMenuItemType,
    /// Identifier reported back when the control is activated.
    pub property_name: String,
    /// Text shown on hover. Also used as the control's label.
    pub tooltip: String,
    /// Checked state. Always a definite boolean.
    pub is_toggled: bool,
}

impl PropertyMenuItem {
    /// Create a toggle control.
    pub fn toggle(property_name: impl Into<String>, tooltip: impl Into<String>, is_toggled: bool) -> Self {
        Self {
            item_type: PropertyMenuItemType::Toggle,
            property_name: property_name.into(),
            tooltip: tooltip.into(),
            is_toggled,
        }
    }

    pub fn label(&self) -> &str {
        &self.tooltip
    }
}

/// A control activation reported by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyMenuEvent {
    pub property_name: String,
}

impl PropertyMenuEvent {
    pub fn new(property_name: impl Into<String>) -> Self {
        Self {
            property_name: property_name.into(),
        }
    }
}

/// Host-provided property menu.
pub trait PropertyMenu {
    /// Replace the menu's controls.
    fn set_items(&mut self, items: Vec<PropertyMenuItem>);
}

/// Property menu that just records the last installed controls.
#[derive(Debug, Clone, Default)]
pub struct MemoryPropertyMenu {
    items: Vec<PropertyMenuItem>,
}

impl MemoryPropertyMenu {
    pub fn new() -> Self {
        Self::default()
    }

    /// Controls from the most recent render.
    pub fn items(&self) -> &[PropertyMenuItem] {
        &self.items
    }

    /// Look up a control by property name.
    pub fn item(&self, property_name: &str) -> Option<&PropertyMenuItem> {
        self.items.iter().find(|item| item.property_name == property_name)
    }
}

impl PropertyMenu for MemoryPropertyMenu {
    fn set_items(&mut self, items: Vec<PropertyMenuItem>) {
        self.items = items;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_menu_replaces_items() {
        let mut menu = MemoryPropertyMenu::new();
        menu.set_items(vec![PropertyMenuItem::toggle("a", "A", false)]);
        menu.set_items(vec![PropertyMenuItem::toggle("b", "B", true)]);
        assert_eq!(menu.items().len(), 1);
        assert!(menu.item("a").is_none());
        assert!(menu.item("b").unwrap().is_toggled);
        assert_eq!(menu.item("b").unwrap().label(), "B");
    }

    #[test]
    fn test_item_json_shape() {
        let item = PropertyMenuItem::toggle("raised", "Raised mode", false);
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["item_type"], "toggle");
        assert_eq!(value["is_toggled"], false);
    }
}
