//! In-memory UI surface
//!
//! Records the visible state of every widget. Used by the headless demo
//! driver and by tests asserting on UI side effects.

use crate::interaction::EntityId;
use crate::ui::{CursorStyle, UiSurface};

/// One entry of the building list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    /// Entity the entry focuses
    pub id: EntityId,
    /// Button label
    pub label: String,
}

/// Headless UI recording widget state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeadlessUi {
    /// Panel title and body while the panel is visible
    pub panel: Option<(String, String)>,
    /// Whether the return affordance is visible
    pub return_visible: bool,
    /// Current overlay opacity
    pub overlay_opacity: f32,
    /// Current cursor style
    pub cursor: CursorStyle,
    /// Building list in insertion order
    pub list: Vec<ListEntry>,
}

impl HeadlessUi {
    /// Create a UI with everything hidden
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the description panel is visible
    pub fn panel_visible(&self) -> bool {
        self.panel.is_some()
    }
}

impl UiSurface for HeadlessUi {
    fn show_panel(&mut self, title: &str, body: &str) {
        self.panel = Some((title.to_string(), body.to_string()));
    }

    fn hide_panel(&mut self) {
        self.panel = None;
    }

    fn set_return_visible(&mut self, visible: bool) {
        self.return_visible = visible;
    }

    fn set_overlay_opacity(&mut self, opacity: f32) {
        self.overlay_opacity = opacity.clamp(0.0, 1.0);
    }

    fn set_cursor(&mut self, cursor: CursorStyle) {
        self.cursor = cursor;
    }

    fn add_list_entry(&mut self, id: &EntityId, label: &str) {
        self.list.push(ListEntry {
            id: id.clone(),
            label: label.to_string(),
        });
    }
}
