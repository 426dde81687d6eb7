//! UI surface used by the viewer core
//!
//! Architecture:
//! - `UiSurface`: imperative operations the host UI exposes
//! - `HeadlessUi`: in-memory surface recording the visible state
//! - `entity_list`: startup builder for the building list

mod entity_list;
mod headless;

pub use entity_list::populate_entity_list;
pub use headless::{HeadlessUi, ListEntry};

use crate::interaction::EntityId;

/// Mouse cursor affordance
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CursorStyle {
    /// Regular arrow
    #[default]
    Default,
    /// Hand cursor signalling something clickable
    Pointer,
}

/// Host UI operations the viewer drives
///
/// Implementations are imperative and infallible: the viewer is
/// presentation-only and must stay interactive even if a widget is missing.
pub trait UiSurface {
    /// Show the description panel with the given content
    fn show_panel(&mut self, title: &str, body: &str);

    /// Hide the description panel
    fn hide_panel(&mut self);

    /// Show or hide the "return to overview" affordance
    fn set_return_visible(&mut self, visible: bool);

    /// Set the full-screen overlay opacity in [0, 1]
    fn set_overlay_opacity(&mut self, opacity: f32);

    /// Set the pointer cursor style
    fn set_cursor(&mut self, cursor: CursorStyle);

    /// Append an entry to the building list
    fn add_list_entry(&mut self, id: &EntityId, label: &str);
}
