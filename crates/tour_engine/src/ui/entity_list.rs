//! Building list construction

use crate::interaction::EntityRegistry;
use crate::metadata::MetadataTable;
use crate::ui::UiSurface;

/// Add one list entry per registered entity, in registration order
///
/// Entries are labelled with the curated display name, or the raw id when
/// the entity has no metadata.
pub fn populate_entity_list(ui: &mut dyn UiSurface, registry: &EntityRegistry, metadata: &MetadataTable) {
    for entity in registry.iter() {
        let label = metadata
            .get(entity.id.as_str())
            .map_or(entity.id.as_str(), |info| info.display_name.as_str());
        ui.add_list_entry(&entity.id, label);
    }
}
