//! Static per-building metadata
//!
//! Maps entity ids to curated display names, descriptions and camera
//! offsets. The table is authored data loaded once at startup; lookups for
//! entities without an entry degrade to generated placeholder text.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::foundation::math::Vec3;

/// Curated description of one building
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingInfo {
    /// Name shown in the panel title and the entity list
    pub display_name: String,
    /// Body text of the description panel
    pub description: String,
    /// Camera position relative to the building center when focused
    #[serde(default)]
    pub camera_offset: Option<Vec3>,
}

/// Metadata as seen by the viewer, curated or generated
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedInfo {
    /// Name to display
    pub display_name: String,
    /// Description to display
    pub description: String,
    /// Curated camera offset, `None` when framing must be derived
    pub camera_offset: Option<Vec3>,
    /// Whether the values came from the table
    pub curated: bool,
}

/// Entity id to [`BuildingInfo`] lookup table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetadataTable {
    entries: BTreeMap<String, BuildingInfo>,
}

impl Config for MetadataTable {}

impl MetadataTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an entry
    pub fn insert(&mut self, id: impl Into<String>, info: BuildingInfo) {
        self.entries.insert(id.into(), info);
    }

    /// Curated entry for `id`, if any
    pub fn get(&self, id: &str) -> Option<&BuildingInfo> {
        self.entries.get(id)
    }

    /// Number of curated entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Metadata for `id`, falling back to generated placeholder text
    pub fn resolve(&self, id: &str) -> ResolvedInfo {
        match self.entries.get(id) {
            Some(info) => ResolvedInfo {
                display_name: info.display_name.clone(),
                description: info.description.clone(),
                camera_offset: info.camera_offset,
                curated: true,
            },
            None => {
                log::debug!("No metadata for '{}', using placeholder text", id);
                ResolvedInfo {
                    display_name: id.to_string(),
                    description: placeholder_description(id),
                    camera_offset: None,
                    curated: false,
                }
            }
        }
    }
}

/// Generated description for buildings without curated text
pub fn placeholder_description(name: &str) -> String {
    format!(
        "This is {name}. It has a distinctive architectural style.\n\
         It is also one of the important landmarks on campus."
    )
}
