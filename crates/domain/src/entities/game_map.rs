//! Map reference data.

use serde::{Deserialize, Serialize};

use crate::ids::MapId;

/// A playable map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameMap {
    pub id: MapId,
    /// Unique.
    pub name: String,
    pub icon_url: Option<String>,
}

impl GameMap {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: MapId::new(),
            name: name.into(),
            icon_url: None,
        }
    }

    pub fn with_icon_url(mut self, url: impl Into<String>) -> Self {
        self.icon_url = Some(url.into());
        self
    }
}
