//! Team reference data.

use serde::{Deserialize, Serialize};

use crate::ids::TeamId;

/// A predefined team profiles can affiliate with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    /// Unique.
    pub name: String,
    /// Higher numbers appear later in listings; ties break on name.
    pub custom_order: u32,
    pub icon_url: Option<String>,
}

impl Team {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: TeamId::new(),
            name: name.into(),
            custom_order: 0,
            icon_url: None,
        }
    }

    pub fn with_order(mut self, order: u32) -> Self {
        self.custom_order = order;
        self
    }

    pub fn with_icon_url(mut self, url: impl Into<String>) -> Self {
        self.icon_url = Some(url.into());
        self
    }
}
