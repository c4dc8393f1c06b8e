//! Role reference data - admin-curated, read-only for players.

use serde::{Deserialize, Serialize};

use crate::ids::RoleId;

/// A playable role (e.g. Duelist, Controller, Initiator, Sentinel).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    pub id: RoleId,
    /// Unique, case-sensitive.
    pub name: String,
    pub icon_url: Option<String>,
}

impl Role {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: RoleId::new(),
            name: name.into(),
            icon_url: None,
        }
    }

    pub fn with_icon_url(mut self, url: impl Into<String>) -> Self {
        self.icon_url = Some(url.into());
        self
    }
}
