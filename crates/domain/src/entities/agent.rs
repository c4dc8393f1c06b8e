//! Agent reference data.

use serde::{Deserialize, Serialize};

use crate::ids::{AgentId, RoleId};

/// A playable agent. Every agent belongs to exactly one role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    pub id: AgentId,
    /// Unique.
    pub name: String,
    pub role_id: RoleId,
    pub icon_url: Option<String>,
}

impl Agent {
    pub fn new(name: impl Into<String>, role_id: RoleId) -> Self {
        Self {
            id: AgentId::new(),
            name: name.into(),
            role_id,
            icon_url: None,
        }
    }

    pub fn with_icon_url(mut self, url: impl Into<String>) -> Self {
        self.icon_url = Some(url.into());
        self
    }
}
