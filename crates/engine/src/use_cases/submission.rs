//! Profile form submission payload.
//!
//! The web layer delivers flat field values; this is their typed shape.

use lineup_domain::{AgentId, KeyBinding, MapId, RiotIdentity, RoleId, TeamId};
use serde::Deserialize;

/// One ability slot's submitted customization, keyed by the slot's binding.
#[derive(Debug, Clone, Deserialize)]
pub struct AbilitySlotInput {
    pub key_binding: KeyBinding,
    pub name: String,
    pub description: String,
}

/// Everything a profile create/edit form submits.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileSubmission {
    pub in_game_name: String,
    #[serde(default)]
    pub riot_id: String,
    #[serde(default)]
    pub riot_tag: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
    #[serde(default)]
    pub picture_url: Option<String>,
    #[serde(default)]
    pub team_id: Option<TeamId>,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub agent_ids: Vec<AgentId>,
    #[serde(default)]
    pub role_ids: Vec<RoleId>,
    #[serde(default)]
    pub map_ids: Vec<MapId>,
    #[serde(default)]
    pub abilities: Vec<AbilitySlotInput>,
}

impl ProfileSubmission {
    pub fn riot_identity(&self) -> RiotIdentity {
        RiotIdentity::new(self.riot_id.clone(), self.riot_tag.as_deref())
    }

    /// First submitted entry for a slot, if any.
    pub fn slot(&self, key: KeyBinding) -> Option<&AbilitySlotInput> {
        self.abilities.iter().find(|a| a.key_binding == key)
    }
}

#[cfg(test)]
impl ProfileSubmission {
    /// Minimal submission for tests.
    pub fn named(in_game_name: &str) -> Self {
        Self {
            in_game_name: in_game_name.to_string(),
            riot_id: String::new(),
            riot_tag: None,
            picture: None,
            picture_url: None,
            team_id: None,
            bio: String::new(),
            agent_ids: Vec::new(),
            role_ids: Vec::new(),
            map_ids: Vec::new(),
            abilities: Vec::new(),
        }
    }
}
