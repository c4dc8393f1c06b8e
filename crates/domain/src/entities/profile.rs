//! Profile - the central mutable entity of the directory.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{AbilityId, AbilityTemplateId, AgentId, MapId, ProfileId, RoleId, TeamId, UserId};
use crate::value_objects::RiotIdentity;

/// Maps a profile may select. Enforced at the application layer, not the schema.
pub const MAX_MAP_SELECTIONS: usize = 3;

/// A player's public record in the directory.
///
/// `in_game_name` is not schema-unique; the validation layer enforces
/// case-insensitive uniqueness before any write. `user_id` is the ownership
/// link: `None` means the profile is unclaimed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: ProfileId,
    pub in_game_name: String,
    pub riot_id: String,
    /// `#` followed by 2-5 alphanumerics, when present.
    pub riot_tag: Option<String>,
    /// Uploaded picture path; wins over `picture_url` when both are set.
    pub picture: Option<String>,
    pub picture_url: Option<String>,
    pub team_id: Option<TeamId>,
    pub user_id: Option<UserId>,
    pub bio: String,
    pub agent_ids: Vec<AgentId>,
    pub role_ids: Vec<RoleId>,
    pub map_ids: Vec<MapId>,
    pub abilities: Vec<Ability>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    pub fn new(in_game_name: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: ProfileId::new(),
            in_game_name: in_game_name.into(),
            riot_id: String::new(),
            riot_tag: None,
            picture: None,
            picture_url: None,
            team_id: None,
            user_id: None,
            bio: String::new(),
            agent_ids: Vec::new(),
            role_ids: Vec::new(),
            map_ids: Vec::new(),
            abilities: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn riot_identity(&self) -> RiotIdentity {
        RiotIdentity::new(self.riot_id.clone(), self.riot_tag.as_deref())
    }

    pub fn is_claimed(&self) -> bool {
        self.user_id.is_some()
    }

    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.user_id == Some(user_id)
    }

    /// Picture to display: the upload when present, the external URL otherwise.
    pub fn picture_link(&self) -> Option<&str> {
        self.picture.as_deref().or(self.picture_url.as_deref())
    }
}

/// A profile owner's customization of one ability slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ability {
    pub id: AbilityId,
    pub profile_id: ProfileId,
    pub template_id: AbilityTemplateId,
    pub name: String,
    pub description: String,
}

impl Ability {
    pub fn new(
        profile_id: ProfileId,
        template_id: AbilityTemplateId,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: AbilityId::new(),
            profile_id,
            template_id,
            name: name.into(),
            description: description.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn new_profile_is_unclaimed() {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let profile = Profile::new("Phantom", now);
        assert!(!profile.is_claimed());
        assert!(profile.riot_identity().is_empty());
    }

    #[test]
    fn uploaded_picture_wins_over_url() {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let mut profile = Profile::new("Phantom", now);
        profile.picture_url = Some("https://example.com/p.png".to_string());
        assert_eq!(profile.picture_link(), Some("https://example.com/p.png"));
        profile.picture = Some("profiles/p.png".to_string());
        assert_eq!(profile.picture_link(), Some("profiles/p.png"));
    }
}
