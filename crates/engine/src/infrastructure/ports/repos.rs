//! Repository port traits for database access.

use async_trait::async_trait;
use lineup_domain::{
    Ability, AbilityTemplate, Agent, AgentId, GameMap, KeyBinding, MapId, Profile, ProfileId,
    Role, RoleId, Team, TeamId, UserId, UserRiot,
};

use super::error::RepoError;

// =============================================================================
// Reference Data Ports (admin-curated, read-mostly)
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoleRepo: Send + Sync {
    async fn get(&self, id: RoleId) -> Result<Option<Role>, RepoError>;
    /// Ordered by name.
    async fn list(&self) -> Result<Vec<Role>, RepoError>;
    async fn save(&self, role: &Role) -> Result<(), RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AgentRepo: Send + Sync {
    async fn get(&self, id: AgentId) -> Result<Option<Agent>, RepoError>;
    /// Ordered by name.
    async fn list(&self) -> Result<Vec<Agent>, RepoError>;
    async fn save(&self, agent: &Agent) -> Result<(), RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TeamRepo: Send + Sync {
    async fn get(&self, id: TeamId) -> Result<Option<Team>, RepoError>;
    /// Ordered by custom_order, then name.
    async fn list(&self) -> Result<Vec<Team>, RepoError>;
    async fn save(&self, team: &Team) -> Result<(), RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MapRepo: Send + Sync {
    async fn get(&self, id: MapId) -> Result<Option<GameMap>, RepoError>;
    /// Ordered by name.
    async fn list(&self) -> Result<Vec<GameMap>, RepoError>;
    async fn save(&self, map: &GameMap) -> Result<(), RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AbilityTemplateRepo: Send + Sync {
    /// Ordered by key binding.
    async fn list(&self) -> Result<Vec<AbilityTemplate>, RepoError>;
    async fn find_by_key(&self, key: KeyBinding) -> Result<Option<AbilityTemplate>, RepoError>;
    async fn save(&self, template: &AbilityTemplate) -> Result<(), RepoError>;
}

// =============================================================================
// Profile Ports
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepo: Send + Sync {
    // CRUD over the scalar fields; selections are synchronized separately.
    async fn get(&self, id: ProfileId) -> Result<Option<Profile>, RepoError>;
    /// Newest first.
    async fn list(&self) -> Result<Vec<Profile>, RepoError>;
    async fn save(&self, profile: &Profile) -> Result<(), RepoError>;
    async fn delete(&self, id: ProfileId) -> Result<(), RepoError>;

    // Identity-uniqueness queries
    /// Case-insensitive name lookup, optionally excluding the profile under edit.
    async fn name_taken(
        &self,
        in_game_name: &str,
        exclude: Option<ProfileId>,
    ) -> Result<bool, RepoError>;
    /// Case-insensitive riot_id lookup. Tag comparison is the caller's job.
    async fn list_by_riot_id(&self, riot_id: &str) -> Result<Vec<Profile>, RepoError>;

    // Ownership
    async fn find_by_user(&self, user_id: UserId) -> Result<Option<Profile>, RepoError>;
    /// Conditional ownership write: succeeds only while the profile is
    /// unclaimed. Returns false when another owner got there first.
    async fn assign_owner(&self, id: ProfileId, user_id: UserId) -> Result<bool, RepoError>;

    // Selections (replace-all semantics)
    async fn set_agents(&self, id: ProfileId, agent_ids: &[AgentId]) -> Result<(), RepoError>;
    async fn set_roles(&self, id: ProfileId, role_ids: &[RoleId]) -> Result<(), RepoError>;
    async fn set_maps(&self, id: ProfileId, map_ids: &[MapId]) -> Result<(), RepoError>;

    // Directory queries
    async fn list_by_team(&self, team_id: TeamId) -> Result<Vec<Profile>, RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AbilityRepo: Send + Sync {
    /// Ordered by the slot's key binding.
    async fn list_for_profile(&self, profile_id: ProfileId) -> Result<Vec<Ability>, RepoError>;
    /// Destructive replace: drops every existing row, inserts the given set.
    async fn replace_for_profile(
        &self,
        profile_id: ProfileId,
        abilities: &[Ability],
    ) -> Result<(), RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRiotRepo: Send + Sync {
    async fn get(&self, user_id: UserId) -> Result<Option<UserRiot>, RepoError>;
    async fn upsert(&self, identity: &UserRiot) -> Result<(), RepoError>;
}
