//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::ports::{
    AbilityRepo, AbilityTemplateRepo, AgentRepo, ClockPort, MapRepo, ProfileRepo, RoleRepo,
    TeamRepo, UserRiotRepo,
};
use crate::use_cases::{
    ClaimProfile, DeleteProfile, SaveProfile, SyncAbilities, ValidateIdentity,
};

/// Main application state.
///
/// Holds the repository ports and use cases. Passed to HTTP handlers via
/// Axum state.
pub struct App {
    pub repositories: Repositories,
    pub use_cases: UseCases,
}

/// Container for all repository ports, injected directly as trait objects.
pub struct Repositories {
    pub role: Arc<dyn RoleRepo>,
    pub agent: Arc<dyn AgentRepo>,
    pub team: Arc<dyn TeamRepo>,
    pub game_map: Arc<dyn MapRepo>,
    pub ability_template: Arc<dyn AbilityTemplateRepo>,
    pub profile: Arc<dyn ProfileRepo>,
    pub ability: Arc<dyn AbilityRepo>,
    pub user_riot: Arc<dyn UserRiotRepo>,
}

/// Container for all use cases.
pub struct UseCases {
    pub validate_identity: ValidateIdentity,
    pub save_profile: SaveProfile,
    pub delete_profile: DeleteProfile,
    pub claim_profile: ClaimProfile,
    pub sync_abilities: SyncAbilities,
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(repositories: Repositories, clock: Arc<dyn ClockPort>) -> Self {
        let validate_identity = ValidateIdentity::new(repositories.profile.clone());
        let sync_abilities = SyncAbilities::new(
            repositories.ability_template.clone(),
            repositories.ability.clone(),
        );
        let save_profile = SaveProfile::new(
            repositories.profile.clone(),
            repositories.team.clone(),
            repositories.agent.clone(),
            repositories.role.clone(),
            repositories.game_map.clone(),
            validate_identity.clone(),
            sync_abilities.clone(),
            clock,
        );
        let delete_profile = DeleteProfile::new(repositories.profile.clone());
        let claim_profile = ClaimProfile::new(
            repositories.profile.clone(),
            repositories.user_riot.clone(),
        );

        Self {
            repositories,
            use_cases: UseCases {
                validate_identity,
                save_profile,
                delete_profile,
                claim_profile,
                sync_abilities,
            },
        }
    }
}
