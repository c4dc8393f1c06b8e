//! SQLite-backed persistence.

pub mod ability_repo;
pub mod ability_template_repo;
pub mod agent_repo;
pub mod connection;
pub mod map_repo;
pub mod profile_repo;
pub mod role_repo;
pub mod seed;
pub mod team_repo;
pub mod user_riot_repo;


pub use ability_repo::SqliteAbilityRepo;
pub use ability_template_repo::SqliteAbilityTemplateRepo;
pub use agent_repo::SqliteAgentRepo;
pub use connection::{connect, ensure_schema};
pub use map_repo::SqliteMapRepo;
pub use profile_repo::SqliteProfileRepo;
pub use role_repo::SqliteRoleRepo;
pub use team_repo::SqliteTeamRepo;
pub use user_riot_repo::SqliteUserRiotRepo;

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::app::Repositories;

/// Wire every repository port to its SQLite implementation.
pub fn build_repositories(pool: SqlitePool) -> Repositories {
    Repositories {
        role: Arc::new(SqliteRoleRepo::new(pool.clone())),
        agent: Arc::new(SqliteAgentRepo::new(pool.clone())),
        team: Arc::new(SqliteTeamRepo::new(pool.clone())),
        game_map: Arc::new(SqliteMapRepo::new(pool.clone())),
        ability_template: Arc::new(SqliteAbilityTemplateRepo::new(pool.clone())),
        profile: Arc::new(SqliteProfileRepo::new(pool.clone())),
        ability: Arc::new(SqliteAbilityRepo::new(pool.clone())),
        user_riot: Arc::new(SqliteUserRiotRepo::new(pool)),
    }
}
