//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is
//! concrete types. Ports exist for:
//! - Database access (could swap SQLite -> Postgres)
//! - Clock (for testing)

mod error;
mod repos;
mod testing;

pub use error::RepoError;
pub use repos::{
    AbilityRepo, AbilityTemplateRepo, AgentRepo, MapRepo, ProfileRepo, RoleRepo, TeamRepo,
    UserRiotRepo,
};
pub use testing::ClockPort;

// Test-only mock repositories (only available during test builds)
#[cfg(test)]
pub use repos::{
    MockAbilityRepo, MockAbilityTemplateRepo, MockAgentRepo, MockMapRepo, MockProfileRepo,
    MockRoleRepo, MockTeamRepo, MockUserRiotRepo,
};

#[cfg(test)]
pub use testing::MockClockPort;
