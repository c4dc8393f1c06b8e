//! Lineup Domain - core types for the player-profile directory.
//!
//! This crate holds the entities, typed ids, and value objects shared by the
//! engine. It stays dependency-light: no I/O, no async, no framework types.

pub mod entities;
pub mod error;
pub mod ids;
pub mod value_objects;

pub use entities::{
    Ability, AbilityTemplate, Agent, GameMap, KeyBinding, Profile, Role, Team, UserRiot,
    MAX_MAP_SELECTIONS,
};
pub use error::DomainError;
pub use ids::{
    AbilityId, AbilityTemplateId, AgentId, MapId, ProfileId, RoleId, TeamId, UserId,
};
pub use value_objects::RiotIdentity;
