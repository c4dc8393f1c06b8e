//! Value objects shared across entities.

mod riot;

pub use riot::RiotIdentity;
