//! Use cases - user story orchestration.
//!
//! Each module contains the use cases for one area of the directory. Use
//! cases orchestrate across repository ports to fulfill user stories.

pub mod abilities;
pub mod claim;
pub mod profile;
pub mod submission;
pub mod validation;

pub use abilities::SyncAbilities;
pub use claim::{ClaimError, ClaimProfile};
pub use profile::{DeleteError, DeleteProfile, SaveError, SaveOutcome, SaveProfile};
pub use submission::{AbilitySlotInput, ProfileSubmission};
pub use validation::{FieldError, ValidateIdentity};
