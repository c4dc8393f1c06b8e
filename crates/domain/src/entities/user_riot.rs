//! Stored external identity for a user account.

use serde::{Deserialize, Serialize};

use crate::ids::UserId;
use crate::value_objects::RiotIdentity;

/// The riot identity an account claims to own.
///
/// One row per user, independent of any profile. Read during signup prefill
/// and by the claim flow as the ownership proof.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRiot {
    pub user_id: UserId,
    pub riot_id: String,
    pub riot_tag: Option<String>,
}

impl UserRiot {
    pub fn new(user_id: UserId, riot_id: impl Into<String>, riot_tag: Option<String>) -> Self {
        Self {
            user_id,
            riot_id: riot_id.into(),
            riot_tag,
        }
    }

    pub fn riot_identity(&self) -> RiotIdentity {
        RiotIdentity::new(self.riot_id.clone(), self.riot_tag.as_deref())
    }
}
