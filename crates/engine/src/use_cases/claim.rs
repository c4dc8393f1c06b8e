//! Profile claim - taking ownership of an unclaimed directory entry.
//!
//! Ownership is a one-way transition: Unclaimed -> Claimed, guarded by a
//! single function so the create and claim paths cannot drift apart. A
//! claimed profile never returns to Unclaimed through this subsystem.

use std::sync::Arc;

use lineup_domain::{Profile, ProfileId, UserId};

use crate::infrastructure::ports::{ProfileRepo, RepoError, UserRiotRepo};

/// Why a claim attempt was rejected. Each variant maps to a different
/// redirect in the web layer.
#[derive(Debug, thiserror::Error)]
pub enum ClaimError {
    #[error("Profile not found")]
    NotFound,

    #[error("This profile has already been claimed")]
    AlreadyClaimed,

    #[error("You already own a profile")]
    AlreadyOwnsProfile { existing: ProfileId },

    #[error("No Riot ID is linked to your account")]
    NoLinkedIdentity,

    #[error("Your Riot ID does not match this profile")]
    IdentityMismatch,

    #[error(transparent)]
    Repo(#[from] RepoError),
}

#[derive(Clone)]
pub struct ClaimProfile {
    profiles: Arc<dyn ProfileRepo>,
    user_riot: Arc<dyn UserRiotRepo>,
}

impl ClaimProfile {
    pub fn new(profiles: Arc<dyn ProfileRepo>, user_riot: Arc<dyn UserRiotRepo>) -> Self {
        Self {
            profiles,
            user_riot,
        }
    }

    /// Attempt to claim `profile_id` for `user_id`.
    ///
    /// Succeeds if and only if the target is unclaimed, the requester owns
    /// no profile, and the requester's stored riot identity matches the
    /// target's (case-insensitive, absent tag == empty tag). On success only
    /// the ownership field is persisted. Non-matching attempts change
    /// nothing and can be retried.
    pub async fn execute(
        &self,
        user_id: UserId,
        profile_id: ProfileId,
    ) -> Result<Profile, ClaimError> {
        let mut profile = self
            .profiles
            .get(profile_id)
            .await?
            .ok_or(ClaimError::NotFound)?;

        if profile.is_claimed() {
            return Err(ClaimError::AlreadyClaimed);
        }

        if let Some(existing) = self.profiles.find_by_user(user_id).await? {
            return Err(ClaimError::AlreadyOwnsProfile {
                existing: existing.id,
            });
        }

        let stored = self
            .user_riot
            .get(user_id)
            .await?
            .ok_or(ClaimError::NoLinkedIdentity)?;
        let identity = stored.riot_identity();
        if identity.is_empty() {
            return Err(ClaimError::NoLinkedIdentity);
        }

        if !identity.matches(&profile.riot_identity()) {
            return Err(ClaimError::IdentityMismatch);
        }

        // Conditional write; a racing claimant may have won since the read.
        if !self.profiles.assign_owner(profile_id, user_id).await? {
            return Err(ClaimError::AlreadyClaimed);
        }

        profile.user_id = Some(user_id);
        tracing::info!(profile_id = %profile_id, user_id = %user_id, "Profile claimed");
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{MockProfileRepo, MockUserRiotRepo};
    use chrono::{TimeZone, Utc};
    use lineup_domain::UserRiot;

    fn unclaimed_profile(riot_id: &str, riot_tag: Option<&str>) -> Profile {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let mut profile = Profile::new("Phantom", now);
        profile.riot_id = riot_id.to_string();
        profile.riot_tag = riot_tag.map(str::to_string);
        profile
    }

    fn stored_identity(user_id: UserId, riot_id: &str, riot_tag: Option<&str>) -> UserRiot {
        UserRiot::new(user_id, riot_id, riot_tag.map(str::to_string))
    }

    #[tokio::test]
    async fn matching_identity_claims_the_profile() {
        let target = unclaimed_profile("Tyloo", Some("#NA1"));
        let target_id = target.id;
        let user_id = UserId::new();

        let mut profiles = MockProfileRepo::new();
        profiles
            .expect_get()
            .returning(move |_| Ok(Some(target.clone())));
        profiles.expect_find_by_user().returning(|_| Ok(None));
        profiles
            .expect_assign_owner()
            .withf(move |id, user| *id == target_id && *user == user_id)
            .returning(|_, _| Ok(true));

        let mut user_riot = MockUserRiotRepo::new();
        // Case differs from the stored profile; the match is case-insensitive.
        user_riot
            .expect_get()
            .returning(move |_| Ok(Some(stored_identity(user_id, "tyloo", Some("#na1")))));

        let claim = ClaimProfile::new(Arc::new(profiles), Arc::new(user_riot));
        let claimed = claim.execute(user_id, target_id).await.unwrap();

        assert_eq!(claimed.user_id, Some(user_id));
    }

    #[tokio::test]
    async fn claimed_target_is_rejected() {
        let mut target = unclaimed_profile("Tyloo", Some("#NA1"));
        target.user_id = Some(UserId::new());
        let target_id = target.id;

        let mut profiles = MockProfileRepo::new();
        profiles
            .expect_get()
            .returning(move |_| Ok(Some(target.clone())));

        let user_riot = MockUserRiotRepo::new();

        let claim = ClaimProfile::new(Arc::new(profiles), Arc::new(user_riot));
        let result = claim.execute(UserId::new(), target_id).await;

        assert!(matches!(result, Err(ClaimError::AlreadyClaimed)));
    }

    #[tokio::test]
    async fn requester_with_a_profile_is_rejected() {
        let target = unclaimed_profile("Tyloo", Some("#NA1"));
        let target_id = target.id;
        let owned = unclaimed_profile("Other", None);
        let owned_id = owned.id;

        let mut profiles = MockProfileRepo::new();
        profiles
            .expect_get()
            .returning(move |_| Ok(Some(target.clone())));
        profiles
            .expect_find_by_user()
            .returning(move |_| Ok(Some(owned.clone())));

        let user_riot = MockUserRiotRepo::new();

        let claim = ClaimProfile::new(Arc::new(profiles), Arc::new(user_riot));
        let result = claim.execute(UserId::new(), target_id).await;

        match result {
            Err(ClaimError::AlreadyOwnsProfile { existing }) => assert_eq!(existing, owned_id),
            other => panic!("expected AlreadyOwnsProfile, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_stored_identity_is_rejected() {
        let target = unclaimed_profile("Tyloo", Some("#NA1"));
        let target_id = target.id;

        let mut profiles = MockProfileRepo::new();
        profiles
            .expect_get()
            .returning(move |_| Ok(Some(target.clone())));
        profiles.expect_find_by_user().returning(|_| Ok(None));

        let mut user_riot = MockUserRiotRepo::new();
        user_riot.expect_get().returning(|_| Ok(None));

        let claim = ClaimProfile::new(Arc::new(profiles), Arc::new(user_riot));
        let result = claim.execute(UserId::new(), target_id).await;

        assert!(matches!(result, Err(ClaimError::NoLinkedIdentity)));
    }

    #[tokio::test]
    async fn empty_stored_identity_is_rejected() {
        let target = unclaimed_profile("", None);
        let target_id = target.id;
        let user_id = UserId::new();

        let mut profiles = MockProfileRepo::new();
        profiles
            .expect_get()
            .returning(move |_| Ok(Some(target.clone())));
        profiles.expect_find_by_user().returning(|_| Ok(None));

        let mut user_riot = MockUserRiotRepo::new();
        user_riot
            .expect_get()
            .returning(move |_| Ok(Some(stored_identity(user_id, "", None))));

        // An empty identity must not "match" a profile with an empty riot_id.
        let claim = ClaimProfile::new(Arc::new(profiles), Arc::new(user_riot));
        let result = claim.execute(user_id, target_id).await;

        assert!(matches!(result, Err(ClaimError::NoLinkedIdentity)));
    }

    #[tokio::test]
    async fn mismatched_identity_is_rejected() {
        let target = unclaimed_profile("Tyloo", Some("#NA1"));
        let target_id = target.id;
        let user_id = UserId::new();

        let mut profiles = MockProfileRepo::new();
        profiles
            .expect_get()
            .returning(move |_| Ok(Some(target.clone())));
        profiles.expect_find_by_user().returning(|_| Ok(None));

        let mut user_riot = MockUserRiotRepo::new();
        user_riot
            .expect_get()
            .returning(move |_| Ok(Some(stored_identity(user_id, "Tyloo", Some("#EU1")))));

        let claim = ClaimProfile::new(Arc::new(profiles), Arc::new(user_riot));
        let result = claim.execute(user_id, target_id).await;

        assert!(matches!(result, Err(ClaimError::IdentityMismatch)));
    }

    #[tokio::test]
    async fn losing_the_claim_race_reports_already_claimed() {
        let target = unclaimed_profile("Tyloo", Some("#NA1"));
        let target_id = target.id;
        let user_id = UserId::new();

        let mut profiles = MockProfileRepo::new();
        profiles
            .expect_get()
            .returning(move |_| Ok(Some(target.clone())));
        profiles.expect_find_by_user().returning(|_| Ok(None));
        // Another claimant won between the read and the write.
        profiles.expect_assign_owner().returning(|_, _| Ok(false));

        let mut user_riot = MockUserRiotRepo::new();
        user_riot
            .expect_get()
            .returning(move |_| Ok(Some(stored_identity(user_id, "Tyloo", Some("#NA1")))));

        let claim = ClaimProfile::new(Arc::new(profiles), Arc::new(user_riot));
        let result = claim.execute(user_id, target_id).await;

        assert!(matches!(result, Err(ClaimError::AlreadyClaimed)));
    }

    #[tokio::test]
    async fn absent_tag_matches_empty_tag() {
        let target = unclaimed_profile("Tyloo", Some(""));
        let target_id = target.id;
        let user_id = UserId::new();

        let mut profiles = MockProfileRepo::new();
        profiles
            .expect_get()
            .returning(move |_| Ok(Some(target.clone())));
        profiles.expect_find_by_user().returning(|_| Ok(None));
        profiles.expect_assign_owner().returning(|_, _| Ok(true));

        let mut user_riot = MockUserRiotRepo::new();
        user_riot
            .expect_get()
            .returning(move |_| Ok(Some(stored_identity(user_id, "Tyloo", None))));

        let claim = ClaimProfile::new(Arc::new(profiles), Arc::new(user_riot));
        let claimed = claim.execute(user_id, target_id).await.unwrap();

        assert_eq!(claimed.user_id, Some(user_id));
    }
}
