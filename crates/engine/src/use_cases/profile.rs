//! Profile create/edit/delete orchestration.
//!
//! Mirrors the request flow: validate, check reference selections, persist
//! scalar fields, then synchronize many-to-many links and ability rows.

use std::collections::HashSet;
use std::hash::Hash;
use std::sync::Arc;

use serde::Serialize;

use lineup_domain::{Profile, ProfileId, UserId, MAX_MAP_SELECTIONS};

use crate::infrastructure::ports::{
    AgentRepo, ClockPort, MapRepo, ProfileRepo, RepoError, RoleRepo, TeamRepo,
};
use crate::use_cases::abilities::SyncAbilities;
use crate::use_cases::submission::ProfileSubmission;
use crate::use_cases::validation::{FieldError, ValidateIdentity};

#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    #[error("You do not have permission to modify this profile")]
    Forbidden,

    #[error("You already have a profile")]
    AlreadyOwnsProfile { existing: ProfileId },

    #[error("Profile not found")]
    NotFound,

    #[error(transparent)]
    Repo(#[from] RepoError),
}

/// A persisted profile plus non-fatal warnings (e.g. dropped map selections).
#[derive(Debug, Clone, Serialize)]
pub struct SaveOutcome {
    pub profile: Profile,
    pub warnings: Vec<String>,
}

#[derive(Clone)]
pub struct SaveProfile {
    profiles: Arc<dyn ProfileRepo>,
    teams: Arc<dyn TeamRepo>,
    agents: Arc<dyn AgentRepo>,
    roles: Arc<dyn RoleRepo>,
    maps: Arc<dyn MapRepo>,
    validate: ValidateIdentity,
    sync_abilities: SyncAbilities,
    clock: Arc<dyn ClockPort>,
}

impl SaveProfile {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        profiles: Arc<dyn ProfileRepo>,
        teams: Arc<dyn TeamRepo>,
        agents: Arc<dyn AgentRepo>,
        roles: Arc<dyn RoleRepo>,
        maps: Arc<dyn MapRepo>,
        validate: ValidateIdentity,
        sync_abilities: SyncAbilities,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            profiles,
            teams,
            agents,
            roles,
            maps,
            validate,
            sync_abilities,
            clock,
        }
    }

    /// Create a new profile. When `user` is present, the profile is owned
    /// from the start; a user may own at most one.
    pub async fn create(
        &self,
        submission: &ProfileSubmission,
        user: Option<UserId>,
    ) -> Result<SaveOutcome, SaveError> {
        if let Some(user_id) = user {
            if let Some(existing) = self.profiles.find_by_user(user_id).await? {
                return Err(SaveError::AlreadyOwnsProfile {
                    existing: existing.id,
                });
            }
        }

        let (selections, warnings, errors) = self.prepare(submission, None).await?;
        if !errors.is_empty() {
            return Err(SaveError::Validation(errors));
        }

        let now = self.clock.now();
        let mut profile = Profile::new(submission.in_game_name.trim(), now);
        profile.user_id = user;
        apply_submission(&mut profile, submission, &selections);

        self.persist(&mut profile, submission, &selections).await?;
        tracing::info!(profile_id = %profile.id, "Profile created");

        Ok(SaveOutcome { profile, warnings })
    }

    /// Edit an existing profile. Owned profiles may only be edited by their
    /// owner; unclaimed directory entries are open to edit.
    pub async fn update(
        &self,
        id: ProfileId,
        submission: &ProfileSubmission,
        user: Option<UserId>,
    ) -> Result<SaveOutcome, SaveError> {
        let mut profile = self.profiles.get(id).await?.ok_or(SaveError::NotFound)?;

        if profile.is_claimed() && profile.user_id != user {
            return Err(SaveError::Forbidden);
        }

        let (selections, warnings, errors) = self.prepare(submission, Some(id)).await?;
        if !errors.is_empty() {
            return Err(SaveError::Validation(errors));
        }

        profile.in_game_name = submission.in_game_name.trim().to_string();
        profile.updated_at = self.clock.now();
        apply_submission(&mut profile, submission, &selections);

        self.persist(&mut profile, submission, &selections).await?;
        tracing::info!(profile_id = %profile.id, "Profile updated");

        Ok(SaveOutcome { profile, warnings })
    }

    /// Validation plus reference-existence checks and map truncation.
    async fn prepare(
        &self,
        submission: &ProfileSubmission,
        editing: Option<ProfileId>,
    ) -> Result<(Selections, Vec<String>, Vec<FieldError>), SaveError> {
        let mut errors = self.validate.execute(submission, editing).await?;

        let agent_ids = dedup(&submission.agent_ids);
        let role_ids = dedup(&submission.role_ids);
        let mut map_ids = dedup(&submission.map_ids);

        let mut warnings = Vec::new();
        if map_ids.len() > MAX_MAP_SELECTIONS {
            map_ids.truncate(MAX_MAP_SELECTIONS);
            warnings.push(format!(
                "Only the first {MAX_MAP_SELECTIONS} map selections were kept."
            ));
        }

        if let Some(team_id) = submission.team_id {
            if self.teams.get(team_id).await?.is_none() {
                errors.push(FieldError::new("team_id", "Unknown team selected."));
            }
        }
        for agent_id in &agent_ids {
            if self.agents.get(*agent_id).await?.is_none() {
                errors.push(FieldError::new("agent_ids", "Unknown agent selected."));
                break;
            }
        }
        for role_id in &role_ids {
            if self.roles.get(*role_id).await?.is_none() {
                errors.push(FieldError::new("role_ids", "Unknown role selected."));
                break;
            }
        }
        for map_id in &map_ids {
            if self.maps.get(*map_id).await?.is_none() {
                errors.push(FieldError::new("map_ids", "Unknown map selected."));
                break;
            }
        }

        let selections = Selections {
            agent_ids,
            role_ids,
            map_ids,
        };
        Ok((selections, warnings, errors))
    }

    async fn persist(
        &self,
        profile: &mut Profile,
        submission: &ProfileSubmission,
        selections: &Selections,
    ) -> Result<(), RepoError> {
        self.profiles.save(profile).await?;
        self.profiles
            .set_agents(profile.id, &selections.agent_ids)
            .await?;
        self.profiles
            .set_roles(profile.id, &selections.role_ids)
            .await?;
        self.profiles
            .set_maps(profile.id, &selections.map_ids)
            .await?;

        profile.abilities = self.sync_abilities.execute(profile.id, submission).await?;
        Ok(())
    }
}

struct Selections {
    agent_ids: Vec<lineup_domain::AgentId>,
    role_ids: Vec<lineup_domain::RoleId>,
    map_ids: Vec<lineup_domain::MapId>,
}

fn apply_submission(profile: &mut Profile, submission: &ProfileSubmission, selections: &Selections) {
    profile.riot_id = submission.riot_id.clone();
    profile.riot_tag = submission
        .riot_tag
        .clone()
        .filter(|tag| !tag.is_empty());
    profile.picture = submission.picture.clone();
    profile.picture_url = submission.picture_url.clone();
    profile.team_id = submission.team_id;
    profile.bio = submission.bio.clone();
    profile.agent_ids = selections.agent_ids.clone();
    profile.role_ids = selections.role_ids.clone();
    profile.map_ids = selections.map_ids.clone();
}

/// First-occurrence dedup, preserving submission order.
fn dedup<T: Eq + Hash + Copy>(ids: &[T]) -> Vec<T> {
    let mut seen = HashSet::new();
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteError {
    #[error("Profile not found")]
    NotFound,

    #[error("You do not have permission to delete this profile")]
    Forbidden,

    #[error(transparent)]
    Repo(#[from] RepoError),
}

#[derive(Clone)]
pub struct DeleteProfile {
    profiles: Arc<dyn ProfileRepo>,
}

impl DeleteProfile {
    pub fn new(profiles: Arc<dyn ProfileRepo>) -> Self {
        Self { profiles }
    }

    pub async fn execute(&self, id: ProfileId, user: Option<UserId>) -> Result<(), DeleteError> {
        let profile = self.profiles.get(id).await?.ok_or(DeleteError::NotFound)?;

        if profile.is_claimed() && profile.user_id != user {
            return Err(DeleteError::Forbidden);
        }

        self.profiles.delete(id).await?;
        tracing::info!(profile_id = %id, "Profile deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{
        MockAbilityRepo, MockAbilityTemplateRepo, MockAgentRepo, MockClockPort, MockMapRepo,
        MockProfileRepo, MockRoleRepo, MockTeamRepo,
    };
    use chrono::{TimeZone, Utc};
    use lineup_domain::{GameMap, MapId, Profile};

    struct Mocks {
        profiles: MockProfileRepo,
        teams: MockTeamRepo,
        agents: MockAgentRepo,
        roles: MockRoleRepo,
        maps: MockMapRepo,
        templates: MockAbilityTemplateRepo,
        abilities: MockAbilityRepo,
        clock: MockClockPort,
    }

    impl Mocks {
        fn new() -> Self {
            Self {
                profiles: MockProfileRepo::new(),
                teams: MockTeamRepo::new(),
                agents: MockAgentRepo::new(),
                roles: MockRoleRepo::new(),
                maps: MockMapRepo::new(),
                templates: MockAbilityTemplateRepo::new(),
                abilities: MockAbilityRepo::new(),
                clock: MockClockPort::new(),
            }
        }

        fn into_save_profile(self) -> SaveProfile {
            let profiles = Arc::new(self.profiles);
            SaveProfile::new(
                profiles.clone(),
                Arc::new(self.teams),
                Arc::new(self.agents),
                Arc::new(self.roles),
                Arc::new(self.maps),
                ValidateIdentity::new(profiles),
                SyncAbilities::new(Arc::new(self.templates), Arc::new(self.abilities)),
                Arc::new(self.clock),
            )
        }
    }

    fn now() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn expect_clean_validation(mocks: &mut Mocks) {
        mocks
            .profiles
            .expect_name_taken()
            .returning(|_, _| Ok(false));
        mocks
            .profiles
            .expect_list_by_riot_id()
            .returning(|_| Ok(Vec::new()));
    }

    fn expect_persist(mocks: &mut Mocks) {
        mocks.profiles.expect_save().returning(|_| Ok(()));
        mocks.profiles.expect_set_agents().returning(|_, _| Ok(()));
        mocks.profiles.expect_set_roles().returning(|_, _| Ok(()));
        mocks.profiles.expect_set_maps().returning(|_, _| Ok(()));
        mocks.templates.expect_list().returning(|| Ok(Vec::new()));
        mocks
            .abilities
            .expect_replace_for_profile()
            .returning(|_, _| Ok(()));
    }

    #[tokio::test]
    async fn create_persists_a_clean_submission() {
        let mut mocks = Mocks::new();
        expect_clean_validation(&mut mocks);
        expect_persist(&mut mocks);
        mocks.clock.expect_now().returning(now);

        let save = mocks.into_save_profile();
        let submission = ProfileSubmission::named("Phantom");
        let outcome = save.create(&submission, None).await.unwrap();

        assert_eq!(outcome.profile.in_game_name, "Phantom");
        assert!(outcome.profile.user_id.is_none());
        assert!(outcome.warnings.is_empty());
    }

    #[tokio::test]
    async fn create_rejects_second_profile_for_user() {
        let user_id = UserId::new();
        let existing = Profile::new("Mine", now());
        let existing_id = existing.id;

        let mut mocks = Mocks::new();
        mocks
            .profiles
            .expect_find_by_user()
            .returning(move |_| Ok(Some(existing.clone())));

        let save = mocks.into_save_profile();
        let submission = ProfileSubmission::named("Phantom");
        let result = save.create(&submission, Some(user_id)).await;

        match result {
            Err(SaveError::AlreadyOwnsProfile { existing }) => assert_eq!(existing, existing_id),
            other => panic!("expected AlreadyOwnsProfile, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn create_rejects_unknown_map_selection() {
        let mut mocks = Mocks::new();
        expect_clean_validation(&mut mocks);
        mocks.maps.expect_get().returning(|_| Ok(None));

        let save = mocks.into_save_profile();
        let mut submission = ProfileSubmission::named("Phantom");
        submission.map_ids = vec![MapId::new()];

        let result = save.create(&submission, None).await;

        match result {
            Err(SaveError::Validation(errors)) => {
                assert!(errors.iter().any(|e| e.field == "map_ids"));
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn extra_map_selections_are_truncated_with_a_warning() {
        let mut mocks = Mocks::new();
        expect_clean_validation(&mut mocks);
        expect_persist(&mut mocks);
        mocks.clock.expect_now().returning(now);
        mocks
            .maps
            .expect_get()
            .returning(|id| Ok(Some(GameMap { id, name: "Ascent".into(), icon_url: None })));

        let save = mocks.into_save_profile();
        let mut submission = ProfileSubmission::named("Phantom");
        submission.map_ids = (0..5).map(|_| MapId::new()).collect();
        let kept: Vec<_> = submission.map_ids[..3].to_vec();

        let outcome = save.create(&submission, None).await.unwrap();

        assert_eq!(outcome.profile.map_ids, kept);
        assert_eq!(outcome.warnings.len(), 1);
    }

    #[tokio::test]
    async fn exactly_three_maps_pass_without_warning() {
        let mut mocks = Mocks::new();
        expect_clean_validation(&mut mocks);
        expect_persist(&mut mocks);
        mocks.clock.expect_now().returning(now);
        mocks
            .maps
            .expect_get()
            .returning(|id| Ok(Some(GameMap { id, name: "Ascent".into(), icon_url: None })));

        let save = mocks.into_save_profile();
        let mut submission = ProfileSubmission::named("Phantom");
        submission.map_ids = (0..3).map(|_| MapId::new()).collect();

        let outcome = save.create(&submission, None).await.unwrap();

        assert_eq!(outcome.profile.map_ids.len(), 3);
        assert!(outcome.warnings.is_empty());
    }

    #[tokio::test]
    async fn update_by_non_owner_is_forbidden() {
        let mut target = Profile::new("Phantom", now());
        target.user_id = Some(UserId::new());
        let target_id = target.id;

        let mut mocks = Mocks::new();
        mocks
            .profiles
            .expect_get()
            .returning(move |_| Ok(Some(target.clone())));

        let save = mocks.into_save_profile();
        let submission = ProfileSubmission::named("Phantom");
        let result = save.update(target_id, &submission, Some(UserId::new())).await;

        assert!(matches!(result, Err(SaveError::Forbidden)));
    }

    #[tokio::test]
    async fn update_of_unclaimed_profile_is_open() {
        let target = Profile::new("Phantom", now());
        let target_id = target.id;

        let mut mocks = Mocks::new();
        mocks
            .profiles
            .expect_get()
            .returning(move |_| Ok(Some(target.clone())));
        expect_clean_validation(&mut mocks);
        expect_persist(&mut mocks);
        mocks.clock.expect_now().returning(now);

        let save = mocks.into_save_profile();
        let mut submission = ProfileSubmission::named("Spectre");
        submission.bio = "New bio".to_string();

        let outcome = save.update(target_id, &submission, None).await.unwrap();

        assert_eq!(outcome.profile.in_game_name, "Spectre");
        assert_eq!(outcome.profile.bio, "New bio");
    }

    #[tokio::test]
    async fn update_missing_profile_is_not_found() {
        let mut mocks = Mocks::new();
        mocks.profiles.expect_get().returning(|_| Ok(None));

        let save = mocks.into_save_profile();
        let submission = ProfileSubmission::named("Phantom");
        let result = save.update(ProfileId::new(), &submission, None).await;

        assert!(matches!(result, Err(SaveError::NotFound)));
    }

    #[tokio::test]
    async fn delete_by_owner_succeeds() {
        let user_id = UserId::new();
        let mut target = Profile::new("Phantom", now());
        target.user_id = Some(user_id);
        let target_id = target.id;

        let mut profiles = MockProfileRepo::new();
        profiles
            .expect_get()
            .returning(move |_| Ok(Some(target.clone())));
        profiles.expect_delete().returning(|_| Ok(()));

        let delete = DeleteProfile::new(Arc::new(profiles));
        assert!(delete.execute(target_id, Some(user_id)).await.is_ok());
    }

    #[tokio::test]
    async fn delete_by_non_owner_is_forbidden() {
        let mut target = Profile::new("Phantom", now());
        target.user_id = Some(UserId::new());
        let target_id = target.id;

        let mut profiles = MockProfileRepo::new();
        profiles
            .expect_get()
            .returning(move |_| Ok(Some(target.clone())));

        let delete = DeleteProfile::new(Arc::new(profiles));
        let result = delete.execute(target_id, Some(UserId::new())).await;

        assert!(matches!(result, Err(DeleteError::Forbidden)));
    }
}
