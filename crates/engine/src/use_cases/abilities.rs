//! Ability-slot synchronization.
//!
//! Keeps a profile's Ability rows consistent with the admin-defined slot
//! templates. The replace is destructive: slot text not resubmitted on an
//! edit is gone afterwards.

use std::collections::HashSet;
use std::sync::Arc;

use lineup_domain::{Ability, ProfileId};

use crate::infrastructure::ports::{AbilityRepo, AbilityTemplateRepo, RepoError};
use crate::use_cases::submission::ProfileSubmission;

#[derive(Clone)]
pub struct SyncAbilities {
    templates: Arc<dyn AbilityTemplateRepo>,
    abilities: Arc<dyn AbilityRepo>,
}

impl SyncAbilities {
    pub fn new(templates: Arc<dyn AbilityTemplateRepo>, abilities: Arc<dyn AbilityRepo>) -> Self {
        Self {
            templates,
            abilities,
        }
    }

    /// Rebuild the profile's ability rows from the submission.
    ///
    /// Walks every slot template and creates a row only when the submission
    /// supplies both a name and a description for that slot. Submitted keys
    /// with no template are ignored.
    pub async fn execute(
        &self,
        profile_id: ProfileId,
        submission: &ProfileSubmission,
    ) -> Result<Vec<Ability>, RepoError> {
        let templates = self.templates.list().await?;

        let mut seen = HashSet::new();
        let mut rows = Vec::new();
        for template in templates {
            if !seen.insert(template.key_binding) {
                continue;
            }
            let Some(slot) = submission.slot(template.key_binding) else {
                continue;
            };
            if slot.name.trim().is_empty() || slot.description.trim().is_empty() {
                continue;
            }
            rows.push(Ability::new(
                profile_id,
                template.id,
                slot.name.trim(),
                slot.description.trim(),
            ));
        }

        self.abilities.replace_for_profile(profile_id, &rows).await?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{MockAbilityRepo, MockAbilityTemplateRepo};
    use crate::use_cases::submission::AbilitySlotInput;
    use lineup_domain::{AbilityTemplate, KeyBinding};

    fn slot_templates() -> Vec<AbilityTemplate> {
        vec![
            AbilityTemplate::new("Ability 1", KeyBinding::C),
            AbilityTemplate::new("Ability 2", KeyBinding::Q),
            AbilityTemplate::new("Signature", KeyBinding::E),
            AbilityTemplate::new("Ultimate", KeyBinding::X),
        ]
    }

    fn slot(key: KeyBinding, name: &str, description: &str) -> AbilitySlotInput {
        AbilitySlotInput {
            key_binding: key,
            name: name.to_string(),
            description: description.to_string(),
        }
    }

    #[tokio::test]
    async fn builds_one_row_per_populated_slot() {
        let mut templates = MockAbilityTemplateRepo::new();
        templates.expect_list().returning(|| Ok(slot_templates()));

        let mut abilities = MockAbilityRepo::new();
        abilities
            .expect_replace_for_profile()
            .withf(|_, rows| rows.len() == 2)
            .returning(|_, _| Ok(()));

        let mut submission = ProfileSubmission::named("Phantom");
        submission.abilities = vec![
            slot(KeyBinding::Q, "Updraft", "Lift into the air"),
            slot(KeyBinding::X, "Blade Storm", "Throwing knives"),
        ];

        let sync = SyncAbilities::new(Arc::new(templates), Arc::new(abilities));
        let rows = sync
            .execute(ProfileId::new(), &submission)
            .await
            .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Updraft");
        assert_eq!(rows[1].name, "Blade Storm");
    }

    #[tokio::test]
    async fn omitted_slots_are_dropped() {
        let mut templates = MockAbilityTemplateRepo::new();
        templates.expect_list().returning(|| Ok(slot_templates()));

        let mut abilities = MockAbilityRepo::new();
        abilities
            .expect_replace_for_profile()
            .withf(|_, rows| rows.is_empty())
            .returning(|_, _| Ok(()));

        // No slots submitted: the destructive replace leaves nothing behind.
        let submission = ProfileSubmission::named("Phantom");

        let sync = SyncAbilities::new(Arc::new(templates), Arc::new(abilities));
        let rows = sync
            .execute(ProfileId::new(), &submission)
            .await
            .unwrap();

        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn slot_without_description_is_skipped() {
        let mut templates = MockAbilityTemplateRepo::new();
        templates.expect_list().returning(|| Ok(slot_templates()));

        let mut abilities = MockAbilityRepo::new();
        abilities
            .expect_replace_for_profile()
            .withf(|_, rows| rows.is_empty())
            .returning(|_, _| Ok(()));

        let mut submission = ProfileSubmission::named("Phantom");
        submission.abilities = vec![slot(KeyBinding::E, "Tailwind", "  ")];

        let sync = SyncAbilities::new(Arc::new(templates), Arc::new(abilities));
        let rows = sync
            .execute(ProfileId::new(), &submission)
            .await
            .unwrap();

        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn rows_reference_the_matching_template() {
        let templates_list = slot_templates();
        let ultimate_id = templates_list[3].id;

        let mut templates = MockAbilityTemplateRepo::new();
        templates
            .expect_list()
            .returning(move || Ok(templates_list.clone()));

        let mut abilities = MockAbilityRepo::new();
        abilities
            .expect_replace_for_profile()
            .returning(|_, _| Ok(()));

        let mut submission = ProfileSubmission::named("Phantom");
        submission.abilities = vec![slot(KeyBinding::X, "Blade Storm", "Throwing knives")];

        let sync = SyncAbilities::new(Arc::new(templates), Arc::new(abilities));
        let rows = sync
            .execute(ProfileId::new(), &submission)
            .await
            .unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].template_id, ultimate_id);
    }
}
