//! Identity-uniqueness validation for profile submissions.
//!
//! Rejects create/edit submissions that would violate the directory's
//! identity invariants before any write happens. Output is a set of
//! field-scoped errors; an empty set means the submission may be persisted.

use std::sync::{Arc, OnceLock};

use regex_lite::Regex;
use serde::Serialize;

use lineup_domain::ProfileId;

use crate::infrastructure::ports::{ProfileRepo, RepoError};
use crate::use_cases::submission::ProfileSubmission;

/// A validation failure scoped to one form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

fn tag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^#[a-zA-Z0-9]{2,5}$").expect("tag pattern compiles"))
}

/// Format check for a riot tag. Empty tags are allowed (the tag is optional).
pub fn tag_format_error(tag: &str) -> Option<FieldError> {
    if tag.is_empty() || tag_pattern().is_match(tag) {
        return None;
    }
    Some(FieldError::new(
        "riot_tag",
        "Tag must start with # and be followed by 2-5 alphanumeric characters (e.g. #NA1, #12345)",
    ))
}

/// Checks a submission against existing profiles.
///
/// `editing` excludes the profile under edit, so resubmitting an unchanged
/// identity never conflicts with itself.
#[derive(Clone)]
pub struct ValidateIdentity {
    profiles: Arc<dyn ProfileRepo>,
}

impl ValidateIdentity {
    pub fn new(profiles: Arc<dyn ProfileRepo>) -> Self {
        Self { profiles }
    }

    pub async fn execute(
        &self,
        submission: &ProfileSubmission,
        editing: Option<ProfileId>,
    ) -> Result<Vec<FieldError>, RepoError> {
        let mut errors = Vec::new();

        let name = submission.in_game_name.trim();
        if name.is_empty() {
            errors.push(FieldError::new("in_game_name", "In-Game Name is required."));
        } else if self.profiles.name_taken(name, editing).await? {
            errors.push(FieldError::new(
                "in_game_name",
                "This In-Game Name is already taken.",
            ));
        }

        if let Some(tag) = submission.riot_tag.as_deref() {
            if let Some(error) = tag_format_error(tag) {
                errors.push(error);
            }
        }

        if !submission.riot_id.is_empty() {
            let submitted = submission.riot_identity();

            // The query matches riot_id case-insensitively; tags are compared
            // here because NULL and '' must be treated as the same value.
            let candidates = self.profiles.list_by_riot_id(&submission.riot_id).await?;
            let conflict = candidates
                .iter()
                .filter(|p| editing != Some(p.id))
                .any(|p| p.riot_identity().matches(&submitted));

            if conflict {
                errors.push(FieldError::new(
                    "riot_id",
                    format!("The Riot ID {submitted} is already in use."),
                ));
                if !submitted.tag().is_empty() {
                    errors.push(FieldError::new("riot_tag", "Combination taken."));
                }
            }
        }

        Ok(errors)
    }
}
