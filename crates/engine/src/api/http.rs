//! HTTP routes.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use lineup_domain::{
    AbilityTemplate, Agent, GameMap, Profile, ProfileId, Role, Team, UserId, UserRiot,
};

use crate::app::App;
use crate::use_cases::profile::{DeleteError, SaveError, SaveOutcome};
use crate::use_cases::validation::{tag_format_error, FieldError};
use crate::use_cases::{ClaimError, ProfileSubmission};

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(health))
        .route("/api/health", get(health))
        .route("/api/profiles", get(list_profiles).post(create_profile))
        .route(
            "/api/profiles/{id}",
            get(get_profile).put(update_profile).delete(delete_profile),
        )
        .route("/api/profiles/{id}/claim", post(claim_profile))
        .route("/api/profiles/{id}/teammates", get(list_teammates))
        .route("/api/roles", get(list_roles))
        .route("/api/agents", get(list_agents))
        .route("/api/teams", get(list_teams))
        .route("/api/maps", get(list_maps))
        .route("/api/ability-templates", get(list_ability_templates))
        .route(
            "/api/users/{user_id}/riot",
            get(get_user_riot).put(put_user_riot),
        )
}

async fn health() -> &'static str {
    "OK"
}

// =============================================================================
// Profiles
// =============================================================================

async fn list_profiles(State(app): State<Arc<App>>) -> Result<Json<Vec<Profile>>, ApiError> {
    let profiles = app.repositories.profile.list().await?;
    Ok(Json(profiles))
}

async fn get_profile(
    State(app): State<Arc<App>>,
    Path(id): Path<String>,
) -> Result<Json<Profile>, ApiError> {
    let id = parse_profile_id(&id)?;
    let profile = app
        .repositories
        .profile
        .get(id)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(profile))
}

async fn create_profile(
    State(app): State<Arc<App>>,
    headers: HeaderMap,
    Json(submission): Json<ProfileSubmission>,
) -> Result<(StatusCode, Json<SaveOutcome>), ApiError> {
    let user = user_from_headers(&headers)?;
    let outcome = app.use_cases.save_profile.create(&submission, user).await?;
    Ok((StatusCode::CREATED, Json(outcome)))
}

async fn update_profile(
    State(app): State<Arc<App>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(submission): Json<ProfileSubmission>,
) -> Result<Json<SaveOutcome>, ApiError> {
    let id = parse_profile_id(&id)?;
    let user = user_from_headers(&headers)?;
    let outcome = app
        .use_cases
        .save_profile
        .update(id, &submission, user)
        .await?;
    Ok(Json(outcome))
}

async fn delete_profile(
    State(app): State<Arc<App>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let id = parse_profile_id(&id)?;
    let user = user_from_headers(&headers)?;
    app.use_cases.delete_profile.execute(id, user).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn claim_profile(
    State(app): State<Arc<App>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Profile>, ApiError> {
    let id = parse_profile_id(&id)?;
    let user = user_from_headers(&headers)?.ok_or_else(|| {
        ApiError::Forbidden("Sign in to claim a profile".to_string())
    })?;
    let profile = app.use_cases.claim_profile.execute(user, id).await?;
    Ok(Json(profile))
}

async fn list_teammates(
    State(app): State<Arc<App>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Profile>>, ApiError> {
    let id = parse_profile_id(&id)?;
    let profile = app
        .repositories
        .profile
        .get(id)
        .await?
        .ok_or(ApiError::NotFound)?;

    let Some(team_id) = profile.team_id else {
        return Ok(Json(Vec::new()));
    };

    let teammates = app
        .repositories
        .profile
        .list_by_team(team_id)
        .await?
        .into_iter()
        .filter(|p| p.id != profile.id)
        .collect();
    Ok(Json(teammates))
}

// =============================================================================
// Reference data
// =============================================================================

async fn list_roles(State(app): State<Arc<App>>) -> Result<Json<Vec<Role>>, ApiError> {
    Ok(Json(app.repositories.role.list().await?))
}

async fn list_agents(State(app): State<Arc<App>>) -> Result<Json<Vec<Agent>>, ApiError> {
    Ok(Json(app.repositories.agent.list().await?))
}

async fn list_teams(State(app): State<Arc<App>>) -> Result<Json<Vec<Team>>, ApiError> {
    Ok(Json(app.repositories.team.list().await?))
}

async fn list_maps(State(app): State<Arc<App>>) -> Result<Json<Vec<GameMap>>, ApiError> {
    Ok(Json(app.repositories.game_map.list().await?))
}

async fn list_ability_templates(
    State(app): State<Arc<App>>,
) -> Result<Json<Vec<AbilityTemplate>>, ApiError> {
    Ok(Json(app.repositories.ability_template.list().await?))
}

// =============================================================================
// Stored external identity
// =============================================================================

#[derive(Debug, Deserialize)]
struct RiotIdentityPayload {
    riot_id: String,
    #[serde(default)]
    riot_tag: Option<String>,
}

async fn get_user_riot(
    State(app): State<Arc<App>>,
    Path(user_id): Path<String>,
) -> Result<Json<UserRiot>, ApiError> {
    let user_id = parse_user_id(&user_id)?;
    let identity = app
        .repositories
        .user_riot
        .get(user_id)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(identity))
}

async fn put_user_riot(
    State(app): State<Arc<App>>,
    Path(user_id): Path<String>,
    Json(payload): Json<RiotIdentityPayload>,
) -> Result<Json<UserRiot>, ApiError> {
    let user_id = parse_user_id(&user_id)?;

    let mut errors = Vec::new();
    if payload.riot_id.trim().is_empty() {
        errors.push(FieldError::new("riot_id", "Riot ID is required."));
    }
    if let Some(error) = payload.riot_tag.as_deref().and_then(tag_format_error) {
        errors.push(error);
    }
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    let identity = UserRiot::new(
        user_id,
        payload.riot_id.trim(),
        payload.riot_tag.filter(|tag| !tag.is_empty()),
    );
    app.repositories.user_riot.upsert(&identity).await?;
    Ok(Json(identity))
}

// =============================================================================
// Helpers
// =============================================================================

fn parse_profile_id(raw: &str) -> Result<ProfileId, ApiError> {
    Uuid::parse_str(raw)
        .map(ProfileId::from_uuid)
        .map_err(|_| ApiError::BadRequest("Invalid profile ID".to_string()))
}

fn parse_user_id(raw: &str) -> Result<UserId, ApiError> {
    Uuid::parse_str(raw)
        .map(UserId::from_uuid)
        .map_err(|_| ApiError::BadRequest("Invalid user ID".to_string()))
}

/// The authentication collaborator passes the signed-in user as X-User-Id;
/// absence means anonymous.
fn user_from_headers(headers: &HeaderMap) -> Result<Option<UserId>, ApiError> {
    let Some(value) = headers.get("x-user-id") else {
        return Ok(None);
    };
    let raw = value
        .to_str()
        .map_err(|_| ApiError::BadRequest("Invalid X-User-Id header".to_string()))?;
    let uuid = Uuid::parse_str(raw)
        .map_err(|_| ApiError::BadRequest("Invalid X-User-Id header".to_string()))?;
    Ok(Some(UserId::from_uuid(uuid)))
}

#[derive(Debug)]
pub enum ApiError {
    NotFound,
    BadRequest(String),
    Forbidden(String),
    Validation(Vec<FieldError>),
    Conflict {
        reason: &'static str,
        message: String,
        profile_id: Option<ProfileId>,
    },
    Internal(String),
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiError::NotFound => {
                (StatusCode::NOT_FOUND, "Not found").into_response()
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg).into_response(),
            ApiError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(serde_json::json!({ "errors": errors })),
            )
                .into_response(),
            ApiError::Conflict {
                reason,
                message,
                profile_id,
            } => (
                StatusCode::CONFLICT,
                Json(serde_json::json!({
                    "error": reason,
                    "message": message,
                    "profile_id": profile_id,
                })),
            )
                .into_response(),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error").into_response()
            }
        }
    }
}

impl From<crate::infrastructure::ports::RepoError> for ApiError {
    fn from(e: crate::infrastructure::ports::RepoError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl From<SaveError> for ApiError {
    fn from(e: SaveError) -> Self {
        match e {
            SaveError::Validation(errors) => ApiError::Validation(errors),
            SaveError::Forbidden => {
                ApiError::Forbidden("You do not have permission to modify this profile".to_string())
            }
            SaveError::AlreadyOwnsProfile { existing } => ApiError::Conflict {
                reason: "already_owns_profile",
                message: "You already have a profile".to_string(),
                profile_id: Some(existing),
            },
            SaveError::NotFound => ApiError::NotFound,
            SaveError::Repo(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<DeleteError> for ApiError {
    fn from(e: DeleteError) -> Self {
        match e {
            DeleteError::NotFound => ApiError::NotFound,
            DeleteError::Forbidden => {
                ApiError::Forbidden("You do not have permission to delete this profile".to_string())
            }
            DeleteError::Repo(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<ClaimError> for ApiError {
    fn from(e: ClaimError) -> Self {
        match e {
            ClaimError::NotFound => ApiError::NotFound,
            ClaimError::AlreadyClaimed => ApiError::Conflict {
                reason: "already_claimed",
                message: "This profile has already been claimed".to_string(),
                profile_id: None,
            },
            ClaimError::AlreadyOwnsProfile { existing } => ApiError::Conflict {
                reason: "already_owns_profile",
                message: "You already own a profile".to_string(),
                profile_id: Some(existing),
            },
            ClaimError::NoLinkedIdentity => ApiError::Conflict {
                reason: "no_linked_identity",
                message: "No Riot ID is linked to your account".to_string(),
                profile_id: None,
            },
            ClaimError::IdentityMismatch => ApiError::Conflict {
                reason: "identity_mismatch",
                message: "Your Riot ID does not match this profile".to_string(),
                profile_id: None,
            },
            ClaimError::Repo(e) => ApiError::Internal(e.to_string()),
        }
    }
}
