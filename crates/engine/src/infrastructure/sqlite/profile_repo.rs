//! Profile repository implementation for SQLite.

use async_trait::async_trait;
use lineup_domain::{AgentId, MapId, Profile, ProfileId, RoleId, TeamId, UserId};
use sqlx::{Row, SqlitePool};

use super::ability_repo::row_to_ability;
use super::connection::{parse_datetime, parse_uuid};
use crate::infrastructure::ports::{ProfileRepo, RepoError};

pub struct SqliteProfileRepo {
    pool: SqlitePool,
}

impl SqliteProfileRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Load agent/role/map links and ability rows into a scalar-only profile.
    async fn load_relations(&self, profile: &mut Profile) -> Result<(), RepoError> {
        let id = profile.id.to_string();

        let rows =
            sqlx::query("SELECT agent_id FROM profile_agents WHERE profile_id = ? ORDER BY rowid")
                .bind(&id)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| RepoError::database("profiles.load_relations", e))?;
        profile.agent_ids = rows
            .iter()
            .map(|row| {
                let raw: String = row.get("agent_id");
                Ok(AgentId::from_uuid(parse_uuid("profile_agents", &raw)?))
            })
            .collect::<Result<_, RepoError>>()?;

        let rows =
            sqlx::query("SELECT role_id FROM profile_roles WHERE profile_id = ? ORDER BY rowid")
                .bind(&id)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| RepoError::database("profiles.load_relations", e))?;
        profile.role_ids = rows
            .iter()
            .map(|row| {
                let raw: String = row.get("role_id");
                Ok(RoleId::from_uuid(parse_uuid("profile_roles", &raw)?))
            })
            .collect::<Result<_, RepoError>>()?;

        let rows =
            sqlx::query("SELECT map_id FROM profile_maps WHERE profile_id = ? ORDER BY rowid")
                .bind(&id)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| RepoError::database("profiles.load_relations", e))?;
        profile.map_ids = rows
            .iter()
            .map(|row| {
                let raw: String = row.get("map_id");
                Ok(MapId::from_uuid(parse_uuid("profile_maps", &raw)?))
            })
            .collect::<Result<_, RepoError>>()?;

        let rows = sqlx::query(
            r#"
            SELECT a.id, a.profile_id, a.template_id, a.ability_name, a.ability_description
            FROM abilities a
            JOIN ability_templates t ON t.id = a.template_id
            WHERE a.profile_id = ?
            ORDER BY t.key_binding
            "#,
        )
        .bind(&id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::database("profiles.load_relations", e))?;
        profile.abilities = rows.iter().map(row_to_ability).collect::<Result<_, _>>()?;

        Ok(())
    }

    async fn replace_links(
        &self,
        table: &'static str,
        column: &'static str,
        profile_id: ProfileId,
        ids: Vec<String>,
    ) -> Result<(), RepoError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepoError::database("profiles.set_links", e))?;

        sqlx::query(&format!("DELETE FROM {table} WHERE profile_id = ?"))
            .bind(profile_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| RepoError::database("profiles.set_links", e))?;

        for id in ids {
            sqlx::query(&format!(
                "INSERT INTO {table} (profile_id, {column}) VALUES (?, ?)"
            ))
            .bind(profile_id.to_string())
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| RepoError::database("profiles.set_links", e))?;
        }

        tx.commit()
            .await
            .map_err(|e| RepoError::database("profiles.set_links", e))
    }
}

/// Map a profiles row to a scalar-only Profile (relations loaded separately).
fn row_to_profile(row: &sqlx::sqlite::SqliteRow) -> Result<Profile, RepoError> {
    let id: String = row.get("id");
    let team_id: Option<String> = row.get("team_id");
    let user_id: Option<String> = row.get("user_id");
    let created_at: String = row.get("created_at");
    let updated_at: String = row.get("updated_at");

    Ok(Profile {
        id: ProfileId::from_uuid(parse_uuid("profiles", &id)?),
        in_game_name: row.get("in_game_name"),
        riot_id: row.get("riot_id"),
        riot_tag: row.get("riot_tag"),
        picture: row.get("picture"),
        picture_url: row.get("picture_url"),
        team_id: team_id
            .map(|raw| parse_uuid("profiles", &raw).map(TeamId::from_uuid))
            .transpose()?,
        user_id: user_id
            .map(|raw| parse_uuid("profiles", &raw).map(UserId::from_uuid))
            .transpose()?,
        bio: row.get("bio"),
        agent_ids: Vec::new(),
        role_ids: Vec::new(),
        map_ids: Vec::new(),
        abilities: Vec::new(),
        created_at: parse_datetime("profiles", &created_at)?,
        updated_at: parse_datetime("profiles", &updated_at)?,
    })
}

const PROFILE_COLUMNS: &str = "id, in_game_name, riot_id, riot_tag, picture, picture_url, \
                               team_id, user_id, bio, created_at, updated_at";

#[async_trait]
impl ProfileRepo for SqliteProfileRepo {
    async fn get(&self, id: ProfileId) -> Result<Option<Profile>, RepoError> {
        let row = sqlx::query(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles WHERE id = ?"
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::database("profiles.get", e))?;

        match row {
            Some(row) => {
                let mut profile = row_to_profile(&row)?;
                self.load_relations(&mut profile).await?;
                Ok(Some(profile))
            }
            None => Ok(None),
        }
    }

    async fn list(&self) -> Result<Vec<Profile>, RepoError> {
        let rows = sqlx::query(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::database("profiles.list", e))?;

        let mut profiles = Vec::with_capacity(rows.len());
        for row in &rows {
            let mut profile = row_to_profile(row)?;
            self.load_relations(&mut profile).await?;
            profiles.push(profile);
        }
        Ok(profiles)
    }

    async fn save(&self, profile: &Profile) -> Result<(), RepoError> {
        sqlx::query(
            r#"
            INSERT INTO profiles (id, in_game_name, riot_id, riot_tag, picture, picture_url,
                                  team_id, user_id, bio, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                in_game_name = excluded.in_game_name,
                riot_id = excluded.riot_id,
                riot_tag = excluded.riot_tag,
                picture = excluded.picture,
                picture_url = excluded.picture_url,
                team_id = excluded.team_id,
                user_id = excluded.user_id,
                bio = excluded.bio,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(profile.id.to_string())
        .bind(&profile.in_game_name)
        .bind(&profile.riot_id)
        .bind(&profile.riot_tag)
        .bind(&profile.picture)
        .bind(&profile.picture_url)
        .bind(profile.team_id.map(|id| id.to_string()))
        .bind(profile.user_id.map(|id| id.to_string()))
        .bind(&profile.bio)
        .bind(profile.created_at.to_rfc3339())
        .bind(profile.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("profiles.save", e))?;

        tracing::debug!(profile_id = %profile.id, "Saved profile");
        Ok(())
    }

    async fn delete(&self, id: ProfileId) -> Result<(), RepoError> {
        sqlx::query("DELETE FROM profiles WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("profiles.delete", e))?;

        tracing::debug!(profile_id = %id, "Deleted profile");
        Ok(())
    }

    async fn name_taken(
        &self,
        in_game_name: &str,
        exclude: Option<ProfileId>,
    ) -> Result<bool, RepoError> {
        let mut query =
            String::from("SELECT COUNT(*) AS n FROM profiles WHERE lower(in_game_name) = lower(?)");
        if exclude.is_some() {
            query.push_str(" AND id != ?");
        }

        let mut q = sqlx::query(&query).bind(in_game_name);
        if let Some(exclude) = exclude {
            q = q.bind(exclude.to_string());
        }

        let row = q
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RepoError::database("profiles.name_taken", e))?;

        let count: i64 = row.get("n");
        Ok(count > 0)
    }

    async fn list_by_riot_id(&self, riot_id: &str) -> Result<Vec<Profile>, RepoError> {
        // Scalar-only rows: the caller only needs identity fields for tag
        // comparison, which happens in code (NULL vs '' normalization).
        let rows = sqlx::query(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles WHERE lower(riot_id) = lower(?)"
        ))
        .bind(riot_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::database("profiles.list_by_riot_id", e))?;

        rows.iter().map(row_to_profile).collect()
    }

    async fn find_by_user(&self, user_id: UserId) -> Result<Option<Profile>, RepoError> {
        let row = sqlx::query(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles WHERE user_id = ?"
        ))
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::database("profiles.find_by_user", e))?;

        match row {
            Some(row) => {
                let mut profile = row_to_profile(&row)?;
                self.load_relations(&mut profile).await?;
                Ok(Some(profile))
            }
            None => Ok(None),
        }
    }

    async fn assign_owner(&self, id: ProfileId, user_id: UserId) -> Result<bool, RepoError> {
        // Conditional write: only succeeds while the profile is unclaimed, so
        // two racing claimants serialize on the store and exactly one wins.
        let result = sqlx::query("UPDATE profiles SET user_id = ? WHERE id = ? AND user_id IS NULL")
            .bind(user_id.to_string())
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("profiles.assign_owner", e))?;

        Ok(result.rows_affected() == 1)
    }

    async fn set_agents(&self, id: ProfileId, agent_ids: &[AgentId]) -> Result<(), RepoError> {
        self.replace_links(
            "profile_agents",
            "agent_id",
            id,
            agent_ids.iter().map(|a| a.to_string()).collect(),
        )
        .await
    }

    async fn set_roles(&self, id: ProfileId, role_ids: &[RoleId]) -> Result<(), RepoError> {
        self.replace_links(
            "profile_roles",
            "role_id",
            id,
            role_ids.iter().map(|r| r.to_string()).collect(),
        )
        .await
    }

    async fn set_maps(&self, id: ProfileId, map_ids: &[MapId]) -> Result<(), RepoError> {
        self.replace_links(
            "profile_maps",
            "map_id",
            id,
            map_ids.iter().map(|m| m.to_string()).collect(),
        )
        .await
    }

    async fn list_by_team(&self, team_id: TeamId) -> Result<Vec<Profile>, RepoError> {
        let rows = sqlx::query(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles WHERE team_id = ? ORDER BY created_at DESC"
        ))
        .bind(team_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::database("profiles.list_by_team", e))?;

        let mut profiles = Vec::with_capacity(rows.len());
        for row in &rows {
            let mut profile = row_to_profile(row)?;
            self.load_relations(&mut profile).await?;
            profiles.push(profile);
        }
        Ok(profiles)
    }
}
