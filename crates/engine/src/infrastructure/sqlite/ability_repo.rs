//! Ability repository implementation for SQLite.

use async_trait::async_trait;
use lineup_domain::{Ability, AbilityId, AbilityTemplateId, ProfileId};
use sqlx::{Row, SqlitePool};

use super::connection::parse_uuid;
use crate::infrastructure::ports::{AbilityRepo, RepoError};

pub struct SqliteAbilityRepo {
    pool: SqlitePool,
}

impl SqliteAbilityRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

pub(crate) fn row_to_ability(row: &sqlx::sqlite::SqliteRow) -> Result<Ability, RepoError> {
    let id: String = row.get("id");
    let profile_id: String = row.get("profile_id");
    let template_id: String = row.get("template_id");
    Ok(Ability {
        id: AbilityId::from_uuid(parse_uuid("abilities", &id)?),
        profile_id: ProfileId::from_uuid(parse_uuid("abilities", &profile_id)?),
        template_id: AbilityTemplateId::from_uuid(parse_uuid("abilities", &template_id)?),
        name: row.get("ability_name"),
        description: row.get("ability_description"),
    })
}

#[async_trait]
impl AbilityRepo for SqliteAbilityRepo {
    async fn list_for_profile(&self, profile_id: ProfileId) -> Result<Vec<Ability>, RepoError> {
        let rows = sqlx::query(
            r#"
            SELECT a.id, a.profile_id, a.template_id, a.ability_name, a.ability_description
            FROM abilities a
            JOIN ability_templates t ON t.id = a.template_id
            WHERE a.profile_id = ?
            ORDER BY t.key_binding
            "#,
        )
        .bind(profile_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::database("abilities.list_for_profile", e))?;

        rows.iter().map(row_to_ability).collect()
    }

    async fn replace_for_profile(
        &self,
        profile_id: ProfileId,
        abilities: &[Ability],
    ) -> Result<(), RepoError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepoError::database("abilities.replace", e))?;

        sqlx::query("DELETE FROM abilities WHERE profile_id = ?")
            .bind(profile_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| RepoError::database("abilities.replace", e))?;

        for ability in abilities {
            sqlx::query(
                r#"
                INSERT INTO abilities (id, profile_id, template_id, ability_name, ability_description)
                VALUES (?, ?, ?, ?, ?)
                "#,
            )
            .bind(ability.id.to_string())
            .bind(ability.profile_id.to_string())
            .bind(ability.template_id.to_string())
            .bind(&ability.name)
            .bind(&ability.description)
            .execute(&mut *tx)
            .await
            .map_err(|e| RepoError::database("abilities.replace", e))?;
        }

        tx.commit()
            .await
            .map_err(|e| RepoError::database("abilities.replace", e))?;

        Ok(())
    }
}
