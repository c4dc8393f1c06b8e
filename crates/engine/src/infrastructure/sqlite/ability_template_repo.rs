//! Ability template repository implementation for SQLite.

use async_trait::async_trait;
use lineup_domain::{AbilityTemplate, AbilityTemplateId, KeyBinding};
use sqlx::{Row, SqlitePool};

use super::connection::parse_uuid;
use crate::infrastructure::ports::{AbilityTemplateRepo, RepoError};

pub struct SqliteAbilityTemplateRepo {
    pool: SqlitePool,
}

impl SqliteAbilityTemplateRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn row_to_template(row: &sqlx::sqlite::SqliteRow) -> Result<AbilityTemplate, RepoError> {
    let id: String = row.get("id");
    let key: String = row.get("key_binding");
    Ok(AbilityTemplate {
        id: AbilityTemplateId::from_uuid(parse_uuid("ability_templates", &id)?),
        name: row.get("name"),
        key_binding: key
            .parse::<KeyBinding>()
            .map_err(|e| RepoError::serialization(e.to_string()))?,
        icon_url: row.get("icon_url"),
    })
}

#[async_trait]
impl AbilityTemplateRepo for SqliteAbilityTemplateRepo {
    async fn list(&self) -> Result<Vec<AbilityTemplate>, RepoError> {
        let rows = sqlx::query(
            "SELECT id, name, key_binding, icon_url FROM ability_templates ORDER BY key_binding",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::database("ability_templates.list", e))?;

        rows.iter().map(row_to_template).collect()
    }

    async fn find_by_key(&self, key: KeyBinding) -> Result<Option<AbilityTemplate>, RepoError> {
        let row = sqlx::query(
            "SELECT id, name, key_binding, icon_url FROM ability_templates WHERE key_binding = ?",
        )
        .bind(key.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::database("ability_templates.find_by_key", e))?;

        row.as_ref().map(row_to_template).transpose()
    }

    async fn save(&self, template: &AbilityTemplate) -> Result<(), RepoError> {
        sqlx::query(
            r#"
            INSERT INTO ability_templates (id, name, key_binding, icon_url)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(key_binding) DO UPDATE SET
                name = excluded.name,
                icon_url = excluded.icon_url
            "#,
        )
        .bind(template.id.to_string())
        .bind(&template.name)
        .bind(template.key_binding.as_str())
        .bind(&template.icon_url)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("ability_templates.save", e))?;

        Ok(())
    }
}
