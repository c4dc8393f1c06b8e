//! Stored external identity repository implementation for SQLite.

use async_trait::async_trait;
use lineup_domain::{UserId, UserRiot};
use sqlx::{Row, SqlitePool};

use super::connection::parse_uuid;
use crate::infrastructure::ports::{RepoError, UserRiotRepo};

pub struct SqliteUserRiotRepo {
    pool: SqlitePool,
}

impl SqliteUserRiotRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRiotRepo for SqliteUserRiotRepo {
    async fn get(&self, user_id: UserId) -> Result<Option<UserRiot>, RepoError> {
        let row = sqlx::query("SELECT user_id, riot_id, riot_tag FROM user_riot WHERE user_id = ?")
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("user_riot.get", e))?;

        match row {
            Some(row) => {
                let id: String = row.get("user_id");
                Ok(Some(UserRiot {
                    user_id: UserId::from_uuid(parse_uuid("user_riot", &id)?),
                    riot_id: row.get("riot_id"),
                    riot_tag: row.get("riot_tag"),
                }))
            }
            None => Ok(None),
        }
    }

    async fn upsert(&self, identity: &UserRiot) -> Result<(), RepoError> {
        sqlx::query(
            r#"
            INSERT INTO user_riot (user_id, riot_id, riot_tag)
            VALUES (?, ?, ?)
            ON CONFLICT(user_id) DO UPDATE SET
                riot_id = excluded.riot_id,
                riot_tag = excluded.riot_tag
            "#,
        )
        .bind(identity.user_id.to_string())
        .bind(&identity.riot_id)
        .bind(&identity.riot_tag)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("user_riot.upsert", e))?;

        Ok(())
    }
}
