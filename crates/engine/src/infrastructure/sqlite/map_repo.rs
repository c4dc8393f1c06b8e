//! Map repository implementation for SQLite.

use async_trait::async_trait;
use lineup_domain::{GameMap, MapId};
use sqlx::{Row, SqlitePool};

use super::connection::parse_uuid;
use crate::infrastructure::ports::{MapRepo, RepoError};

pub struct SqliteMapRepo {
    pool: SqlitePool,
}

impl SqliteMapRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn row_to_map(row: &sqlx::sqlite::SqliteRow) -> Result<GameMap, RepoError> {
    let id: String = row.get("id");
    Ok(GameMap {
        id: MapId::from_uuid(parse_uuid("maps", &id)?),
        name: row.get("name"),
        icon_url: row.get("icon_url"),
    })
}

#[async_trait]
impl MapRepo for SqliteMapRepo {
    async fn get(&self, id: MapId) -> Result<Option<GameMap>, RepoError> {
        let row = sqlx::query("SELECT id, name, icon_url FROM maps WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("maps.get", e))?;

        row.as_ref().map(row_to_map).transpose()
    }

    async fn list(&self) -> Result<Vec<GameMap>, RepoError> {
        let rows = sqlx::query("SELECT id, name, icon_url FROM maps ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::database("maps.list", e))?;

        rows.iter().map(row_to_map).collect()
    }

    async fn save(&self, map: &GameMap) -> Result<(), RepoError> {
        sqlx::query(
            r#"
            INSERT INTO maps (id, name, icon_url)
            VALUES (?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                icon_url = excluded.icon_url
            "#,
        )
        .bind(map.id.to_string())
        .bind(&map.name)
        .bind(&map.icon_url)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("maps.save", e))?;

        Ok(())
    }
}
