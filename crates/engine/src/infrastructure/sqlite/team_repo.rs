//! Team repository implementation for SQLite.

use async_trait::async_trait;
use lineup_domain::{Team, TeamId};
use sqlx::{Row, SqlitePool};

use super::connection::parse_uuid;
use crate::infrastructure::ports::{RepoError, TeamRepo};

pub struct SqliteTeamRepo {
    pool: SqlitePool,
}

impl SqliteTeamRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn row_to_team(row: &sqlx::sqlite::SqliteRow) -> Result<Team, RepoError> {
    let id: String = row.get("id");
    let custom_order: i64 = row.get("custom_order");
    Ok(Team {
        id: TeamId::from_uuid(parse_uuid("teams", &id)?),
        name: row.get("name"),
        custom_order: custom_order as u32,
        icon_url: row.get("icon_url"),
    })
}

#[async_trait]
impl TeamRepo for SqliteTeamRepo {
    async fn get(&self, id: TeamId) -> Result<Option<Team>, RepoError> {
        let row = sqlx::query("SELECT id, name, custom_order, icon_url FROM teams WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("teams.get", e))?;

        row.as_ref().map(row_to_team).transpose()
    }

    async fn list(&self) -> Result<Vec<Team>, RepoError> {
        let rows = sqlx::query(
            "SELECT id, name, custom_order, icon_url FROM teams ORDER BY custom_order, name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::database("teams.list", e))?;

        rows.iter().map(row_to_team).collect()
    }

    async fn save(&self, team: &Team) -> Result<(), RepoError> {
        sqlx::query(
            r#"
            INSERT INTO teams (id, name, custom_order, icon_url)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                custom_order = excluded.custom_order,
                icon_url = excluded.icon_url
            "#,
        )
        .bind(team.id.to_string())
        .bind(&team.name)
        .bind(team.custom_order as i64)
        .bind(&team.icon_url)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("teams.save", e))?;

        Ok(())
    }
}
