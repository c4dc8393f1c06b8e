//! Agent repository implementation for SQLite.

use async_trait::async_trait;
use lineup_domain::{Agent, AgentId, RoleId};
use sqlx::{Row, SqlitePool};

use super::connection::parse_uuid;
use crate::infrastructure::ports::{AgentRepo, RepoError};

pub struct SqliteAgentRepo {
    pool: SqlitePool,
}

impl SqliteAgentRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn row_to_agent(row: &sqlx::sqlite::SqliteRow) -> Result<Agent, RepoError> {
    let id: String = row.get("id");
    let role_id: String = row.get("role_id");
    Ok(Agent {
        id: AgentId::from_uuid(parse_uuid("agents", &id)?),
        name: row.get("name"),
        role_id: RoleId::from_uuid(parse_uuid("agents", &role_id)?),
        icon_url: row.get("icon_url"),
    })
}

#[async_trait]
impl AgentRepo for SqliteAgentRepo {
    async fn get(&self, id: AgentId) -> Result<Option<Agent>, RepoError> {
        let row = sqlx::query("SELECT id, name, role_id, icon_url FROM agents WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("agents.get", e))?;

        row.as_ref().map(row_to_agent).transpose()
    }

    async fn list(&self) -> Result<Vec<Agent>, RepoError> {
        let rows = sqlx::query("SELECT id, name, role_id, icon_url FROM agents ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::database("agents.list", e))?;

        rows.iter().map(row_to_agent).collect()
    }

    async fn save(&self, agent: &Agent) -> Result<(), RepoError> {
        sqlx::query(
            r#"
            INSERT INTO agents (id, name, role_id, icon_url)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                role_id = excluded.role_id,
                icon_url = excluded.icon_url
            "#,
        )
        .bind(agent.id.to_string())
        .bind(&agent.name)
        .bind(agent.role_id.to_string())
        .bind(&agent.icon_url)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("agents.save", e))?;

        Ok(())
    }
}
