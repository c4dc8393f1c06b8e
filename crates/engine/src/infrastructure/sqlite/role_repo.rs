//! Role repository implementation for SQLite.

use async_trait::async_trait;
use lineup_domain::{Role, RoleId};
use sqlx::{Row, SqlitePool};

use super::connection::parse_uuid;
use crate::infrastructure::ports::{RepoError, RoleRepo};

pub struct SqliteRoleRepo {
    pool: SqlitePool,
}

impl SqliteRoleRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn row_to_role(row: &sqlx::sqlite::SqliteRow) -> Result<Role, RepoError> {
    let id: String = row.get("id");
    Ok(Role {
        id: RoleId::from_uuid(parse_uuid("roles", &id)?),
        name: row.get("name"),
        icon_url: row.get("icon_url"),
    })
}

#[async_trait]
impl RoleRepo for SqliteRoleRepo {
    async fn get(&self, id: RoleId) -> Result<Option<Role>, RepoError> {
        let row = sqlx::query("SELECT id, name, icon_url FROM roles WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("roles.get", e))?;

        row.as_ref().map(row_to_role).transpose()
    }

    async fn list(&self) -> Result<Vec<Role>, RepoError> {
        let rows = sqlx::query("SELECT id, name, icon_url FROM roles ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::database("roles.list", e))?;

        rows.iter().map(row_to_role).collect()
    }

    async fn save(&self, role: &Role) -> Result<(), RepoError> {
        sqlx::query(
            r#"
            INSERT INTO roles (id, name, icon_url)
            VALUES (?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                icon_url = excluded.icon_url
            "#,
        )
        .bind(role.id.to_string())
        .bind(&role.name)
        .bind(&role.icon_url)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("roles.save", e))?;

        Ok(())
    }
}
