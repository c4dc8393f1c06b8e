//! Pool construction and schema bootstrap.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::infrastructure::ports::RepoError;

/// Open (and create if missing) the database at `db_path`.
///
/// Foreign keys are enabled per connection; the schema relies on them for
/// protect-on-delete of reference data and cascade-delete of profile rows.
pub async fn connect(db_path: &str) -> Result<SqlitePool, RepoError> {
    let options = SqliteConnectOptions::from_str(&format!("sqlite:{db_path}"))
        .map_err(|e| RepoError::database("connect", e))?
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePool::connect_with(options)
        .await
        .map_err(|e| RepoError::database("connect", e))
}

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS roles (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL UNIQUE,
        icon_url TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS agents (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL UNIQUE,
        role_id TEXT NOT NULL REFERENCES roles(id) ON DELETE RESTRICT,
        icon_url TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS teams (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL UNIQUE,
        custom_order INTEGER NOT NULL DEFAULT 0,
        icon_url TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS maps (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL UNIQUE,
        icon_url TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS ability_templates (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        key_binding TEXT NOT NULL UNIQUE,
        icon_url TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS profiles (
        id TEXT PRIMARY KEY,
        in_game_name TEXT NOT NULL,
        riot_id TEXT NOT NULL DEFAULT '',
        riot_tag TEXT,
        picture TEXT,
        picture_url TEXT,
        team_id TEXT REFERENCES teams(id) ON DELETE RESTRICT,
        user_id TEXT UNIQUE,
        bio TEXT NOT NULL DEFAULT '',
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS profile_agents (
        profile_id TEXT NOT NULL REFERENCES profiles(id) ON DELETE CASCADE,
        agent_id TEXT NOT NULL REFERENCES agents(id) ON DELETE RESTRICT,
        PRIMARY KEY (profile_id, agent_id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS profile_roles (
        profile_id TEXT NOT NULL REFERENCES profiles(id) ON DELETE CASCADE,
        role_id TEXT NOT NULL REFERENCES roles(id) ON DELETE RESTRICT,
        PRIMARY KEY (profile_id, role_id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS profile_maps (
        profile_id TEXT NOT NULL REFERENCES profiles(id) ON DELETE CASCADE,
        map_id TEXT NOT NULL REFERENCES maps(id) ON DELETE RESTRICT,
        PRIMARY KEY (profile_id, map_id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS abilities (
        id TEXT PRIMARY KEY,
        profile_id TEXT NOT NULL REFERENCES profiles(id) ON DELETE CASCADE,
        template_id TEXT NOT NULL REFERENCES ability_templates(id) ON DELETE CASCADE,
        ability_name TEXT NOT NULL,
        ability_description TEXT NOT NULL,
        UNIQUE (profile_id, template_id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS user_riot (
        user_id TEXT PRIMARY KEY,
        riot_id TEXT NOT NULL,
        riot_tag TEXT
    )
    "#,
];

/// Create all tables. Idempotent.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), RepoError> {
    for ddl in SCHEMA {
        sqlx::query(ddl)
            .execute(pool)
            .await
            .map_err(|e| RepoError::database("ensure_schema", e))?;
    }
    Ok(())
}

/// Decode a stored uuid column.
pub(crate) fn parse_uuid(operation: &'static str, value: &str) -> Result<Uuid, RepoError> {
    Uuid::parse_str(value)
        .map_err(|e| RepoError::serialization(format!("{operation}: bad uuid {value:?}: {e}")))
}

/// Decode a stored RFC 3339 timestamp column.
pub(crate) fn parse_datetime(
    operation: &'static str,
    value: &str,
) -> Result<DateTime<Utc>, RepoError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepoError::serialization(format!("{operation}: bad timestamp {value:?}: {e}")))
}
