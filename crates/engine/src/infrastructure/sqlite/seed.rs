//! Reference-data seeding.
//!
//! Populates the admin-curated rows (roles, agents, teams, maps, ability
//! slots) the directory is useless without. Idempotent: rows are keyed by
//! their unique name (or key binding), so re-running updates in place.

use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::infrastructure::ports::RepoError;

const ROLES: &[&str] = &["Controller", "Duelist", "Initiator", "Sentinel"];

const AGENTS: &[(&str, &str)] = &[
    // duelists
    ("Waylay", "Duelist"),
    ("Jett", "Duelist"),
    ("Iso", "Duelist"),
    ("Reyna", "Duelist"),
    ("Phoenix", "Duelist"),
    ("Raze", "Duelist"),
    ("Yoru", "Duelist"),
    ("Neon", "Duelist"),
    // initiators
    ("Sova", "Initiator"),
    ("Breach", "Initiator"),
    ("Skye", "Initiator"),
    ("KAY/O", "Initiator"),
    ("Tejo", "Initiator"),
    ("Gekko", "Initiator"),
    ("Fade", "Initiator"),
    // controllers
    ("Omen", "Controller"),
    ("Brimstone", "Controller"),
    ("Viper", "Controller"),
    ("Clove", "Controller"),
    ("Astra", "Controller"),
    ("Harbor", "Controller"),
    // sentinels
    ("Sage", "Sentinel"),
    ("Cypher", "Sentinel"),
    ("Killjoy", "Sentinel"),
    ("Deadlock", "Sentinel"),
    ("Veto", "Sentinel"),
    ("Vyse", "Sentinel"),
    ("Chamber", "Sentinel"),
];

const MAPS: &[&str] = &[
    "Abyss", "Ascent", "Bind", "Breeze", "Corrode", "Fracture", "Haven", "Icebox", "Lotus",
    "Pearl", "Split", "Sunset",
];

const TEAMS: &[(&str, i64)] = &[
    ("#1 House of Tyloo", 1),
    ("#2 Inn of Tyloo", 2),
    ("#3 Den of Tyloo", 3),
    ("#4 Nest of Tyloo", 4),
];

const ABILITY_SLOTS: &[(&str, &str)] = &[
    ("Ability 1", "C"),
    ("Ability 2", "Q"),
    ("Signature", "E"),
    ("Ultimate", "X"),
];

/// Upsert all reference data. Safe to run on every startup.
pub async fn seed_reference_data(pool: &SqlitePool) -> Result<(), RepoError> {
    for name in ROLES {
        sqlx::query("INSERT INTO roles (id, name) VALUES (?, ?) ON CONFLICT(name) DO NOTHING")
            .bind(Uuid::new_v4().to_string())
            .bind(name)
            .execute(pool)
            .await
            .map_err(|e| RepoError::database("seed.roles", e))?;
    }

    for (name, role_name) in AGENTS {
        let role_row = sqlx::query("SELECT id FROM roles WHERE name = ?")
            .bind(role_name)
            .fetch_optional(pool)
            .await
            .map_err(|e| RepoError::database("seed.agents", e))?;

        let Some(role_row) = role_row else {
            tracing::warn!(agent = name, role = role_name, "Role missing, skipping agent");
            continue;
        };
        let role_id: String = role_row.get("id");

        sqlx::query(
            r#"
            INSERT INTO agents (id, name, role_id)
            VALUES (?, ?, ?)
            ON CONFLICT(name) DO UPDATE SET role_id = excluded.role_id
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(name)
        .bind(role_id)
        .execute(pool)
        .await
        .map_err(|e| RepoError::database("seed.agents", e))?;
    }

    for name in MAPS {
        sqlx::query("INSERT INTO maps (id, name) VALUES (?, ?) ON CONFLICT(name) DO NOTHING")
            .bind(Uuid::new_v4().to_string())
            .bind(name)
            .execute(pool)
            .await
            .map_err(|e| RepoError::database("seed.maps", e))?;
    }

    for (name, order) in TEAMS {
        sqlx::query(
            r#"
            INSERT INTO teams (id, name, custom_order)
            VALUES (?, ?, ?)
            ON CONFLICT(name) DO UPDATE SET custom_order = excluded.custom_order
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(name)
        .bind(order)
        .execute(pool)
        .await
        .map_err(|e| RepoError::database("seed.teams", e))?;
    }

    for (name, key) in ABILITY_SLOTS {
        sqlx::query(
            r#"
            INSERT INTO ability_templates (id, name, key_binding)
            VALUES (?, ?, ?)
            ON CONFLICT(key_binding) DO UPDATE SET name = excluded.name
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(name)
        .bind(key)
        .execute(pool)
        .await
        .map_err(|e| RepoError::database("seed.ability_templates", e))?;
    }

    tracing::info!("Reference data seeded");
    Ok(())
}
