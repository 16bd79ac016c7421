use std::collections::BTreeMap;
use sqlx::PgPool;

use crate::models::settings::SiteSetting;

pub async fn list_settings(pool: &PgPool) -> Result<BTreeMap<String, String>, sqlx::Error> {
    let rows = sqlx::query_as::<_, SiteSetting>("SELECT key, value FROM site_settings")
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(|row| (row.key, row.value)).collect())
}

pub async fn upsert_setting(pool: &PgPool, key: &str, value: &str) -> Result<SiteSetting, sqlx::Error> {
    sqlx::query_as::<_, SiteSetting>(
        r#"
        INSERT INTO site_settings (key, value, updated_at)
        VALUES ($1, $2, NOW())
        ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value, updated_at = NOW()
        RETURNING key, value
        "#,
    )
    .bind(key)
    .bind(value)
    .fetch_one(pool)
    .await
}

/// Writes `value` only when `key` is absent, so admin edits survive a restart.
pub async fn seed_setting(pool: &PgPool, key: &str, value: &str) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO site_settings (key, value) VALUES ($1, $2) ON CONFLICT (key) DO NOTHING")
        .bind(key)
        .bind(value)
        .execute(pool)
        .await?;
    Ok(())
}
