use sqlx::PgPool;
use uuid::Uuid;

use crate::models::user::{User, UserRecord, UserRole};

const USER_COLUMNS: &str = "id, username, email, password_hash, role, created_at";

pub async fn insert_user(
    pool: &PgPool,
    username: &str,
    email: &str,
    password_hash: &str,
    role: UserRole,
) -> Result<UserRecord, sqlx::Error> {
    sqlx::query_as::<_, UserRecord>(&format!(
        r#"
        INSERT INTO users (id, username, email, password_hash, role, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, NOW(), NOW())
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(username)
    .bind(email)
    .bind(password_hash)
    .bind(role.as_str())
    .fetch_one(pool)
    .await
}

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<UserRecord>, sqlx::Error> {
    sqlx::query_as::<_, UserRecord>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE LOWER(email) = LOWER($1)"
    ))
    .bind(email)
    .fetch_optional(pool)
    .await
}

pub async fn find_by_username(pool: &PgPool, username: &str) -> Result<Option<UserRecord>, sqlx::Error> {
    sqlx::query_as::<_, UserRecord>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
    ))
    .bind(username)
    .fetch_optional(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, user_id: Uuid) -> Result<Option<UserRecord>, sqlx::Error> {
    sqlx::query_as::<_, UserRecord>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
    ))
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

/// Every registered user, oldest account first.
pub async fn list_users(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
    let records = sqlx::query_as::<_, UserRecord>(&format!(
        "SELECT {USER_COLUMNS} FROM users ORDER BY created_at, id"
    ))
    .fetch_all(pool)
    .await?;
    Ok(records.iter().map(UserRecord::to_public).collect())
}

pub async fn list_user_records(pool: &PgPool) -> Result<Vec<UserRecord>, sqlx::Error> {
    sqlx::query_as::<_, UserRecord>(&format!(
        "SELECT {USER_COLUMNS} FROM users ORDER BY created_at, id"
    ))
    .fetch_all(pool)
    .await
}

/// Competing players (role `user`), alphabetical, for the admin gameweek views.
pub async fn list_players(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
    let records = sqlx::query_as::<_, UserRecord>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE role = 'user' ORDER BY username"
    ))
    .fetch_all(pool)
    .await?;
    Ok(records.iter().map(UserRecord::to_public).collect())
}

pub async fn update_role(pool: &PgPool, user_id: Uuid, role: UserRole) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("UPDATE users SET role = $1, updated_at = NOW() WHERE id = $2")
        .bind(role.as_str())
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

/// Predictions go with the user through `ON DELETE CASCADE`.
pub async fn delete_user(pool: &PgPool, user_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
