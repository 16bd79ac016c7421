use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use crate::models::fixture::Fixture;
use crate::models::prediction::Prediction;
use crate::scoring::points::ScoreLine;

const PREDICTION_COLUMNS: &str =
    "id, user_id, fixture_id, gameweek, predicted_home, predicted_away, updated_at";

pub async fn list_predictions(
    pool: &PgPool,
    user_id: Option<Uuid>,
    gameweek: Option<i32>,
) -> Result<Vec<Prediction>, sqlx::Error> {
    sqlx::query_as::<_, Prediction>(&format!(
        r#"
        SELECT {PREDICTION_COLUMNS}
        FROM predictions
        WHERE ($1::UUID IS NULL OR user_id = $1)
          AND ($2::INT IS NULL OR gameweek = $2)
        ORDER BY gameweek, fixture_id, user_id
        "#
    ))
    .bind(user_id)
    .bind(gameweek)
    .fetch_all(pool)
    .await
}

pub async fn find_prediction(pool: &PgPool, prediction_id: Uuid) -> Result<Option<Prediction>, sqlx::Error> {
    sqlx::query_as::<_, Prediction>(&format!(
        "SELECT {PREDICTION_COLUMNS} FROM predictions WHERE id = $1"
    ))
    .bind(prediction_id)
    .fetch_optional(pool)
    .await
}

pub async fn count_predictions(pool: &PgPool) -> Result<i64, sqlx::Error> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM predictions")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Insert-or-update keyed on (user, fixture). The unique constraint serializes
/// concurrent writers on the same row.
pub async fn upsert_prediction<'e, E>(
    executor: E,
    user_id: Uuid,
    fixture: &Fixture,
    line: ScoreLine,
) -> Result<Prediction, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let (home, away) = line.to_stored();
    sqlx::query_as::<_, Prediction>(&format!(
        r#"
        INSERT INTO predictions (id, user_id, fixture_id, gameweek, predicted_home, predicted_away, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, NOW(), NOW())
        ON CONFLICT (user_id, fixture_id) DO UPDATE SET
            gameweek = EXCLUDED.gameweek,
            predicted_home = EXCLUDED.predicted_home,
            predicted_away = EXCLUDED.predicted_away,
            updated_at = NOW()
        RETURNING {PREDICTION_COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(fixture.id)
    .bind(fixture.gameweek)
    .bind(home)
    .bind(away)
    .fetch_one(executor)
    .await
}

/// Insert only; returns `None` when a prediction for (user, fixture) already exists.
pub async fn insert_prediction_once<'e, E>(
    executor: E,
    user_id: Uuid,
    fixture: &Fixture,
    line: ScoreLine,
) -> Result<Option<Prediction>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let (home, away) = line.to_stored();
    sqlx::query_as::<_, Prediction>(&format!(
        r#"
        INSERT INTO predictions (id, user_id, fixture_id, gameweek, predicted_home, predicted_away, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, NOW(), NOW())
        ON CONFLICT (user_id, fixture_id) DO NOTHING
        RETURNING {PREDICTION_COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(fixture.id)
    .bind(fixture.gameweek)
    .bind(home)
    .bind(away)
    .fetch_optional(executor)
    .await
}

pub async fn delete_prediction(pool: &PgPool, prediction_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM predictions WHERE id = $1")
        .bind(prediction_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
