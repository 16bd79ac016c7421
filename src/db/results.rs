use sqlx::PgPool;
use uuid::Uuid;

use crate::models::fixture::Fixture;
use crate::models::fixture_result::FixtureResult;
use crate::scoring::points::ScoreLine;

const RESULT_COLUMNS: &str = "id, fixture_id, gameweek, actual_home, actual_away, updated_at";

pub async fn list_results(
    pool: &PgPool,
    gameweek: Option<i32>,
    fixture_id: Option<i32>,
) -> Result<Vec<FixtureResult>, sqlx::Error> {
    sqlx::query_as::<_, FixtureResult>(&format!(
        r#"
        SELECT {RESULT_COLUMNS}
        FROM results
        WHERE ($1::INT IS NULL OR gameweek = $1)
          AND ($2::INT IS NULL OR fixture_id = $2)
        ORDER BY gameweek, fixture_id
        "#
    ))
    .bind(gameweek)
    .bind(fixture_id)
    .fetch_all(pool)
    .await
}

/// Insert-or-update keyed on the fixture; one result per fixture.
pub async fn upsert_result(
    pool: &PgPool,
    fixture: &Fixture,
    line: ScoreLine,
) -> Result<FixtureResult, sqlx::Error> {
    let (home, away) = line.to_stored();
    sqlx::query_as::<_, FixtureResult>(&format!(
        r#"
        INSERT INTO results (id, fixture_id, gameweek, actual_home, actual_away, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, NOW(), NOW())
        ON CONFLICT (fixture_id) DO UPDATE SET
            gameweek = EXCLUDED.gameweek,
            actual_home = EXCLUDED.actual_home,
            actual_away = EXCLUDED.actual_away,
            updated_at = NOW()
        RETURNING {RESULT_COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(fixture.id)
    .bind(fixture.gameweek)
    .bind(home)
    .bind(away)
    .fetch_one(pool)
    .await
}

pub async fn delete_result(pool: &PgPool, result_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM results WHERE id = $1")
        .bind(result_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
