use sqlx::{PgPool, Postgres, Transaction};

use crate::models::fixture::{Fixture, FixtureImport};

const FIXTURE_COLUMNS: &str = "id, gameweek, home_team, away_team, kickoff_at, venue";

/// Fixtures in kickoff order, optionally narrowed to a gameweek and/or a team on either side.
pub async fn list_fixtures(
    pool: &PgPool,
    gameweek: Option<i32>,
    team: Option<&str>,
) -> Result<Vec<Fixture>, sqlx::Error> {
    sqlx::query_as::<_, Fixture>(&format!(
        r#"
        SELECT {FIXTURE_COLUMNS}
        FROM fixtures
        WHERE ($1::INT IS NULL OR gameweek = $1)
          AND ($2::TEXT IS NULL OR home_team ILIKE $2 OR away_team ILIKE $2)
        ORDER BY kickoff_at, id
        "#
    ))
    .bind(gameweek)
    .bind(team)
    .fetch_all(pool)
    .await
}

pub async fn find_fixture(pool: &PgPool, fixture_id: i32) -> Result<Option<Fixture>, sqlx::Error> {
    sqlx::query_as::<_, Fixture>(&format!(
        "SELECT {FIXTURE_COLUMNS} FROM fixtures WHERE id = $1"
    ))
    .bind(fixture_id)
    .fetch_optional(pool)
    .await
}

/// Insert or replace one imported fixture inside an import transaction.
pub async fn upsert_fixture(
    tx: &mut Transaction<'_, Postgres>,
    fixture: &FixtureImport,
) -> Result<Fixture, sqlx::Error> {
    let home_team = fixture.home_team.trim();
    let away_team = fixture.away_team.trim();

    match fixture.id {
        Some(id) => {
            sqlx::query_as::<_, Fixture>(&format!(
                r#"
                INSERT INTO fixtures (id, gameweek, home_team, away_team, kickoff_at, venue)
                VALUES ($1, $2, $3, $4, $5, $6)
                ON CONFLICT (id) DO UPDATE SET
                    gameweek = EXCLUDED.gameweek,
                    home_team = EXCLUDED.home_team,
                    away_team = EXCLUDED.away_team,
                    kickoff_at = EXCLUDED.kickoff_at,
                    venue = EXCLUDED.venue
                RETURNING {FIXTURE_COLUMNS}
                "#
            ))
            .bind(id)
            .bind(fixture.gameweek)
            .bind(home_team)
            .bind(away_team)
            .bind(fixture.kickoff_at)
            .bind(&fixture.venue)
            .fetch_one(&mut **tx)
            .await
        }
        None => {
            sqlx::query_as::<_, Fixture>(&format!(
                r#"
                INSERT INTO fixtures (gameweek, home_team, away_team, kickoff_at, venue)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING {FIXTURE_COLUMNS}
                "#
            ))
            .bind(fixture.gameweek)
            .bind(home_team)
            .bind(away_team)
            .bind(fixture.kickoff_at)
            .bind(&fixture.venue)
            .fetch_one(&mut **tx)
            .await
        }
    }
}

/// Predictions and results copy their fixture's gameweek; keep them in line after a re-import.
pub async fn realign_gameweek(
    tx: &mut Transaction<'_, Postgres>,
    fixture: &Fixture,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE predictions SET gameweek = $2 WHERE fixture_id = $1 AND gameweek <> $2")
        .bind(fixture.id)
        .bind(fixture.gameweek)
        .execute(&mut **tx)
        .await?;
    sqlx::query("UPDATE results SET gameweek = $2 WHERE fixture_id = $1 AND gameweek <> $2")
        .bind(fixture.id)
        .bind(fixture.gameweek)
        .execute(&mut **tx)
        .await?;
    Ok(())
}

/// Explicit ids bypass the serial sequence; move it past the highest id in use.
pub async fn sync_fixture_sequence(tx: &mut Transaction<'_, Postgres>) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        SELECT setval(
            pg_get_serial_sequence('fixtures', 'id'),
            GREATEST((SELECT COALESCE(MAX(id), 0) FROM fixtures), 1)
        )
        "#,
    )
    .execute(&mut **tx)
    .await?;
    Ok(())
}

pub async fn delete_fixture(pool: &PgPool, fixture_id: i32) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM fixtures WHERE id = $1")
        .bind(fixture_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
