use sqlx::PgPool;
use uuid::Uuid;

use crate::config::settings::CompetitionSettings;
use crate::db::helpers::{require_affected, require_record};
use crate::db::{fixtures, results};
use crate::models::fixture_result::{FixtureResult, ResultQuery, ResultRequest};
use crate::scoring::Gameweek;
use crate::services::error::ServiceError;
use crate::utils::validation::validate_score_line;

/// Final scores. Writes are admin-only; the routes enforce that.
pub struct ResultService {
    pool: PgPool,
    competition: CompetitionSettings,
}

impl ResultService {
    pub fn new(pool: PgPool, competition: CompetitionSettings) -> Self {
        Self { pool, competition }
    }

    pub async fn list(&self, query: &ResultQuery) -> Result<Vec<FixtureResult>, ServiceError> {
        let gameweek = query.gameweek.map(Gameweek::new).transpose()?;
        Ok(results::list_results(&self.pool, gameweek.map(|gw| i32::from(gw.number())), query.fixture_id).await?)
    }

    /// Upsert keyed on the fixture. The result inherits the fixture's gameweek.
    #[tracing::instrument(name = "Record result", skip(self, request), fields(fixture_id = request.fixture_id))]
    pub async fn record(&self, request: &ResultRequest) -> Result<FixtureResult, ServiceError> {
        let line = validate_score_line(request.actual_home, request.actual_away, self.competition.max_goals)?;
        let fixture = require_record(
            fixtures::find_fixture(&self.pool, request.fixture_id).await,
            "Fixture not found",
        )?;
        let result = results::upsert_result(&self.pool, &fixture, line).await?;
        tracing::info!(
            "Result {} {}-{} {} recorded for GW{}",
            fixture.home_team, result.actual_home, result.actual_away, fixture.away_team, fixture.gameweek
        );
        Ok(result)
    }

    #[tracing::instrument(name = "Delete result", skip(self))]
    pub async fn delete(&self, result_id: Uuid) -> Result<(), ServiceError> {
        require_affected(results::delete_result(&self.pool, result_id).await?, "Result not found")
    }
}
