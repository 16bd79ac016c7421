use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{fixtures, predictions, results, users};
use crate::scoring::leaderboard::{GameweekRow, Leaderboard, LeaderboardRow};
use crate::scoring::stats::{prediction_counts, PlayerStats};
use crate::scoring::Gameweek;
use crate::services::error::ServiceError;

/// Loads the four stores and hands them to the aggregator.
///
/// Nothing is cached: every call reads fresh snapshots, so a result entered a
/// moment ago is reflected on the next request.
pub struct LeaderboardService {
    pool: PgPool,
}

impl LeaderboardService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn load(&self) -> Result<Leaderboard, sqlx::Error> {
        let users = users::list_users(&self.pool).await?;
        let fixtures = fixtures::list_fixtures(&self.pool, None, None).await?;
        let predictions = predictions::list_predictions(&self.pool, None, None).await?;
        let results = results::list_results(&self.pool, None, None).await?;

        tracing::debug!(
            "Computing leaderboard from {} users, {} fixtures, {} predictions, {} results",
            users.len(), fixtures.len(), predictions.len(), results.len()
        );
        Ok(Leaderboard::compute(&users, &fixtures, &predictions, &results))
    }

    pub async fn standings(&self) -> Result<Vec<LeaderboardRow>, ServiceError> {
        Ok(self.load().await?.standings())
    }

    pub async fn gameweek_standings(&self, gameweek: i32) -> Result<Vec<GameweekRow>, ServiceError> {
        let gameweek = Gameweek::new(gameweek)?;
        Ok(self.load().await?.gameweek_standings(gameweek))
    }

    pub async fn player_stats(&self, user_id: Uuid) -> Result<PlayerStats, ServiceError> {
        let board = self.load().await?;
        let own = predictions::list_predictions(&self.pool, Some(user_id), None).await?;
        let total_predictions = prediction_counts(&own).get(&user_id).copied().unwrap_or(0);
        PlayerStats::compute(&board, user_id, total_predictions)
            .ok_or_else(|| ServiceError::NotFound("User not found".into()))
    }
}
