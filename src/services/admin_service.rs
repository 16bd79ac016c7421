use sqlx::PgPool;
use uuid::Uuid;

use crate::db::helpers::require_affected;
use crate::db::{fixtures, predictions, results, users};
use crate::models::user::{Actor, AdminUserSummary, UserRole};
use crate::scoring::leaderboard::Leaderboard;
use crate::scoring::stats::{gameweek_breakdown, prediction_counts, submission_summary, FixtureBreakdown, SeasonOverview, SubmissionSummary};
use crate::scoring::Gameweek;
use crate::services::error::ServiceError;

/// Dashboard views and user management for the admin scope.
pub struct AdminService {
    pool: PgPool,
}

impl AdminService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn overview(&self) -> Result<SeasonOverview, ServiceError> {
        // Admin accounts are staff, not competitors
        let players = users::list_players(&self.pool).await?;
        let fixtures = fixtures::list_fixtures(&self.pool, None, None).await?;
        let total_predictions = predictions::count_predictions(&self.pool).await?;
        let results = results::list_results(&self.pool, None, None).await?;

        Ok(SeasonOverview::compute(
            players.len() as u32,
            &fixtures,
            u32::try_from(total_predictions).unwrap_or(u32::MAX),
            &results,
        ))
    }

    pub async fn users(&self) -> Result<Vec<AdminUserSummary>, ServiceError> {
        let records = users::list_user_records(&self.pool).await?;
        let public: Vec<_> = records.iter().map(|record| record.to_public()).collect();
        let fixtures = fixtures::list_fixtures(&self.pool, None, None).await?;
        let predictions = predictions::list_predictions(&self.pool, None, None).await?;
        let results = results::list_results(&self.pool, None, None).await?;

        let board = Leaderboard::compute(&public, &fixtures, &predictions, &results);
        let counts = prediction_counts(&predictions);

        Ok(records
            .into_iter()
            .map(|record| AdminUserSummary {
                prediction_count: counts.get(&record.id).copied().unwrap_or(0),
                total_points: board.player(record.id).map(|p| p.total()).unwrap_or(0),
                role: record.role(),
                id: record.id,
                username: record.username,
                email: record.email,
                created_at: record.created_at,
            })
            .collect())
    }

    #[tracing::instrument(name = "Change user role", skip(self, actor), fields(admin_id = %actor.user_id))]
    pub async fn change_role(&self, actor: &Actor, user_id: Uuid, role: &str) -> Result<UserRole, ServiceError> {
        let role: UserRole = role.parse()?;
        if user_id == actor.user_id {
            return Err(ServiceError::BadRequest("You cannot change your own role".into()));
        }
        require_affected(users::update_role(&self.pool, user_id, role).await?, "User not found")?;
        tracing::info!("User {} is now {}", user_id, role);
        Ok(role)
    }

    #[tracing::instrument(name = "Delete user", skip(self, actor), fields(admin_id = %actor.user_id))]
    pub async fn delete_user(&self, actor: &Actor, user_id: Uuid) -> Result<(), ServiceError> {
        if user_id == actor.user_id {
            return Err(ServiceError::BadRequest("You cannot delete your own account".into()));
        }
        require_affected(users::delete_user(&self.pool, user_id).await?, "User not found")
    }

    /// Every player's pick per fixture for one gameweek, scored where possible.
    pub async fn gameweek_predictions(&self, gameweek: i32) -> Result<Vec<FixtureBreakdown>, ServiceError> {
        let gameweek = i32::from(Gameweek::new(gameweek)?.number());
        let players = users::list_users(&self.pool).await?;
        let fixtures = fixtures::list_fixtures(&self.pool, Some(gameweek), None).await?;
        let predictions = predictions::list_predictions(&self.pool, None, Some(gameweek)).await?;
        let results = results::list_results(&self.pool, Some(gameweek), None).await?;
        Ok(gameweek_breakdown(&players, &fixtures, &predictions, &results))
    }

    pub async fn missing_predictions(&self, gameweek: i32) -> Result<Vec<SubmissionSummary>, ServiceError> {
        let gameweek = i32::from(Gameweek::new(gameweek)?.number());
        let players = users::list_players(&self.pool).await?;
        let fixtures = fixtures::list_fixtures(&self.pool, Some(gameweek), None).await?;
        if fixtures.is_empty() {
            return Err(ServiceError::NotFound(format!("No fixtures scheduled for GW{}", gameweek)));
        }
        let predictions = predictions::list_predictions(&self.pool, None, Some(gameweek)).await?;
        Ok(submission_summary(&players, &fixtures, &predictions))
    }

}
