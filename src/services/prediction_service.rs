use std::collections::{HashMap, HashSet};
use chrono::Utc;
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use crate::config::settings::CompetitionSettings;
use crate::db::helpers::{require_affected, require_record};
use crate::db::{fixtures, predictions, users};
use crate::models::fixture::Fixture;
use crate::models::prediction::{GameweekPredictionsRequest, Prediction, PredictionQuery, PredictionRequest};
use crate::models::user::Actor;
use crate::scoring::points::ScoreLine;
use crate::scoring::Gameweek;
use crate::services::error::ServiceError;
use crate::utils::validation::{validate_score_line, ValidationError};

/// Prediction writes and reads, with the competition's lock policy applied to non-admins.
#[derive(Debug)]
pub struct PredictionService {
    pool: PgPool,
    competition: CompetitionSettings,
}

impl PredictionService {
    pub fn new(pool: PgPool, competition: CompetitionSettings) -> Self {
        Self { pool, competition }
    }

    /// Non-admins only ever see their own predictions.
    pub async fn list(&self, actor: &Actor, query: &PredictionQuery) -> Result<Vec<Prediction>, ServiceError> {
        let gameweek = query.gameweek.map(Gameweek::new).transpose()?;
        let user_id = match (actor.is_admin(), query.user_id) {
            (true, filter) => filter,
            (false, Some(other)) if other != actor.user_id => {
                return Err(ServiceError::Forbidden("You can only view your own predictions".into()));
            }
            (false, _) => Some(actor.user_id),
        };
        Ok(predictions::list_predictions(&self.pool, user_id, gameweek.map(|gw| i32::from(gw.number()))).await?)
    }

    #[tracing::instrument(
        name = "Submit prediction",
        skip(self, actor, request),
        fields(user_id = %actor.user_id, fixture_id = request.fixture_id)
    )]
    pub async fn submit(&self, actor: &Actor, request: &PredictionRequest) -> Result<Prediction, ServiceError> {
        let line = self.validate(request)?;
        let fixture = require_record(
            fixtures::find_fixture(&self.pool, request.fixture_id).await,
            "Fixture not found",
        )?;
        self.check_policy(actor, &fixture)?;
        self.write(&self.pool, actor, actor.user_id, &fixture, line).await
    }

    /// Validate every entry first, then write all of them in one transaction.
    #[tracing::instrument(
        name = "Submit gameweek predictions",
        skip(self, actor, request),
        fields(user_id = %actor.user_id, gameweek = request.gameweek, count = request.predictions.len())
    )]
    pub async fn submit_gameweek(
        &self,
        actor: &Actor,
        request: &GameweekPredictionsRequest,
    ) -> Result<Vec<Prediction>, ServiceError> {
        let gameweek = Gameweek::new(request.gameweek)?;
        let gameweek_fixtures: HashMap<i32, Fixture> =
            fixtures::list_fixtures(&self.pool, Some(i32::from(gameweek.number())), None)
                .await?
                .into_iter()
                .map(|fixture| (fixture.id, fixture))
                .collect();

        let mut seen = HashSet::with_capacity(request.predictions.len());
        let mut planned: Vec<(&Fixture, ScoreLine)> = Vec::with_capacity(request.predictions.len());
        for entry in &request.predictions {
            if !seen.insert(entry.fixture_id) {
                return Err(ValidationError::DuplicateFixture(entry.fixture_id).into());
            }
            let line = self.validate(entry)?;
            let Some(fixture) = gameweek_fixtures.get(&entry.fixture_id) else {
                let other = require_record(
                    fixtures::find_fixture(&self.pool, entry.fixture_id).await,
                    "Fixture not found",
                )?;
                return Err(ValidationError::GameweekMismatch {
                    fixture_id: other.id,
                    expected: request.gameweek,
                    actual: other.gameweek,
                }
                .into());
            };
            self.check_policy(actor, fixture)?;
            planned.push((fixture, line));
        }

        let mut tx = self.pool.begin().await?;
        let mut saved = Vec::with_capacity(planned.len());
        for (fixture, line) in planned {
            saved.push(self.write(&mut *tx, actor, actor.user_id, fixture, line).await?);
        }
        tx.commit().await?;

        tracing::info!("Saved {} predictions for {}", saved.len(), gameweek);
        Ok(saved)
    }

    /// Admin write on behalf of `owner`; bypasses every lock.
    #[tracing::instrument(
        name = "Override prediction",
        skip(self, actor, request),
        fields(admin_id = %actor.user_id, owner = %owner, fixture_id = request.fixture_id)
    )]
    pub async fn override_for(
        &self,
        actor: &Actor,
        owner: Uuid,
        request: &PredictionRequest,
    ) -> Result<Prediction, ServiceError> {
        if !actor.is_admin() {
            return Err(ServiceError::Forbidden("Admin access required".into()));
        }
        let line = self.validate(request)?;
        require_record(users::find_by_id(&self.pool, owner).await, "User not found")?;
        let fixture = require_record(
            fixtures::find_fixture(&self.pool, request.fixture_id).await,
            "Fixture not found",
        )?;
        self.write(&self.pool, actor, owner, &fixture, line).await
    }

    #[tracing::instrument(name = "Delete prediction", skip(self, actor), fields(user_id = %actor.user_id))]
    pub async fn delete(&self, actor: &Actor, prediction_id: Uuid) -> Result<(), ServiceError> {
        let prediction = require_record(
            predictions::find_prediction(&self.pool, prediction_id).await,
            "Prediction not found",
        )?;
        if !actor.is_admin() {
            if prediction.user_id != actor.user_id {
                return Err(ServiceError::Forbidden("Unauthorized to delete this prediction".into()));
            }
            if let Some(fixture) = fixtures::find_fixture(&self.pool, prediction.fixture_id).await? {
                self.check_policy(actor, &fixture)?;
            }
        }
        require_affected(
            predictions::delete_prediction(&self.pool, prediction_id).await?,
            "Prediction not found",
        )
    }

    fn validate(&self, request: &PredictionRequest) -> Result<ScoreLine, ValidationError> {
        validate_score_line(request.predicted_home, request.predicted_away, self.competition.max_goals)
    }

    fn check_policy(&self, actor: &Actor, fixture: &Fixture) -> Result<(), ServiceError> {
        if actor.is_admin() {
            return Ok(());
        }
        if self.competition.lock_at_kickoff && fixture.has_kicked_off(Utc::now()) {
            return Err(ServiceError::Locked(format!(
                "Predictions for {} v {} closed at kickoff",
                fixture.home_team, fixture.away_team
            )));
        }
        Ok(())
    }

    async fn write<'e, E>(
        &self,
        executor: E,
        actor: &Actor,
        owner: Uuid,
        fixture: &Fixture,
        line: ScoreLine,
    ) -> Result<Prediction, ServiceError>
    where
        E: PgExecutor<'e>,
    {
        if actor.is_admin() || self.competition.allow_resubmission {
            return Ok(predictions::upsert_prediction(executor, owner, fixture, line).await?);
        }
        predictions::insert_prediction_once(executor, owner, fixture, line)
            .await?
            .ok_or_else(|| ServiceError::Locked("Prediction already submitted for this fixture".into()))
    }
}
