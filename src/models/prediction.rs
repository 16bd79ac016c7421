use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, PartialEq)]
pub struct Prediction {
    pub id: Uuid,
    pub user_id: Uuid,
    pub fixture_id: i32,
    pub gameweek: i32,
    pub predicted_home: i32,
    pub predicted_away: i32,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub fixture_id: i32,
    pub predicted_home: i32,
    pub predicted_away: i32,
}

/// A whole gameweek submitted at once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameweekPredictionsRequest {
    pub gameweek: i32,
    pub predictions: Vec<PredictionRequest>,
}

/// Admin override on behalf of a player.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminPredictionRequest {
    pub user_id: Uuid,
    pub fixture_id: i32,
    pub predicted_home: i32,
    pub predicted_away: i32,
}

impl AdminPredictionRequest {
    pub fn split(&self) -> (Uuid, PredictionRequest) {
        (
            self.user_id,
            PredictionRequest {
                fixture_id: self.fixture_id,
                predicted_home: self.predicted_home,
                predicted_away: self.predicted_away,
            },
        )
    }
}

#[derive(Debug, Deserialize)]
pub struct PredictionQuery {
    pub gameweek: Option<i32>,
    pub user_id: Option<Uuid>,
}
