use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Final score entered by an admin for one fixture.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, PartialEq)]
pub struct FixtureResult {
    pub id: Uuid,
    pub fixture_id: i32,
    pub gameweek: i32,
    pub actual_home: i32,
    pub actual_away: i32,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultRequest {
    pub fixture_id: i32,
    pub actual_home: i32,
    pub actual_away: i32,
}

#[derive(Debug, Deserialize)]
pub struct ResultQuery {
    pub gameweek: Option<i32>,
    pub fixture_id: Option<i32>,
}
