use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A scheduled match, identified by the integer id assigned on import.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, PartialEq)]
pub struct Fixture {
    pub id: i32,
    pub gameweek: i32,
    pub home_team: String,
    pub away_team: String,
    pub kickoff_at: DateTime<Utc>,
    pub venue: Option<String>,
}

impl Fixture {
    pub fn has_kicked_off(&self, now: DateTime<Utc>) -> bool {
        now >= self.kickoff_at
    }
}

#[derive(Debug, Deserialize)]
pub struct FixtureQuery {
    pub gameweek: Option<i32>,
    /// Matches either the home or the away side.
    pub team: Option<String>,
}

/// One entry of an admin fixture import. Entries carrying an `id` replace that fixture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureImport {
    pub id: Option<i32>,
    pub gameweek: i32,
    pub home_team: String,
    pub away_team: String,
    pub kickoff_at: DateTime<Utc>,
    pub venue: Option<String>,
}
