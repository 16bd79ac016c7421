use std::collections::{HashMap, HashSet};
use serde::Serialize;
use uuid::Uuid;

use crate::models::fixture::Fixture;
use crate::models::fixture_result::FixtureResult;
use crate::models::prediction::Prediction;
use crate::models::user::User;
use crate::scoring::points::{award, Award, ScoreLine};
use crate::scoring::{Gameweek, SEASON_GAMEWEEKS};

/// Points and hit counts for one player in one gameweek.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GameweekTally {
    pub points: u32,
    pub exact_scores: u32,
    pub correct_results: u32,
    pub wrong: u32,
}

impl GameweekTally {
    fn record(&mut self, award: Award) {
        self.points += award.points();
        match award {
            Award::ExactScore => self.exact_scores += 1,
            Award::CorrectResult => self.correct_results += 1,
            Award::Wrong => self.wrong += 1,
        }
    }

    fn absorb(&mut self, other: &GameweekTally) {
        self.points += other.points;
        self.exact_scores += other.exact_scores;
        self.correct_results += other.correct_results;
        self.wrong += other.wrong;
    }

    /// Predictions that had a result to be scored against.
    pub fn scored(&self) -> u32 {
        self.exact_scores + self.correct_results + self.wrong
    }
}

#[derive(Debug, Clone)]
pub struct PlayerTally {
    pub user_id: Uuid,
    pub username: String,
    weeks: [GameweekTally; SEASON_GAMEWEEKS as usize],
}

impl PlayerTally {
    fn new(user: &User) -> Self {
        Self {
            user_id: user.id,
            username: user.username.clone(),
            weeks: [GameweekTally::default(); SEASON_GAMEWEEKS as usize],
        }
    }

    pub fn gameweek(&self, gameweek: Gameweek) -> &GameweekTally {
        &self.weeks[gameweek.index()]
    }

    pub fn weeks(&self) -> impl Iterator<Item = (Gameweek, &GameweekTally)> {
        Gameweek::all().zip(self.weeks.iter())
    }

    /// Whole-season figures; `season().points` is always the sum of the gameweek points.
    pub fn season(&self) -> GameweekTally {
        self.weeks.iter().fold(GameweekTally::default(), |mut acc, week| {
            acc.absorb(week);
            acc
        })
    }

    pub fn total(&self) -> u32 {
        self.weeks.iter().map(|week| week.points).sum()
    }

    pub fn points_by_gameweek(&self) -> Vec<u32> {
        self.weeks.iter().map(|week| week.points).collect()
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LeaderboardRow {
    pub rank: u32,
    pub user_id: Uuid,
    pub username: String,
    pub total: u32,
    /// Index 0 holds gameweek 1.
    pub gameweeks: Vec<u32>,
    pub exact_scores: u32,
    pub correct_results: u32,
    pub scored_predictions: u32,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GameweekRow {
    pub rank: u32,
    pub user_id: Uuid,
    pub username: String,
    pub gameweek: Gameweek,
    pub points: u32,
    pub exact_scores: u32,
    pub correct_results: u32,
    pub scored_predictions: u32,
}

/// Season standings derived from the prediction × result join.
///
/// Built fresh from store snapshots; holds no reference to the stores and is
/// never cached, so concurrent requests each compute their own copy.
#[derive(Debug, Clone, Default)]
pub struct Leaderboard {
    players: Vec<PlayerTally>,
}

impl Leaderboard {
    /// Tally every user's predictions against the known results.
    ///
    /// A prediction counts towards the gameweek of its fixture. Predictions for
    /// fixtures without a result are simply not scored. Records that cannot be
    /// joined (unknown user, unknown fixture, out-of-range gameweek, duplicate
    /// user/fixture pair) are skipped with a warning rather than failing the table.
    pub fn compute(
        users: &[User],
        fixtures: &[Fixture],
        predictions: &[Prediction],
        results: &[FixtureResult],
    ) -> Self {
        let mut players: Vec<PlayerTally> = Vec::with_capacity(users.len());
        let mut slots: HashMap<Uuid, usize> = HashMap::with_capacity(users.len());
        for user in users {
            if slots.contains_key(&user.id) {
                continue;
            }
            slots.insert(user.id, players.len());
            players.push(PlayerTally::new(user));
        }

        let gameweek_of: HashMap<i32, Gameweek> = fixtures
            .iter()
            .filter_map(|fixture| match Gameweek::new(fixture.gameweek) {
                Ok(gameweek) => Some((fixture.id, gameweek)),
                Err(e) => {
                    tracing::warn!("Skipping fixture {}: {}", fixture.id, e);
                    None
                }
            })
            .collect();

        let actual_scores: HashMap<i32, ScoreLine> = results
            .iter()
            .filter_map(|result| {
                let line = ScoreLine::from_stored(result.actual_home, result.actual_away);
                if line.is_none() {
                    tracing::warn!("Skipping result {} with invalid score", result.id);
                }
                line.map(|line| (result.fixture_id, line))
            })
            .collect();

        let mut seen: HashSet<(Uuid, i32)> = HashSet::with_capacity(predictions.len());
        let mut skipped = 0usize;

        for prediction in predictions {
            let Some(&slot) = slots.get(&prediction.user_id) else {
                tracing::warn!("Skipping prediction {}: unknown user {}", prediction.id, prediction.user_id);
                skipped += 1;
                continue;
            };
            let Some(&gameweek) = gameweek_of.get(&prediction.fixture_id) else {
                tracing::warn!("Skipping prediction {}: unknown fixture {}", prediction.id, prediction.fixture_id);
                skipped += 1;
                continue;
            };
            if !seen.insert((prediction.user_id, prediction.fixture_id)) {
                tracing::warn!("Skipping duplicate prediction {} for fixture {}", prediction.id, prediction.fixture_id);
                skipped += 1;
                continue;
            }
            let Some(&actual) = actual_scores.get(&prediction.fixture_id) else {
                continue;
            };
            let Some(predicted) = ScoreLine::from_stored(prediction.predicted_home, prediction.predicted_away) else {
                tracing::warn!("Skipping prediction {} with invalid score", prediction.id);
                skipped += 1;
                continue;
            };

            players[slot].weeks[gameweek.index()].record(award(predicted, actual));
        }

        if skipped > 0 {
            tracing::warn!("Leaderboard computed with {} orphaned predictions skipped", skipped);
        }

        Self { players }
    }

    pub fn players(&self) -> &[PlayerTally] {
        &self.players
    }

    pub fn player(&self, user_id: Uuid) -> Option<&PlayerTally> {
        self.players.iter().find(|player| player.user_id == user_id)
    }

    /// Overall table, ordered by total and then by the tie-break.
    pub fn standings(&self) -> Vec<LeaderboardRow> {
        ranked_by(&self.players, PlayerTally::total)
            .into_iter()
            .zip(1u32..)
            .map(|(player, rank)| {
                let season = player.season();
                LeaderboardRow {
                    rank,
                    user_id: player.user_id,
                    username: player.username.clone(),
                    total: season.points,
                    gameweeks: player.points_by_gameweek(),
                    exact_scores: season.exact_scores,
                    correct_results: season.correct_results,
                    scored_predictions: season.scored(),
                }
            })
            .collect()
    }

    /// Ranking within one gameweek only, independent of the overall table.
    pub fn gameweek_standings(&self, gameweek: Gameweek) -> Vec<GameweekRow> {
        ranked_by(&self.players, |player| player.gameweek(gameweek).points)
            .into_iter()
            .zip(1u32..)
            .map(|(player, rank)| {
                let week = player.gameweek(gameweek);
                GameweekRow {
                    rank,
                    user_id: player.user_id,
                    username: player.username.clone(),
                    gameweek,
                    points: week.points,
                    exact_scores: week.exact_scores,
                    correct_results: week.correct_results,
                    scored_predictions: week.scored(),
                }
            })
            .collect()
    }

    pub fn rank_of(&self, user_id: Uuid) -> Option<u32> {
        ranked_by(&self.players, PlayerTally::total)
            .into_iter()
            .position(|player| player.user_id == user_id)
            .map(|position| position as u32 + 1)
    }
}

/// Points descending, then username case-insensitively, then user id.
fn ranked_by<F>(players: &[PlayerTally], points: F) -> Vec<&PlayerTally>
where
    F: Fn(&PlayerTally) -> u32,
{
    let mut ordered: Vec<(u32, String, &PlayerTally)> = players
        .iter()
        .map(|player| (points(player), player.username.to_lowercase(), player))
        .collect();
    ordered.sort_by(|a, b| {
        b.0.cmp(&a.0)
            .then_with(|| a.1.cmp(&b.1))
            .then_with(|| a.2.user_id.cmp(&b.2.user_id))
    });
    ordered.into_iter().map(|(_, _, player)| player).collect()
}
