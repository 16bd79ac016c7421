use std::collections::{BTreeSet, HashMap, HashSet};
use serde::Serialize;
use uuid::Uuid;

use crate::models::fixture::Fixture;
use crate::models::fixture_result::FixtureResult;
use crate::models::prediction::Prediction;
use crate::models::user::User;
use crate::scoring::leaderboard::Leaderboard;
use crate::scoring::points::{score, ScoreLine};
use crate::scoring::Gameweek;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WeeklyPoints {
    pub gameweek: Gameweek,
    pub points: u32,
}

/// Personal dashboard figures for one player.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PlayerStats {
    pub username: String,
    pub total_points: u32,
    pub total_predictions: u32,
    pub predictions_scored: u32,
    pub exact_scores: u32,
    pub correct_results: u32,
    pub wrong_predictions: u32,
    pub accuracy_pct: u32,
    pub best_week_points: u32,
    pub best_week_num: Option<Gameweek>,
    pub worst_week_points: u32,
    pub worst_week_num: Option<Gameweek>,
    pub current_rank: Option<u32>,
    pub total_players: u32,
    pub weekly_progression: Vec<WeeklyPoints>,
}

impl PlayerStats {
    pub fn compute(board: &Leaderboard, user_id: Uuid, total_predictions: u32) -> Option<Self> {
        let player = board.player(user_id)?;
        let season = player.season();

        let weekly_progression: Vec<WeeklyPoints> = player
            .weeks()
            .filter(|(_, week)| week.scored() > 0)
            .map(|(gameweek, week)| WeeklyPoints { gameweek, points: week.points })
            .collect();

        // Earliest gameweek wins ties in both directions.
        let best = weekly_progression
            .iter()
            .fold(None::<&WeeklyPoints>, |best, week| match best {
                Some(b) if b.points >= week.points => Some(b),
                _ => Some(week),
            });
        let worst = weekly_progression
            .iter()
            .fold(None::<&WeeklyPoints>, |worst, week| match worst {
                Some(w) if w.points <= week.points => Some(w),
                _ => Some(week),
            });

        Some(Self {
            username: player.username.clone(),
            total_points: season.points,
            total_predictions,
            predictions_scored: season.scored(),
            exact_scores: season.exact_scores,
            correct_results: season.correct_results,
            wrong_predictions: season.wrong,
            accuracy_pct: percentage(season.exact_scores + season.correct_results, season.scored()),
            best_week_points: best.map_or(0, |w| w.points),
            best_week_num: best.map(|w| w.gameweek),
            worst_week_points: worst.map_or(0, |w| w.points),
            worst_week_num: worst.map(|w| w.gameweek),
            current_rank: board.rank_of(user_id),
            total_players: board.players().len() as u32,
            weekly_progression,
        })
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SeasonOverview {
    pub total_users: u32,
    pub total_fixtures: u32,
    pub total_predictions: u32,
    pub total_results: u32,
    pub scored_gameweeks: u32,
    pub next_gameweek: Option<i32>,
    pub completion_pct: u32,
}

impl SeasonOverview {
    pub fn compute(
        total_users: u32,
        fixtures: &[Fixture],
        total_predictions: u32,
        results: &[FixtureResult],
    ) -> Self {
        let scored: BTreeSet<i32> = results.iter().map(|r| r.gameweek).collect();
        let scheduled: BTreeSet<i32> = fixtures.iter().map(|f| f.gameweek).collect();
        let next_gameweek = scheduled.into_iter().find(|gw| !scored.contains(gw));

        Self {
            total_users,
            total_fixtures: fixtures.len() as u32,
            total_predictions,
            total_results: results.len() as u32,
            scored_gameweeks: scored.len() as u32,
            next_gameweek,
            completion_pct: percentage(results.len() as u32, fixtures.len() as u32),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SubmissionSummary {
    pub user_id: Uuid,
    pub username: String,
    pub submitted: u32,
    pub missing: u32,
    pub total: u32,
    pub complete: bool,
}

/// Which players still owe predictions for the given gameweek fixtures.
pub fn submission_summary(
    players: &[User],
    fixtures: &[Fixture],
    predictions: &[Prediction],
) -> Vec<SubmissionSummary> {
    let fixture_ids: HashSet<i32> = fixtures.iter().map(|f| f.id).collect();
    let submitted: HashSet<(Uuid, i32)> = predictions
        .iter()
        .filter(|p| fixture_ids.contains(&p.fixture_id))
        .map(|p| (p.user_id, p.fixture_id))
        .collect();
    let total = fixture_ids.len() as u32;

    players
        .iter()
        .map(|player| {
            let count = fixture_ids
                .iter()
                .filter(|id| submitted.contains(&(player.id, **id)))
                .count() as u32;
            SubmissionSummary {
                user_id: player.id,
                username: player.username.clone(),
                submitted: count,
                missing: total - count,
                total,
                complete: count == total,
            }
        })
        .collect()
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PlayerPick {
    pub user_id: Uuid,
    pub username: String,
    pub predicted: Option<ScoreLine>,
    /// `None` when there is no prediction or no result yet.
    pub points: Option<u32>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FixtureBreakdown {
    pub fixture_id: i32,
    pub home_team: String,
    pub away_team: String,
    pub result: Option<ScoreLine>,
    pub predictions: Vec<PlayerPick>,
}

/// Every player's pick for every fixture, scored where a result exists.
pub fn gameweek_breakdown(
    players: &[User],
    fixtures: &[Fixture],
    predictions: &[Prediction],
    results: &[FixtureResult],
) -> Vec<FixtureBreakdown> {
    let result_lookup: HashMap<i32, ScoreLine> = results
        .iter()
        .filter_map(|r| ScoreLine::from_stored(r.actual_home, r.actual_away).map(|line| (r.fixture_id, line)))
        .collect();
    let pick_lookup: HashMap<(Uuid, i32), ScoreLine> = predictions
        .iter()
        .filter_map(|p| {
            ScoreLine::from_stored(p.predicted_home, p.predicted_away).map(|line| ((p.user_id, p.fixture_id), line))
        })
        .collect();

    fixtures
        .iter()
        .map(|fixture| {
            let result = result_lookup.get(&fixture.id).copied();
            let predictions = players
                .iter()
                .map(|player| {
                    let predicted = pick_lookup.get(&(player.id, fixture.id)).copied();
                    let points = predicted.zip(result).map(|(p, r)| score(p, r));
                    PlayerPick {
                        user_id: player.id,
                        username: player.username.clone(),
                        predicted,
                        points,
                    }
                })
                .collect();
            FixtureBreakdown {
                fixture_id: fixture.id,
                home_team: fixture.home_team.clone(),
                away_team: fixture.away_team.clone(),
                result,
                predictions,
            }
        })
        .collect()
}

pub fn prediction_counts(predictions: &[Prediction]) -> HashMap<Uuid, u32> {
    predictions.iter().fold(HashMap::new(), |mut counts, p| {
        *counts.entry(p.user_id).or_insert(0) += 1;
        counts
    })
}

/// Halves round to even, so 12.5% reports as 12.
fn percentage(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        0
    } else {
        (f64::from(part) * 100.0 / f64::from(whole)).round_ties_even() as u32
    }
}
