use chrono::{Duration, Utc};
use uuid::Uuid;

use gameweek_predictor::models::fixture::Fixture;
use gameweek_predictor::models::fixture_result::FixtureResult;
use gameweek_predictor::models::prediction::Prediction;
use gameweek_predictor::models::user::{User, UserRole};
use gameweek_predictor::scoring::leaderboard::Leaderboard;
use gameweek_predictor::scoring::stats::{PlayerStats, SeasonOverview};
use gameweek_predictor::scoring::Gameweek;

fn user(name: &str) -> User {
    User {
        id: Uuid::new_v4(),
        username: name.to_string(),
        email: format!("{}@example.com", name),
        role: UserRole::User,
    }
}

fn fixture(id: i32, gameweek: i32) -> Fixture {
    Fixture {
        id,
        gameweek,
        home_team: format!("Home {}", id),
        away_team: format!("Away {}", id),
        kickoff_at: Utc::now() - Duration::days(7),
        venue: None,
    }
}

fn result(fixture: &Fixture, home: i32, away: i32) -> FixtureResult {
    FixtureResult {
        id: Uuid::new_v4(),
        fixture_id: fixture.id,
        gameweek: fixture.gameweek,
        actual_home: home,
        actual_away: away,
        updated_at: Utc::now(),
    }
}

fn pick(user: &User, fixture_id: i32, gameweek: i32, home: i32, away: i32) -> Prediction {
    Prediction {
        id: Uuid::new_v4(),
        user_id: user.id,
        fixture_id,
        gameweek,
        predicted_home: home,
        predicted_away: away,
        updated_at: Utc::now(),
    }
}

struct Season {
    alice: User,
    bob: User,
    carol: User,
    dave: User,
    board: Leaderboard,
    fixtures: Vec<Fixture>,
    results: Vec<FixtureResult>,
    predictions: Vec<Prediction>,
}

/// Three fixtures with results over two gameweeks plus one still to be played.
///
/// | player | GW1 f1 (2-1) | GW1 f2 (0-0) | GW2 f3 (1-3) | total |
/// |--------|--------------|--------------|--------------|-------|
/// | alice  | 2-1 → 5      | 1-1 → 2      | 0-2 → 2      | 9     |
/// | bob    | 1-0 → 2      | 0-0 → 5      | 1-3 → 5      | 12    |
/// | carol  | 0-2 → 0      | 2-1 → 0      | 2-2 → 0      | 0     |
/// | dave   | -            | -            | -            | 0     |
fn season() -> Season {
    let (alice, bob, carol, dave) = (user("alice"), user("bob"), user("carol"), user("Dave"));
    let fixtures = vec![fixture(1, 1), fixture(2, 1), fixture(3, 2), fixture(4, 2)];
    let results = vec![
        result(&fixtures[0], 2, 1),
        result(&fixtures[1], 0, 0),
        result(&fixtures[2], 1, 3),
    ];
    let predictions = vec![
        pick(&alice, 1, 1, 2, 1),
        pick(&alice, 2, 1, 1, 1),
        pick(&alice, 3, 2, 0, 2),
        // No result yet, must not count
        pick(&alice, 4, 2, 1, 0),
        pick(&bob, 1, 1, 1, 0),
        pick(&bob, 2, 1, 0, 0),
        pick(&bob, 3, 2, 1, 3),
        // Unknown fixture, skipped
        pick(&bob, 99, 2, 1, 3),
        pick(&carol, 1, 1, 0, 2),
        pick(&carol, 2, 1, 2, 1),
        pick(&carol, 3, 2, 2, 2),
    ];
    let users = vec![alice.clone(), bob.clone(), carol.clone(), dave.clone()];
    let board = Leaderboard::compute(&users, &fixtures, &predictions, &results);

    Season { alice, bob, carol, dave, board, fixtures, results, predictions }
}

#[test]
fn season_table_matches_hand_computed_totals() {
    let season = season();
    let table = season.board.standings();

    let order: Vec<(&str, u32, u32)> = table
        .iter()
        .map(|row| (row.username.as_str(), row.rank, row.total))
        .collect();
    assert_eq!(
        order,
        vec![("bob", 1, 12), ("alice", 2, 9), ("carol", 3, 0), ("Dave", 4, 0)]
    );

    let bob = &table[0];
    assert_eq!(bob.user_id, season.bob.id);
    assert_eq!(bob.gameweeks.len(), 38);
    assert_eq!(&bob.gameweeks[..2], &[7, 5]);
    assert_eq!((bob.exact_scores, bob.correct_results, bob.scored_predictions), (2, 1, 3));

    let alice = &table[1];
    assert_eq!(&alice.gameweeks[..2], &[7, 2]);
    assert_eq!((alice.exact_scores, alice.correct_results, alice.scored_predictions), (1, 2, 3));
}

#[test]
fn every_total_is_the_sum_of_its_gameweeks() {
    let season = season();
    for row in season.board.standings() {
        assert_eq!(row.total, row.gameweeks.iter().sum::<u32>(), "{}", row.username);
    }
}

#[test]
fn player_without_predictions_is_listed_with_zero() {
    let season = season();
    let table = season.board.standings();
    let dave = table.iter().find(|row| row.user_id == season.dave.id).unwrap();
    assert_eq!(dave.total, 0);
    assert!(dave.gameweeks.iter().all(|points| *points == 0));
    assert_eq!(dave.rank, 4);
}

#[test]
fn gameweek_view_ranks_within_the_gameweek_only() {
    let season = season();

    // alice and bob both score 7 in GW1; the tie falls back to the username
    let gw1 = season.board.gameweek_standings(Gameweek::new(1).unwrap());
    let order: Vec<(&str, u32, u32)> = gw1.iter().map(|row| (row.username.as_str(), row.rank, row.points)).collect();
    assert_eq!(order, vec![("alice", 1, 7), ("bob", 2, 7), ("carol", 3, 0), ("Dave", 4, 0)]);

    let gw2 = season.board.gameweek_standings(Gameweek::new(2).unwrap());
    assert_eq!(gw2[0].user_id, season.bob.id);
    assert_eq!(gw2[0].points, 5);
    assert_eq!(gw2[1].user_id, season.alice.id);
    assert_eq!(gw2[1].points, 2);

    let gw3 = season.board.gameweek_standings(Gameweek::new(3).unwrap());
    assert!(gw3.iter().all(|row| row.points == 0));
}

#[test]
fn ranks_are_sequential_even_when_tied() {
    let season = season();
    let ranks: Vec<u32> = season.board.standings().iter().map(|row| row.rank).collect();
    assert_eq!(ranks, vec![1, 2, 3, 4]);
}

#[test]
fn recomputing_from_the_same_inputs_is_stable() {
    let season = season();
    let users = vec![season.dave.clone(), season.carol.clone(), season.bob.clone(), season.alice.clone()];
    let again = Leaderboard::compute(&users, &season.fixtures, &season.predictions, &season.results);
    assert_eq!(again.standings(), season.board.standings());
}

#[test]
fn personal_stats_follow_the_table() {
    let season = season();
    let stats = PlayerStats::compute(&season.board, season.alice.id, 4).unwrap();

    assert_eq!(stats.username, "alice");
    assert_eq!(stats.total_points, 9);
    assert_eq!(stats.total_predictions, 4);
    assert_eq!(stats.predictions_scored, 3);
    assert_eq!((stats.exact_scores, stats.correct_results, stats.wrong_predictions), (1, 2, 0));
    assert_eq!(stats.accuracy_pct, 100);
    assert_eq!(stats.best_week_points, 7);
    assert_eq!(stats.best_week_num, Gameweek::new(1).ok());
    assert_eq!(stats.worst_week_points, 2);
    assert_eq!(stats.worst_week_num, Gameweek::new(2).ok());
    assert_eq!(stats.current_rank, Some(2));
    assert_eq!(stats.total_players, 4);
    assert_eq!(stats.weekly_progression.len(), 2);

    let carol = PlayerStats::compute(&season.board, season.carol.id, 3).unwrap();
    assert_eq!(carol.accuracy_pct, 0);
    assert_eq!(carol.wrong_predictions, 3);

    assert!(PlayerStats::compute(&season.board, Uuid::new_v4(), 0).is_none());
}

#[test]
fn overview_points_at_the_first_unscored_gameweek() {
    let season = season();
    let overview = SeasonOverview::compute(4, &season.fixtures, season.predictions.len() as u32, &season.results);

    assert_eq!(overview.total_users, 4);
    assert_eq!(overview.total_fixtures, 4);
    assert_eq!(overview.total_results, 3);
    assert_eq!(overview.scored_gameweeks, 2);
    // GW2 has a result already, so every scheduled gameweek counts as scored
    assert_eq!(overview.next_gameweek, None);
    assert_eq!(overview.completion_pct, 75);
}
