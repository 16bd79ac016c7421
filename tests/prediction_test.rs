use reqwest::{Client, Method};
use serde_json::{json, Value};

use gameweek_predictor::config::settings::CompetitionSettings;

mod common;
use common::admin_helpers::{create_admin_user_and_login, create_fixture, post_prediction};
use common::utils::{create_test_user_and_login, kickoff_in, make_authenticated_request, spawn_app, spawn_app_with};

#[tokio::test]
async fn prediction_is_created_then_updated_in_place() {
    let test_app = spawn_app().await;
    let admin = create_admin_user_and_login(&test_app).await;
    let player = create_test_user_and_login(&test_app.address).await;
    let fixture_id = create_fixture(&test_app, &admin.token, 3, "Arsenal", "Chelsea", kickoff_in(48)).await;

    let first = post_prediction(&test_app, &player.token, fixture_id, 2, 1).await;
    assert_eq!(200, first.status().as_u16());
    let first: Value = first.json().await.expect("Failed to parse response");
    assert_eq!(first["data"]["gameweek"], 3);

    let second = post_prediction(&test_app, &player.token, fixture_id, 0, 0).await;
    assert_eq!(200, second.status().as_u16());
    let second: Value = second.json().await.expect("Failed to parse response");
    assert_eq!(second["data"]["id"], first["data"]["id"]);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM predictions WHERE fixture_id = $1")
        .bind(fixture_id as i32)
        .fetch_one(&test_app.db_pool)
        .await
        .expect("Failed to count predictions");
    assert_eq!(count, 1);

    let stored: (i32, i32) = sqlx::query_as("SELECT predicted_home, predicted_away FROM predictions WHERE fixture_id = $1")
        .bind(fixture_id as i32)
        .fetch_one(&test_app.db_pool)
        .await
        .expect("Failed to fetch prediction");
    assert_eq!(stored, (0, 0));
}

#[tokio::test]
async fn invalid_scores_are_rejected() {
    let test_app = spawn_app().await;
    let admin = create_admin_user_and_login(&test_app).await;
    let player = create_test_user_and_login(&test_app.address).await;
    let client = Client::new();
    let fixture_id = create_fixture(&test_app, &admin.token, 1, "Everton", "Fulham", kickoff_in(48)).await;

    let negative = post_prediction(&test_app, &player.token, fixture_id, -1, 0).await;
    assert_eq!(400, negative.status().as_u16());

    let too_many = post_prediction(&test_app, &player.token, fixture_id, 21, 0).await;
    assert_eq!(400, too_many.status().as_u16());

    let fractional = make_authenticated_request(
        &client,
        Method::POST,
        &format!("{}/predictions", test_app.address),
        &player.token,
        Some(json!({ "fixture_id": fixture_id, "predicted_home": 1.5, "predicted_away": 0 })),
    ).await;
    assert_eq!(400, fractional.status().as_u16());

    let unknown_fixture = post_prediction(&test_app, &player.token, 9999, 1, 0).await;
    assert_eq!(404, unknown_fixture.status().as_u16());
}

#[tokio::test]
async fn predictions_lock_at_kickoff_for_players_but_not_admins() {
    let test_app = spawn_app().await;
    let admin = create_admin_user_and_login(&test_app).await;
    let player = create_test_user_and_login(&test_app.address).await;
    let client = Client::new();
    let fixture_id = create_fixture(&test_app, &admin.token, 2, "Leeds", "Burnley", kickoff_in(-1)).await;

    let late = post_prediction(&test_app, &player.token, fixture_id, 1, 1).await;
    assert_eq!(409, late.status().as_u16());

    let override_response = make_authenticated_request(
        &client,
        Method::POST,
        &format!("{}/admin/predictions", test_app.address),
        &admin.token,
        Some(json!({
            "user_id": player.id,
            "fixture_id": fixture_id,
            "predicted_home": 1,
            "predicted_away": 1,
        })),
    ).await;
    assert_eq!(200, override_response.status().as_u16());
    let body: Value = override_response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["user_id"], player.id.as_str());
}

#[tokio::test]
async fn resubmission_can_be_disabled() {
    let competition = CompetitionSettings {
        allow_resubmission: false,
        ..CompetitionSettings::default()
    };
    let test_app = spawn_app_with(competition).await;
    let admin = create_admin_user_and_login(&test_app).await;
    let player = create_test_user_and_login(&test_app.address).await;
    let fixture_id = create_fixture(&test_app, &admin.token, 5, "Brighton", "Wolves", kickoff_in(24)).await;

    let first = post_prediction(&test_app, &player.token, fixture_id, 3, 1).await;
    assert_eq!(200, first.status().as_u16());

    let change = post_prediction(&test_app, &player.token, fixture_id, 0, 1).await;
    assert_eq!(409, change.status().as_u16());
}

#[tokio::test]
async fn gameweek_batch_is_all_or_nothing() {
    let test_app = spawn_app().await;
    let admin = create_admin_user_and_login(&test_app).await;
    let player = create_test_user_and_login(&test_app.address).await;
    let client = Client::new();
    let first = create_fixture(&test_app, &admin.token, 4, "Spurs", "Villa", kickoff_in(24)).await;
    let second = create_fixture(&test_app, &admin.token, 4, "Newcastle", "Brentford", kickoff_in(26)).await;
    let other_week = create_fixture(&test_app, &admin.token, 5, "Palace", "Bournemouth", kickoff_in(200)).await;
    let batch_url = format!("{}/predictions/batch", test_app.address);

    // One entry belongs to another gameweek: nothing is written
    let mixed = make_authenticated_request(
        &client,
        Method::POST,
        &batch_url,
        &player.token,
        Some(json!({
            "gameweek": 4,
            "predictions": [
                { "fixture_id": first, "predicted_home": 1, "predicted_away": 0 },
                { "fixture_id": other_week, "predicted_home": 2, "predicted_away": 2 },
            ]
        })),
    ).await;
    assert_eq!(400, mixed.status().as_u16());

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM predictions")
        .fetch_one(&test_app.db_pool)
        .await
        .expect("Failed to count predictions");
    assert_eq!(count, 0);

    let valid = make_authenticated_request(
        &client,
        Method::POST,
        &batch_url,
        &player.token,
        Some(json!({
            "gameweek": 4,
            "predictions": [
                { "fixture_id": first, "predicted_home": 1, "predicted_away": 0 },
                { "fixture_id": second, "predicted_home": 2, "predicted_away": 2 },
            ]
        })),
    ).await;
    assert_eq!(200, valid.status().as_u16());
    let body: Value = valid.json().await.expect("Failed to parse response");
    assert_eq!(body["data"].as_array().map(Vec::len), Some(2));

    let duplicate = make_authenticated_request(
        &client,
        Method::POST,
        &batch_url,
        &player.token,
        Some(json!({
            "gameweek": 4,
            "predictions": [
                { "fixture_id": first, "predicted_home": 1, "predicted_away": 0 },
                { "fixture_id": first, "predicted_home": 3, "predicted_away": 0 },
            ]
        })),
    ).await;
    assert_eq!(400, duplicate.status().as_u16());
}

#[tokio::test]
async fn players_only_see_and_delete_their_own_predictions() {
    let test_app = spawn_app().await;
    let admin = create_admin_user_and_login(&test_app).await;
    let alice = create_test_user_and_login(&test_app.address).await;
    let bob = create_test_user_and_login(&test_app.address).await;
    let client = Client::new();
    let fixture_id = create_fixture(&test_app, &admin.token, 6, "Forest", "Everton", kickoff_in(72)).await;

    let alice_pick: Value = post_prediction(&test_app, &alice.token, fixture_id, 1, 0).await
        .json().await.expect("Failed to parse response");
    post_prediction(&test_app, &bob.token, fixture_id, 0, 1).await;

    let own = make_authenticated_request(
        &client,
        Method::GET,
        &format!("{}/predictions?gameweek=6", test_app.address),
        &alice.token,
        None,
    ).await;
    assert_eq!(200, own.status().as_u16());
    let own: Value = own.json().await.expect("Failed to parse response");
    let rows = own["data"].as_array().expect("data should be an array");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["user_id"], alice.id.as_str());

    let snooping = make_authenticated_request(
        &client,
        Method::GET,
        &format!("{}/predictions?user_id={}", test_app.address, alice.id),
        &bob.token,
        None,
    ).await;
    assert_eq!(403, snooping.status().as_u16());

    let all_for_admin = make_authenticated_request(
        &client,
        Method::GET,
        &format!("{}/predictions?gameweek=6", test_app.address),
        &admin.token,
        None,
    ).await;
    let all_for_admin: Value = all_for_admin.json().await.expect("Failed to parse response");
    assert_eq!(all_for_admin["data"].as_array().map(Vec::len), Some(2));

    let prediction_id = alice_pick["data"]["id"].as_str().expect("prediction id");
    let bob_deletes = make_authenticated_request(
        &client,
        Method::DELETE,
        &format!("{}/predictions/{}", test_app.address, prediction_id),
        &bob.token,
        None,
    ).await;
    assert_eq!(403, bob_deletes.status().as_u16());

    let alice_deletes = make_authenticated_request(
        &client,
        Method::DELETE,
        &format!("{}/predictions/{}", test_app.address, prediction_id),
        &alice.token,
        None,
    ).await;
    assert_eq!(200, alice_deletes.status().as_u16());
}

#[tokio::test]
async fn predictions_require_authentication() {
    let test_app = spawn_app().await;
    let response = Client::new()
        .post(&format!("{}/predictions", test_app.address))
        .json(&json!({ "fixture_id": 1, "predicted_home": 1, "predicted_away": 0 }))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(401, response.status().as_u16());
}
