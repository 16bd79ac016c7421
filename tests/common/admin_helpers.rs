use chrono::{DateTime, Utc};
use reqwest::{Client, Method};
use serde_json::{json, Value};

use crate::common::utils::{
    create_test_user_and_login,
    login,
    make_authenticated_request,
    TestApp,
    TestUser,
};

/// Register a user, promote them straight in the database, and log in again so
/// the token's role claim matches the stored one.
pub async fn create_admin_user_and_login(test_app: &TestApp) -> TestUser {
    let user = create_test_user_and_login(&test_app.address).await;

    sqlx::query("UPDATE users SET role = 'admin' WHERE username = $1")
        .bind(&user.username)
        .execute(&test_app.db_pool)
        .await
        .expect("Failed to promote user to admin");

    let login_response = login(&test_app.address, &user.email, &user.password).await;
    let body: Value = login_response.json().await.expect("Failed to parse login response");
    let token = body["access_token"].as_str().expect("No token in response");

    TestUser {
        token: token.to_string(),
        ..user
    }
}

/// Import a single fixture and return its id.
pub async fn create_fixture(
    test_app: &TestApp,
    admin_token: &str,
    gameweek: i32,
    home_team: &str,
    away_team: &str,
    kickoff_at: DateTime<Utc>,
) -> i64 {
    let client = Client::new();
    let response = make_authenticated_request(
        &client,
        Method::POST,
        &format!("{}/admin/fixtures", test_app.address),
        admin_token,
        Some(json!([{
            "gameweek": gameweek,
            "home_team": home_team,
            "away_team": away_team,
            "kickoff_at": kickoff_at,
        }])),
    ).await;
    assert_eq!(200, response.status().as_u16());

    let body: Value = response.json().await.expect("Failed to parse response");
    body["data"][0]["id"].as_i64().expect("Fixture id missing")
}

pub async fn post_result(test_app: &TestApp, admin_token: &str, fixture_id: i64, home: i32, away: i32) {
    let client = Client::new();
    let response = make_authenticated_request(
        &client,
        Method::POST,
        &format!("{}/admin/results", test_app.address),
        admin_token,
        Some(json!({
            "fixture_id": fixture_id,
            "actual_home": home,
            "actual_away": away,
        })),
    ).await;
    assert_eq!(200, response.status().as_u16());
}

pub async fn post_prediction(test_app: &TestApp, token: &str, fixture_id: i64, home: i32, away: i32) -> reqwest::Response {
    let client = Client::new();
    make_authenticated_request(
        &client,
        Method::POST,
        &format!("{}/predictions", test_app.address),
        token,
        Some(json!({
            "fixture_id": fixture_id,
            "predicted_home": home,
            "predicted_away": away,
        })),
    ).await
}
