use chrono::{DateTime, Duration, Utc};
use secrecy::ExposeSecret;
use serde_json::{json, Value};
use sqlx::{PgPool, PgConnection, Connection, Executor};
use std::net::TcpListener;
use uuid::Uuid;
use once_cell::sync::Lazy;
use reqwest::{Client, Method, Response};

use gameweek_predictor::run;
use gameweek_predictor::db::settings;
use gameweek_predictor::config::settings::{get_config, get_jwt_settings, CompetitionSettings, DatabaseSettings};
use gameweek_predictor::telemetry::{get_subscriber, init_subscriber};

// Ensure that the `tracing` stack is only initialised once using `once_cell`
static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(
            subscriber_name,
            default_filter_level,
            std::io::stdout
        );
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(
            subscriber_name,
            default_filter_level,
            std::io::sink
        );
        init_subscriber(subscriber);
    }
});

pub struct TestApp {
    pub address: String,
    pub db_pool: PgPool,
}

pub struct TestUser {
    pub id: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub token: String,
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(CompetitionSettings::default()).await
}

/// Same as `spawn_app` but with custom competition rules (lock policy, goal cap).
pub async fn spawn_app_with(competition: CompetitionSettings) -> TestApp {
    // The first time `initialize` is invoked the code in `TRACING` is executed.
    // All other invocations will instead skip execution.
    Lazy::force(&TRACING);

    let listener = TcpListener::bind("127.0.0.1:0")
        .expect("Failed to bind random port");
    // Get port assigned by the OS
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);
    let mut configuration = get_config().expect("Failed to read configuration.");
    // Every test gets its own database
    configuration.database.db_url = None;
    configuration.database.db_name = Uuid::new_v4().to_string();
    let connection_pool = configure_db(&configuration.database)
        .await;
    settings::seed_setting(&connection_pool, "season_name", &competition.season_name)
        .await
        .expect("Failed to seed site settings");
    let jwt_settings = get_jwt_settings(&configuration);
    let server = run(
        listener,
        connection_pool.clone(),
        jwt_settings,
        competition,
    )
        .expect("Failed to bind address");
    // Launch the server as a background task
    // tokio::spawn returns a handle to the spawned future,
    // but we have no use for it here, hence the non-binding let
    let _ = tokio::spawn(server);
    TestApp {
        address,
        db_pool: connection_pool
    }
}

pub async fn configure_db(config: &DatabaseSettings) -> PgPool {
    // Create database
    let mut connection = PgConnection::connect(
            &config.connection_string_without_db()
        )
        .await
        .expect("Failed to connect to Postgres");
    connection
        .execute(format!(r#"CREATE DATABASE "{}";"#, config.db_name).as_str())
        .await
        .expect("Failed to create database.");

    // Migrate database
    let connection_pool = PgPool::connect(config.connection_string().expose_secret())
        .await
        .expect("Failed to connect to Postgres.");
    sqlx::migrate!("./migrations")
        .run(&connection_pool)
        .await
        .expect("Failed to migrate the database");

    connection_pool
}

pub async fn register_user(app_address: &str, username: &str, email: &str, password: &str) -> Response {
    Client::new()
        .post(&format!("{}/auth/register", app_address))
        .json(&json!({
            "username": username,
            "email": email,
            "password": password
        }))
        .send()
        .await
        .expect("Failed to register user.")
}

pub async fn login(app_address: &str, email: &str, password: &str) -> Response {
    Client::new()
        .post(&format!("{}/auth/login", app_address))
        .json(&json!({
            "email": email,
            "password": password
        }))
        .send()
        .await
        .expect("Failed to execute login request.")
}

pub async fn create_test_user_and_login(app_address: &str) -> TestUser {
    let suffix = &Uuid::new_v4().simple().to_string()[..12];
    create_named_user_and_login(app_address, &format!("player{}", suffix)).await
}

pub async fn create_named_user_and_login(app_address: &str, username: &str) -> TestUser {
    let password = "password123";
    let email = format!("{}@example.com", username);

    let register_response = register_user(app_address, username, &email, password).await;
    assert_eq!(201, register_response.status().as_u16());

    let login_response = login(app_address, &email, password).await;
    assert_eq!(200, login_response.status().as_u16());
    let body: Value = login_response.json().await.expect("Failed to parse login response");
    let token = body["access_token"].as_str().expect("No token in response");
    let id = body["user"]["id"].as_str().expect("No user id in response");

    TestUser {
        id: id.to_string(),
        username: username.to_string(),
        email,
        password: password.to_string(),
        token: token.to_string(),
    }
}

pub async fn make_authenticated_request(
    client: &Client,
    method: Method,
    url: &str,
    token: &str,
    body: Option<Value>,
) -> Response {
    let mut request = client
        .request(method, url)
        .header("Authorization", format!("Bearer {}", token));

    if let Some(json_body) = body {
        request = request.json(&json_body);
    }

    request.send().await.expect("Failed to execute request")
}

pub fn kickoff_in(hours: i64) -> DateTime<Utc> {
    Utc::now() + Duration::hours(hours)
}
