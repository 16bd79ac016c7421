use std::net::TcpListener;
use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;

use gameweek_predictor::run;
use gameweek_predictor::db::settings;
use gameweek_predictor::config::settings::{get_config, get_jwt_settings};
use gameweek_predictor::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Panic if we can't read the config
    let config = get_config().expect("Failed to read the config.");

    let subscriber = get_subscriber(
        "gameweek-predictor".into(),
        config.application.log_level.clone(),
        std::io::stdout
    );
    init_subscriber(subscriber);

    let jwt_settings = get_jwt_settings(&config);

    // Only try to establish connection when actually used
    let connection_pool = PgPoolOptions::new()
        .max_connections(16)
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(1800))
        .connect_lazy(
            config.database.connection_string().expose_secret()
        )
        .expect("Failed to create Postgres connection pool");

    sqlx::migrate!("./migrations")
        .run(&connection_pool)
        .await
        .expect("Failed to run database migrations");

    settings::seed_setting(&connection_pool, "season_name", &config.competition.season_name)
        .await
        .expect("Failed to seed site settings");

    let address = format!("{}:{}", config.application.host, config.application.port);
    let listener = TcpListener::bind(&address)?;
    tracing::info!(
        "Serving {} predictions on {}",
        config.competition.season_name,
        address
    );

    run(
        listener,
        connection_pool,
        jwt_settings,
        config.competition
    )?.await
}
