use actix_web::{http, web, App, HttpResponse, HttpServer};
use actix_web::dev::Server;
use tracing_actix_web::TracingLogger;
use serde_json::json;
use sqlx::PgPool;
use std::net::TcpListener;
use actix_cors::Cors;

pub mod auth;
pub mod config;
mod routes;
mod handlers;
pub mod models;
pub mod utils;
mod middleware;
pub mod db;
pub mod scoring;
pub mod services;
pub mod telemetry;
use crate::routes::init_routes;
use crate::config::jwt::JwtSettings;
use crate::config::settings::CompetitionSettings;

pub fn run(
    listener: TcpListener,
    db_pool: PgPool,
    jwt_settings: JwtSettings,
    competition: CompetitionSettings,
) -> Result<Server, std::io::Error> {
    // Wrap using web::Data, which boils down to an Arc smart pointer
    let db_pool_data = web::Data::new(db_pool);
    let jwt_settings = web::Data::new(jwt_settings);
    let competition = web::Data::new(competition);

    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin("http://localhost:5173")
            .allowed_origin("http://localhost:3000")
            .allowed_origin("http://127.0.0.1:5173")
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "PATCH"])
            .allowed_headers(vec![
                http::header::AUTHORIZATION,
                http::header::ACCEPT,
                http::header::CONTENT_TYPE,
            ])
            .supports_credentials()
            .max_age(3600);

        // Malformed bodies (e.g. a fractional score) get the same envelope as validation errors
        let json_config = web::JsonConfig::default().error_handler(|err, _req| {
            let response = HttpResponse::BadRequest().json(json!({
                "success": false,
                "message": err.to_string()
            }));
            actix_web::error::InternalError::from_response(err, response).into()
        });

        App::new()
            .wrap(TracingLogger::default())
            .wrap(cors)
            .app_data(json_config)
            // Get a pointer copy and attach it to the application state
            .app_data(db_pool_data.clone())
            .app_data(jwt_settings.clone())
            .app_data(competition.clone())
            .configure(init_routes)
    })
    .listen(listener)?
    .run();

    Ok(server)
}
