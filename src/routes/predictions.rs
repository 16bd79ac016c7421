// src/routes/predictions.rs
use actix_web::{delete, get, post, web, HttpResponse, Result};
use sqlx::PgPool;
use uuid::Uuid;

use crate::config::settings::CompetitionSettings;
use crate::handlers::prediction_handler;
use crate::middleware::auth::Claims;
use crate::models::prediction::{GameweekPredictionsRequest, PredictionQuery, PredictionRequest};

/// The caller's predictions (admins may ask for anyone's)
#[get("")]
async fn get_predictions(
    query: web::Query<PredictionQuery>,
    claims: web::ReqData<Claims>,
    pool: web::Data<PgPool>,
    competition: web::Data<CompetitionSettings>,
) -> Result<HttpResponse> {
    prediction_handler::list_predictions(query, claims, pool, competition).await
}

/// Create or update one prediction
#[post("")]
async fn save_prediction(
    body: web::Json<PredictionRequest>,
    claims: web::ReqData<Claims>,
    pool: web::Data<PgPool>,
    competition: web::Data<CompetitionSettings>,
) -> Result<HttpResponse> {
    prediction_handler::submit_prediction(body, claims, pool, competition).await
}

/// Submit a whole gameweek at once
#[post("/batch")]
async fn save_gameweek_predictions(
    body: web::Json<GameweekPredictionsRequest>,
    claims: web::ReqData<Claims>,
    pool: web::Data<PgPool>,
    competition: web::Data<CompetitionSettings>,
) -> Result<HttpResponse> {
    prediction_handler::submit_gameweek_predictions(body, claims, pool, competition).await
}

#[delete("/{prediction_id}")]
async fn remove_prediction(
    path: web::Path<Uuid>,
    claims: web::ReqData<Claims>,
    pool: web::Data<PgPool>,
    competition: web::Data<CompetitionSettings>,
) -> Result<HttpResponse> {
    prediction_handler::delete_prediction(path, claims, pool, competition).await
}
