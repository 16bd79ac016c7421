use actix_web::{web, HttpResponse, Result};
use sqlx::PgPool;
use uuid::Uuid;

use crate::config::settings::CompetitionSettings;
use crate::middleware::auth::Claims;
use crate::models::common::ApiResponse;
use crate::models::prediction::{AdminPredictionRequest, GameweekPredictionsRequest, PredictionQuery, PredictionRequest};
use crate::services::prediction_service::PredictionService;
use super::require_actor;

fn service(pool: &web::Data<PgPool>, competition: &web::Data<CompetitionSettings>) -> PredictionService {
    PredictionService::new(pool.get_ref().clone(), competition.get_ref().clone())
}

pub async fn list_predictions(
    query: web::Query<PredictionQuery>,
    claims: web::ReqData<Claims>,
    pool: web::Data<PgPool>,
    competition: web::Data<CompetitionSettings>,
) -> Result<HttpResponse> {
    let actor = require_actor(&claims)?;
    let predictions = service(&pool, &competition).list(&actor, &query).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(format!("{} predictions", predictions.len()), predictions)))
}

#[tracing::instrument(
    name = "Save prediction",
    skip(body, claims, pool, competition),
    fields(username = %claims.username, fixture_id = body.fixture_id)
)]
pub async fn submit_prediction(
    body: web::Json<PredictionRequest>,
    claims: web::ReqData<Claims>,
    pool: web::Data<PgPool>,
    competition: web::Data<CompetitionSettings>,
) -> Result<HttpResponse> {
    let actor = require_actor(&claims)?;
    let prediction = service(&pool, &competition).submit(&actor, &body).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Prediction saved", prediction)))
}

#[tracing::instrument(
    name = "Save gameweek predictions",
    skip(body, claims, pool, competition),
    fields(username = %claims.username, gameweek = body.gameweek)
)]
pub async fn submit_gameweek_predictions(
    body: web::Json<GameweekPredictionsRequest>,
    claims: web::ReqData<Claims>,
    pool: web::Data<PgPool>,
    competition: web::Data<CompetitionSettings>,
) -> Result<HttpResponse> {
    let actor = require_actor(&claims)?;
    let saved = service(&pool, &competition).submit_gameweek(&actor, &body).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(format!("Saved {} predictions", saved.len()), saved)))
}

pub async fn delete_prediction(
    path: web::Path<Uuid>,
    claims: web::ReqData<Claims>,
    pool: web::Data<PgPool>,
    competition: web::Data<CompetitionSettings>,
) -> Result<HttpResponse> {
    let actor = require_actor(&claims)?;
    service(&pool, &competition).delete(&actor, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_message("Prediction deleted")))
}

/// POST /admin/predictions - write on a player's behalf
#[tracing::instrument(
    name = "Admin prediction override",
    skip(body, claims, pool, competition),
    fields(admin = %claims.username, user_id = %body.user_id)
)]
pub async fn override_prediction(
    body: web::Json<AdminPredictionRequest>,
    claims: web::ReqData<Claims>,
    pool: web::Data<PgPool>,
    competition: web::Data<CompetitionSettings>,
) -> Result<HttpResponse> {
    let actor = require_actor(&claims)?;
    let (owner, request) = body.split();
    let prediction = service(&pool, &competition).override_for(&actor, owner, &request).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Prediction saved", prediction)))
}
