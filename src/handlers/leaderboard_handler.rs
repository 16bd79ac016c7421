use actix_web::{web, HttpResponse, Result};
use sqlx::PgPool;

use crate::middleware::auth::Claims;
use crate::models::common::ApiResponse;
use crate::services::leaderboard_service::LeaderboardService;
use super::require_actor;

#[tracing::instrument(name = "Season leaderboard", skip(pool))]
pub async fn get_leaderboard(pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let rows = LeaderboardService::new(pool.get_ref().clone()).standings().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Season standings", rows)))
}

#[tracing::instrument(name = "Gameweek leaderboard", skip(pool))]
pub async fn get_gameweek_leaderboard(
    path: web::Path<i32>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let gameweek = path.into_inner();
    let rows = LeaderboardService::new(pool.get_ref().clone())
        .gameweek_standings(gameweek)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(format!("GW{} standings", gameweek), rows)))
}

/// Personal dashboard for the caller
#[tracing::instrument(name = "User stats", skip(claims, pool), fields(username = %claims.username))]
pub async fn get_my_stats(
    claims: web::ReqData<Claims>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let actor = require_actor(&claims)?;
    let stats = LeaderboardService::new(pool.get_ref().clone())
        .player_stats(actor.user_id)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("User stats", stats)))
}
