use actix_web::{get, web, HttpResponse, Result};
use sqlx::PgPool;

use crate::handlers::leaderboard_handler;

/// Season standings
#[get("/leaderboard")]
async fn get_leaderboard(pool: web::Data<PgPool>) -> Result<HttpResponse> {
    leaderboard_handler::get_leaderboard(pool).await
}

/// Standings for a single gameweek
#[get("/leaderboard/gameweek/{gameweek}")]
async fn get_gameweek_leaderboard(
    path: web::Path<i32>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    leaderboard_handler::get_gameweek_leaderboard(path, pool).await
}
