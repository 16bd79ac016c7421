use actix_web::{web, HttpResponse, Result};
use sqlx::PgPool;

use crate::models::common::RequiredGameweekQuery;
use crate::models::common::ApiResponse;
use crate::services::admin_service::AdminService;

// GET /admin/overview
pub async fn get_overview(pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let overview = AdminService::new(pool.get_ref().clone()).overview().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Season overview", overview)))
}

// GET /admin/predictions?gameweek=
#[tracing::instrument(name = "Admin gameweek predictions", skip(pool), fields(gameweek = query.gameweek))]
pub async fn get_gameweek_predictions(
    query: web::Query<RequiredGameweekQuery>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let breakdown = AdminService::new(pool.get_ref().clone())
        .gameweek_predictions(query.gameweek)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(format!("GW{} predictions", query.gameweek), breakdown)))
}

// GET /admin/missing-predictions?gameweek=
#[tracing::instrument(name = "Admin missing predictions", skip(pool), fields(gameweek = query.gameweek))]
pub async fn get_missing_predictions(
    query: web::Query<RequiredGameweekQuery>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let summary = AdminService::new(pool.get_ref().clone())
        .missing_predictions(query.gameweek)
        .await?;
    let outstanding = summary.iter().filter(|row| !row.complete).count();
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        format!("{} players with missing predictions", outstanding),
        summary,
    )))
}
