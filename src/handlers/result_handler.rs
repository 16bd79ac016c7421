use actix_web::{web, HttpResponse, Result};
use sqlx::PgPool;
use uuid::Uuid;

use crate::config::settings::CompetitionSettings;
use crate::models::common::ApiResponse;
use crate::models::fixture_result::{ResultQuery, ResultRequest};
use crate::services::result_service::ResultService;

pub async fn list_results(
    query: web::Query<ResultQuery>,
    pool: web::Data<PgPool>,
    competition: web::Data<CompetitionSettings>,
) -> Result<HttpResponse> {
    let results = ResultService::new(pool.get_ref().clone(), competition.get_ref().clone())
        .list(&query)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(format!("{} results", results.len()), results)))
}

/// POST /admin/results
pub async fn record_result(
    body: web::Json<ResultRequest>,
    pool: web::Data<PgPool>,
    competition: web::Data<CompetitionSettings>,
) -> Result<HttpResponse> {
    let result = ResultService::new(pool.get_ref().clone(), competition.get_ref().clone())
        .record(&body)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Result saved", result)))
}

/// DELETE /admin/results/{id}
pub async fn delete_result(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
    competition: web::Data<CompetitionSettings>,
) -> Result<HttpResponse> {
    ResultService::new(pool.get_ref().clone(), competition.get_ref().clone())
        .delete(path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_message("Result deleted")))
}
