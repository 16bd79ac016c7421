use actix_web::{web, HttpResponse, Result};
use sqlx::PgPool;

use crate::models::common::ApiResponse;
use crate::models::fixture::{FixtureImport, FixtureQuery};
use crate::services::fixture_service::FixtureService;

/// Public fixture list
pub async fn list_fixtures(
    query: web::Query<FixtureQuery>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let fixtures = FixtureService::new(pool.get_ref().clone()).list(&query).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(format!("{} fixtures", fixtures.len()), fixtures)))
}

/// POST /admin/fixtures - bulk import or re-import
pub async fn import_fixtures(
    body: web::Json<Vec<FixtureImport>>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let saved = FixtureService::new(pool.get_ref().clone()).import(&body).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(format!("Imported {} fixtures", saved.len()), saved)))
}

/// DELETE /admin/fixtures/{id}
pub async fn delete_fixture(
    path: web::Path<i32>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let fixture_id = path.into_inner();
    FixtureService::new(pool.get_ref().clone()).delete(fixture_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_message("Fixture deleted")))
}
