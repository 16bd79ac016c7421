use actix_web::{web, HttpResponse, Result};
use sqlx::PgPool;

use crate::db::settings;
use crate::models::common::ApiResponse;
use crate::models::settings::SettingUpdate;
use crate::services::error::ServiceError;
use crate::utils::validation::validate_setting_key;

pub async fn get_settings(pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let values = settings::list_settings(&pool).await.map_err(ServiceError::from)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Site settings", values)))
}

/// PUT /admin/settings/{key}
#[tracing::instrument(name = "Update site setting", skip(body, pool))]
pub async fn update_setting(
    path: web::Path<String>,
    body: web::Json<SettingUpdate>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let key = path.into_inner();
    let key = key.trim();
    validate_setting_key(key).map_err(ServiceError::from)?;
    let setting = settings::upsert_setting(&pool, key, &body.value)
        .await
        .map_err(ServiceError::from)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Setting updated", setting)))
}
