use actix_web::{get, web, HttpResponse, Result};
use sqlx::PgPool;

use crate::handlers::settings_handler;

#[get("/settings")]
async fn get_settings(pool: web::Data<PgPool>) -> Result<HttpResponse> {
    settings_handler::get_settings(pool).await
}
