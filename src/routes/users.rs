use actix_web::{get, web, HttpResponse, Result};
use sqlx::PgPool;

use crate::handlers::leaderboard_handler;
use crate::middleware::auth::Claims;

#[get("/me/stats")]
async fn get_my_stats(
    claims: web::ReqData<Claims>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    leaderboard_handler::get_my_stats(claims, pool).await
}
