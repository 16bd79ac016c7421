use actix_web::{get, web, HttpResponse, Result};
use sqlx::PgPool;

use crate::config::settings::CompetitionSettings;
use crate::handlers::result_handler;
use crate::models::fixture_result::ResultQuery;

#[get("/results")]
async fn get_results(
    query: web::Query<ResultQuery>,
    pool: web::Data<PgPool>,
    competition: web::Data<CompetitionSettings>,
) -> Result<HttpResponse> {
    result_handler::list_results(query, pool, competition).await
}
