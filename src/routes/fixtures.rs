use actix_web::{get, web, HttpResponse, Result};
use sqlx::PgPool;

use crate::handlers::fixture_handler;
use crate::models::fixture::FixtureQuery;

/// Fixtures, optionally filtered by gameweek and team
#[get("/fixtures")]
async fn get_fixtures(
    query: web::Query<FixtureQuery>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    fixture_handler::list_fixtures(query, pool).await
}
