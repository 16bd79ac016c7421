// src/routes/auth.rs
use actix_web::{get, post, web, HttpResponse, Result};
use sqlx::PgPool;

use crate::handlers::auth_handler::{current_user, login_user};
use crate::middleware::auth::Claims;
use crate::models::auth::LoginRequest;
use crate::config::jwt::JwtSettings;

#[post("/auth/login")]
async fn login(
    login_form: web::Json<LoginRequest>,
    pool: web::Data<PgPool>,
    jwt_settings: web::Data<JwtSettings>
) -> Result<HttpResponse> {
    login_user(login_form, pool, jwt_settings).await
}

#[get("/me")]
async fn me(
    claims: web::ReqData<Claims>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    current_user(claims, pool).await
}
