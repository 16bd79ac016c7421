// src/handlers/auth_handler.rs
use actix_web::{web, HttpResponse, Result};
use secrecy::ExposeSecret;
use sqlx::PgPool;
use serde_json::json;

use crate::auth::jwt::issue_token;
use crate::config::jwt::JwtSettings;
use crate::db::helpers::require_record;
use crate::db::users;
use crate::middleware::auth::Claims;
use crate::models::auth::{LoginRequest, LoginResponse};
use crate::models::common::ApiResponse;
use crate::utils::password::verify_password;
use super::require_actor;

#[tracing::instrument(
    name = "Login user attempt",
    skip(login_form, pool, jwt_settings),
    fields(
        email = %login_form.email
    )
)]
pub async fn login_user(
    login_form: web::Json<LoginRequest>,
    pool: web::Data<PgPool>,
    jwt_settings: web::Data<JwtSettings>,
) -> Result<HttpResponse> {
    let record = match users::find_by_email(&pool, login_form.email.trim()).await {
        Ok(Some(record)) => record,
        Ok(None) => {
            tracing::info!("User not found or invalid credentials");
            return Ok(invalid_credentials());
        }
        Err(e) => {
            tracing::error!("Database error occurred: {:?}", e);
            return Ok(HttpResponse::InternalServerError().finish());
        }
    };

    if !verify_password(login_form.password.expose_secret(), &record.password_hash) {
        tracing::info!("Invalid password");
        return Ok(invalid_credentials());
    }

    let user = record.to_public();
    let token = match issue_token(&user, &jwt_settings) {
        Ok(token) => token,
        Err(e) => {
            tracing::error!("Error generating JWT token: {:?}", e);
            return Ok(HttpResponse::InternalServerError().finish());
        }
    };

    Ok(HttpResponse::Ok().json(LoginResponse::bearer(token, user)))
}

#[tracing::instrument(name = "Current user", skip(claims, pool), fields(username = %claims.username))]
pub async fn current_user(
    claims: web::ReqData<Claims>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let actor = require_actor(&claims)?;
    let record = require_record(users::find_by_id(&pool, actor.user_id).await, "User not found")?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Current user", record.to_public())))
}

fn invalid_credentials() -> HttpResponse {
    HttpResponse::Unauthorized().json(json!({
        "success": false,
        "message": "Invalid email or password"
    }))
}
