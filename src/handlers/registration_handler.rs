use actix_web::{web, HttpResponse, Result};
use secrecy::ExposeSecret;
use sqlx::PgPool;

use crate::db::helpers::{ensure_not_exists, is_unique_violation};
use crate::db::users;
use crate::models::common::ApiResponse;
use crate::models::user::{RegistrationRequest, UserRole};
use crate::services::error::ServiceError;
use crate::utils::password::hash_password;
use crate::utils::validation::{validate_email, validate_password, validate_username};

#[tracing::instrument(
    name = "Adding a new user",
    // Don't show arguments
    skip(user_form, pool),
    fields(
        username = %user_form.username,
        email = %user_form.email
    )
)]
pub async fn register_user(
    user_form: web::Json<RegistrationRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let username = user_form.username.trim();
    let email = user_form.email.trim();
    validate_username(username).map_err(ServiceError::from)?;
    validate_email(email).map_err(ServiceError::from)?;
    validate_password(user_form.password.expose_secret()).map_err(ServiceError::from)?;

    ensure_not_exists(users::find_by_username(&pool, username).await, "Username already taken")?;
    ensure_not_exists(users::find_by_email(&pool, email).await, "Email already registered")?;

    let password_hash = hash_password(user_form.password.expose_secret()).map_err(|e| {
        tracing::error!("Failed to hash password: {:?}", e);
        actix_web::error::ErrorInternalServerError("Failed to create user")
    })?;

    // A concurrent registration can still win the race past the checks above
    let record = users::insert_user(&pool, username, email, &password_hash, UserRole::User)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                ServiceError::Conflict("Username or email already registered".into())
            } else {
                tracing::error!("Failed to execute user insert query: {:?}", e);
                ServiceError::Database(e)
            }
        })?;

    tracing::info!("Registered user {}", record.id);
    Ok(HttpResponse::Created().json(ApiResponse::success("User registered", record.to_public())))
}
