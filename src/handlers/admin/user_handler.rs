use actix_web::{web, HttpResponse, Result};
use sqlx::PgPool;
use uuid::Uuid;
use serde_json::json;

use crate::handlers::require_actor;
use crate::middleware::auth::Claims;
use crate::models::common::ApiResponse;
use crate::models::user::UpdateRoleRequest;
use crate::services::admin_service::AdminService;

// GET /admin/users - every account with prediction count and points
pub async fn get_users(pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let users = AdminService::new(pool.get_ref().clone()).users().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(format!("{} users", users.len()), users)))
}

// PATCH /admin/users/{id}/role
#[tracing::instrument(name = "Admin update role", skip(body, claims, pool), fields(admin = %claims.username))]
pub async fn update_user_role(
    path: web::Path<Uuid>,
    body: web::Json<UpdateRoleRequest>,
    claims: web::ReqData<Claims>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let actor = require_actor(&claims)?;
    let user_id = path.into_inner();
    let role = AdminService::new(pool.get_ref().clone())
        .change_role(&actor, user_id, &body.role)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "Role updated",
        json!({ "user_id": user_id, "role": role }),
    )))
}

// DELETE /admin/users/{id}
#[tracing::instrument(name = "Admin delete user", skip(claims, pool), fields(admin = %claims.username))]
pub async fn delete_user(
    path: web::Path<Uuid>,
    claims: web::ReqData<Claims>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let actor = require_actor(&claims)?;
    AdminService::new(pool.get_ref().clone())
        .delete_user(&actor, path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_message("User deleted")))
}
