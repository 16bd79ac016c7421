// src/middleware/auth.rs
use std::future::{ready, Ready};
use std::rc::Rc;
use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform}, error::ErrorInternalServerError, http::header, web, Error, HttpMessage
};
use futures_util::future::LocalBoxFuture;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use uuid::Uuid;

use crate::auth::jwt::decode_token;
use crate::config::jwt::JwtSettings;
use crate::db::users;
use crate::services::error::ServiceError;
use crate::models::user::{Actor, UserRole};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,  // Subject (user id)
    pub username: String,
    pub role: UserRole,
    pub exp: usize,   // Expiration time (as UTC timestamp)
}

impl Claims {
    /// Parse the user ID from the claims subject field.
    /// Returns None if the UUID is invalid.
    pub fn user_id(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.sub).ok()
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    pub fn actor(&self) -> Option<Actor> {
        self.user_id().map(|user_id| Actor { user_id, role: self.role })
    }
}

/// Shared JWT validation logic used by both auth and admin middlewares.
/// Extracts and validates a JWT token from the request, returning the decoded claims.
pub fn validate_jwt_from_request(req: &ServiceRequest) -> Result<Claims, Error> {
    let jwt_settings = req.app_data::<web::Data<JwtSettings>>()
        .ok_or_else(|| unauthorized("JWT settings not found"))?;

    let auth_header = req.headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(|| unauthorized("No authorization header"))?
        .to_str()
        .map_err(|_| unauthorized("Invalid authorization header"))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| unauthorized("Invalid authorization header format"))?;

    let claims = decode_token(token, jwt_settings).map_err(|e| {
        tracing::info!("Rejected token: {:?}", e);
        unauthorized("Invalid token")
    })?;

    if claims.user_id().is_none() {
        return Err(unauthorized("Invalid token subject"));
    }

    Ok(claims)
}

/// Re-reads the account behind a validated token. The stored row wins over the
/// token: a deleted account is rejected and a role change applies immediately.
pub async fn load_session(pool: &PgPool, claims: Claims) -> Result<Claims, Error> {
    let user_id = claims.user_id().ok_or_else(|| unauthorized("Invalid token subject"))?;
    let record = users::find_by_id(pool, user_id)
        .await
        .map_err(ServiceError::from)?
        .ok_or_else(|| {
            tracing::info!("Token for a deleted account: {}", user_id);
            unauthorized("Account no longer exists")
        })?;

    Ok(Claims {
        role: record.role(),
        username: record.username,
        ..claims
    })
}

pub(crate) fn session_pool(req: &ServiceRequest) -> Result<web::Data<PgPool>, Error> {
    req.app_data::<web::Data<PgPool>>()
        .cloned()
        .ok_or_else(|| ErrorInternalServerError("Database pool not configured"))
}

fn unauthorized(message: &str) -> Error {
    ServiceError::Unauthorized(message.to_string()).into()
}

// Create the middleware
pub struct AuthMiddleware;

// Middleware factory
impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService { service: Rc::new(service) }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();

        let (claims, pool) = match validate_jwt_from_request(&req).and_then(|claims| Ok((claims, session_pool(&req)?))) {
            Ok(found) => found,
            Err(e) => return Box::pin(async move { Err(e) }),
        };

        Box::pin(async move {
            let claims = load_session(&pool, claims).await?;
            // Handlers read the session through `web::ReqData<Claims>`
            req.extensions_mut().insert(claims);
            let res = service.call(req).await?;
            Ok(res)
        })
    }
}
