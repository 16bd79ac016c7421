use crate::middleware::auth::Claims;
use crate::models::user::Actor;
use crate::services::error::ServiceError;

pub mod admin;
pub mod auth_handler;
pub mod backend_health_handler;
pub mod fixture_handler;
pub mod leaderboard_handler;
pub mod prediction_handler;
pub mod registration_handler;
pub mod result_handler;
pub mod settings_handler;

/// The middleware already rejects tokens with a malformed subject; this only
/// guards handlers mounted without it.
pub(crate) fn require_actor(claims: &Claims) -> Result<Actor, actix_web::Error> {
    claims.actor()
        .ok_or_else(|| ServiceError::Unauthorized("Invalid token subject".into()).into())
}
