use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::ExposeSecret;

use crate::config::jwt::JwtSettings;
use crate::middleware::auth::Claims;
use crate::models::user::User;

/// Sign a session token for `user`, valid for the configured number of hours.
pub fn issue_token(user: &User, jwt_settings: &JwtSettings) -> Result<String, jsonwebtoken::errors::Error> {
    let expires_at = Utc::now() + Duration::hours(jwt_settings.expiration_hours);

    let claims = Claims {
        sub: user.id.to_string(),
        username: user.username.clone(),
        role: user.role,
        exp: expires_at.timestamp() as usize,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(jwt_settings.secret.expose_secret().as_bytes()),
    )
}

pub fn decode_token(token: &str, jwt_settings: &JwtSettings) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_settings.secret.expose_secret().as_bytes()),
        &Validation::new(Algorithm::HS256),
    )?;
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;
    use crate::models::user::UserRole;

    #[test]
    fn test_token_round_trip_keeps_role() {
        let settings = JwtSettings::new("test-secret".to_string(), 1);
        let user = User {
            id: Uuid::new_v4(),
            username: "keeper".to_string(),
            email: "keeper@example.com".to_string(),
            role: UserRole::Admin,
        };
        let token = issue_token(&user, &settings).expect("token issued");
        let claims = decode_token(&token, &settings).expect("token decodes");
        assert_eq!(claims.user_id(), Some(user.id));
        assert_eq!(claims.role, UserRole::Admin);
    }

    #[test]
    fn test_token_with_other_secret_is_rejected() {
        let user = User {
            id: Uuid::new_v4(),
            username: "keeper".to_string(),
            email: "keeper@example.com".to_string(),
            role: UserRole::User,
        };
        let token = issue_token(&user, &JwtSettings::new("one".to_string(), 1)).expect("token issued");
        assert!(decode_token(&token, &JwtSettings::new("two".to_string(), 1)).is_err());
    }
}
