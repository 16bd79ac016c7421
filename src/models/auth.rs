// src/models/auth.rs
use serde::{Deserialize, Serialize};
use secrecy::SecretString;

use crate::models::user::User;

#[derive(Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    #[serde(serialize_with = "crate::models::user::serialize_secret_string",
            deserialize_with = "crate::models::user::deserialize_secret_string")]
    pub password: SecretString,
}

#[derive(Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub user: User,
}

impl LoginResponse {
    pub fn bearer(access_token: String, user: User) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
            user,
        }
    }
}
