use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SiteSetting {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct SettingUpdate {
    pub value: String,
}
