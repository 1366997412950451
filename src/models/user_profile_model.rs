use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct UserProfile {
    pub id: Uuid,

    pub email: String,

    pub full_name: String,

    pub created_at: DateTime<Utc>,
}

/// Profile as embedded in a raw member row; nothing is trusted yet.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct UserProfileRow {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub full_name: Option<String>,

    #[serde(default)]
    pub created_at: Option<String>,
}
