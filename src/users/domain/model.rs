use std::fmt;
use std::fmt::{Debug, Formatter};
use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::core::domain::Identifiable;
use crate::core::library::Role;
use crate::users::domain::user_unique_key;
use crate::utils::date::serializer;

// UserEntity is the stored account; password holds an Argon2 hash, never the plaintext
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct UserEntity {
    pub user_id: i64,
    pub version: i64,
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub role: Role,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl UserEntity {
    pub fn new(username: &str, password_hash: &str) -> Self {
        Self {
            user_id: 0,
            version: 0,
            username: username.to_string(),
            password: password_hash.to_string(),
            refresh_token: None,
            role: Role::default(),
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }
}

impl Debug for UserEntity {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserEntity")
            .field("user_id", &self.user_id)
            .field("version", &self.version)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
            .field("role", &self.role)
            .finish()
    }
}

impl Identifiable for UserEntity {
    fn id(&self) -> i64 {
        self.user_id
    }

    fn version(&self) -> i64 {
        self.version
    }

    fn unique_key(&self) -> String {
        user_unique_key(self.username.as_str())
    }

    fn with_identity(&self, id: i64, version: i64) -> Self {
        let mut user = self.clone();
        user.user_id = id;
        user.version = version;
        user.updated_at = Utc::now().naive_utc();
        user
    }
}
