use serde::{Deserialize, Serialize};
use crate::core::library::{LibraryError, LibraryResult, Role};
use crate::users::domain::model::UserEntity;

#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct SignUpRequest {
    pub username: String,
    pub password: String,
}

impl SignUpRequest {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    pub fn validate(&self) -> LibraryResult<()> {
        if self.username.trim().is_empty() {
            return Err(LibraryError::validation("username must not be blank", Some("username".to_string())));
        }
        if self.password.trim().is_empty() {
            return Err(LibraryError::validation("password must not be blank", Some("password".to_string())));
        }
        Ok(())
    }
}

impl std::fmt::Debug for SignUpRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignUpRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

// SignUpResponse is the outward view of a new user; it has no secret fields to leak
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignUpResponse {
    pub user_id: i64,
    pub username: String,
    pub role: Role,
}

impl From<&UserEntity> for SignUpResponse {
    fn from(other: &UserEntity) -> Self {
        Self {
            user_id: other.user_id,
            username: other.username.to_string(),
            role: other.role,
        }
    }
}
