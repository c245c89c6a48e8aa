pub mod model;
pub mod service;

use async_trait::async_trait;
use crate::core::library::LibraryResult;
use crate::users::dto::{SignUpRequest, SignUpResponse};

#[async_trait]
pub trait UserService: Sync + Send {
    async fn sign_up(&self, req: &SignUpRequest) -> LibraryResult<SignUpResponse>;
}

// user_unique_key reserves a username across all users
pub(crate) fn user_unique_key(username: &str) -> String {
    format!("user#{}", username)
}
