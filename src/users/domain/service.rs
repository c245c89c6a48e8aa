use async_trait::async_trait;
use crate::core::domain::Configuration;
use crate::core::library::{ErrorCode, LibraryError, LibraryResult};
use crate::users::domain::model::UserEntity;
use crate::users::domain::UserService;
use crate::users::dto::{SignUpRequest, SignUpResponse};
use crate::users::password::hash_password;
use crate::users::repository::UserRepository;

pub(crate) struct UserServiceImpl {
    user_repository: Box<dyn UserRepository>,
}

impl UserServiceImpl {
    pub(crate) fn new(_config: &Configuration, user_repository: Box<dyn UserRepository>) -> Self {
        Self {
            user_repository,
        }
    }
}

#[async_trait]
impl UserService for UserServiceImpl {
    async fn sign_up(&self, req: &SignUpRequest) -> LibraryResult<SignUpResponse> {
        req.validate()?;
        if self.user_repository.find_by_username(req.username.as_str()).await?.is_some() {
            return Err(LibraryError::duplicate_key(
                ErrorCode::UserAlreadyExists, format!("username {} is taken", req.username).as_str()));
        }
        let hash = hash_password(req.password.as_str())?;
        let user = self.user_repository.create(&UserEntity::new(req.username.as_str(), hash.as_str())).await?;
        tracing::info!(user_id = user.user_id, "signed up user");
        Ok(SignUpResponse::from(&user))
    }
}
