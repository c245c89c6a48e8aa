use std::sync::Arc;
use async_trait::async_trait;
use crate::core::command::{Command, CommandError};
use crate::users::domain::UserService;
use crate::users::dto::{SignUpRequest, SignUpResponse};

pub(crate) struct SignUpCommand {
    user_service: Arc<dyn UserService>,
}

impl SignUpCommand {
    pub(crate) fn new(user_service: Arc<dyn UserService>) -> Self {
        Self {
            user_service,
        }
    }
}

#[async_trait]
impl Command<SignUpRequest, SignUpResponse> for SignUpCommand {
    async fn execute(&self, req: SignUpRequest) -> Result<SignUpResponse, CommandError> {
        self.user_service.sign_up(&req).await.map_err(CommandError::from)
    }
}
