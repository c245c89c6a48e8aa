pub mod ddb_user_repository;
pub mod memory_user_repository;

use async_trait::async_trait;
use crate::core::library::LibraryResult;
use crate::core::repository::Repository;
use crate::users::domain::model::UserEntity;

#[async_trait]
pub(crate) trait UserRepository: Repository<UserEntity> {
    async fn find_by_username(&self, username: &str) -> LibraryResult<Option<UserEntity>>;
}
