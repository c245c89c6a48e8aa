use async_trait::async_trait;
use crate::core::library::{ErrorCode, LibraryResult};
use crate::core::repository::Repository;
use crate::users::domain::model::UserEntity;
use crate::users::domain::user_unique_key;
use crate::users::repository::UserRepository;
use crate::utils::memory::MemoryTable;

pub(crate) struct MemoryUserRepository {
    table: MemoryTable<UserEntity>,
}

impl MemoryUserRepository {
    pub(crate) fn new() -> Self {
        Self {
            table: MemoryTable::new("users", ErrorCode::UserNotFound, ErrorCode::UserAlreadyExists),
        }
    }
}

#[async_trait]
impl Repository<UserEntity> for MemoryUserRepository {
    async fn create(&self, entity: &UserEntity) -> LibraryResult<UserEntity> {
        self.table.insert(entity)
    }

    async fn get(&self, id: i64) -> LibraryResult<UserEntity> {
        self.table.get(id)
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> LibraryResult<Option<UserEntity>> {
        self.table.find_by_unique_key(user_unique_key(username).as_str())
    }
}

#[cfg(test)]
mod tests {
    use crate::core::library::{ErrorCode, LibraryError};
    use crate::core::repository::Repository;
    use crate::users::domain::model::UserEntity;
    use crate::users::repository::memory_user_repository::MemoryUserRepository;
    use crate::users::repository::UserRepository;

    #[tokio::test]
    async fn test_should_create_get_users() {
        let users_repo = MemoryUserRepository::new();
        let saved = users_repo.create(&UserEntity::new("alice", "hash")).await.expect("should create user");
        assert_eq!(1, saved.user_id);
        assert_eq!(saved, users_repo.get(saved.user_id).await.expect("should return user"));
        assert_eq!(Some(saved), users_repo.find_by_username("alice").await.expect("should query"));
        let missing = users_repo.get(99).await;
        assert!(matches!(missing, Err(LibraryError::NotFound { code: ErrorCode::UserNotFound, .. })));
    }

    #[tokio::test]
    async fn test_should_reject_duplicate_usernames() {
        let users_repo = MemoryUserRepository::new();
        users_repo.create(&UserEntity::new("alice", "hash")).await.expect("should create user");
        let err = users_repo.create(&UserEntity::new("alice", "other")).await.expect_err("should reject duplicate");
        assert!(matches!(err, LibraryError::DuplicateKey { code: ErrorCode::UserAlreadyExists, .. }));
    }
}
