use std::sync::Arc;
use aws_sdk_dynamodb::types::ScalarAttributeType;
use crate::core::domain::Configuration;
use crate::core::repository::RepositoryStore;
use crate::users::domain::service::UserServiceImpl;
use crate::users::domain::UserService;
use crate::users::repository::ddb_user_repository::DDBUserRepository;
use crate::users::repository::memory_user_repository::MemoryUserRepository;
use crate::users::repository::UserRepository;
use crate::utils::ddb::{build_db_client, create_shared_tables, create_table};

pub(crate) async fn create_user_repository(config: &Configuration) -> Box<dyn UserRepository> {
    match config.store {
        RepositoryStore::DynamoDB => {
            let client = build_db_client(config).await;
            Box::new(DDBUserRepository::new(client, "users"))
        }
        RepositoryStore::LocalDynamoDB => {
            let client = build_db_client(config).await;
            let _ = create_table(&client, "users", "user_id", ScalarAttributeType::N).await;
            create_shared_tables(&client).await;
            Box::new(DDBUserRepository::new(client, "users"))
        }
        RepositoryStore::Memory => {
            Box::new(MemoryUserRepository::new())
        }
    }
}

pub(crate) async fn create_user_service(config: &Configuration) -> Arc<dyn UserService> {
    let user_repo = create_user_repository(config).await;
    Arc::new(UserServiceImpl::new(config, user_repo))
}
