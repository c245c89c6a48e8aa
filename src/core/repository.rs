use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::library::LibraryResult;

#[async_trait]
pub trait Repository<Entity>: Sync + Send {
    // create an entity, assigning its identifier
    async fn create(&self, entity: &Entity) -> LibraryResult<Entity>;

    // get an entity
    async fn get(&self, id: i64) -> LibraryResult<Entity>;
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Copy)]
pub enum RepositoryStore {
    #[serde(rename = "dynamodb")]
    DynamoDB,
    #[serde(rename = "local_dynamodb")]
    LocalDynamoDB,
    #[serde(rename = "memory")]
    Memory,
}
