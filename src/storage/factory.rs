use std::sync::Arc;
use crate::core::domain::Configuration;
use crate::storage::client::StorageClient;
use crate::storage::memory::client::MemoryStorageClient;
use crate::storage::s3::client::{build_s3_client, S3StorageClient};
use crate::storage::StorageVia;

pub(crate) async fn create_storage_client(config: &Configuration) -> Arc<dyn StorageClient> {
    match config.storage {
        StorageVia::S3 => {
            let client = build_s3_client(config.region.as_str()).await;
            Arc::new(S3StorageClient::new(client, config.bucket.as_str(), config.storage_base_url().as_str()))
        }
        StorageVia::Memory => {
            Arc::new(MemoryStorageClient::new(config.storage_base_url().as_str()))
        }
    }
}
