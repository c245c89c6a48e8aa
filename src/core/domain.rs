use serde::{Deserialize, Serialize};
use crate::core::library::LibraryResult;
use crate::core::repository::RepositoryStore;
use crate::storage::StorageVia;

const ENV_PREFIX: &str = "BOOKSTORE";

// Identifiable defines common traits that can be shared by persistent objects
pub trait Identifiable: Sync + Send {
    fn id(&self) -> i64;
    fn version(&self) -> i64;
    // natural key that must stay unique across all records of the same kind
    fn unique_key(&self) -> String;
    // copy of the entity stamped with the id and version assigned by a store
    fn with_identity(&self, id: i64, version: i64) -> Self where Self: Sized;
}

// Runtime selects how the HTTP application is hosted
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum Runtime {
    Local,
    Lambda,
}

// Configuration abstracts config options for the bookstore service
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct Configuration {
    #[serde(default = "Configuration::default_environment")]
    pub environment: String,
    #[serde(default = "Configuration::default_runtime")]
    pub runtime: Runtime,
    #[serde(default = "Configuration::default_http_host")]
    pub http_host: String,
    #[serde(default = "Configuration::default_http_port")]
    pub http_port: u16,
    #[serde(default = "Configuration::default_store")]
    pub store: RepositoryStore,
    #[serde(default = "Configuration::default_dynamodb_endpoint")]
    pub dynamodb_endpoint: String,
    #[serde(default = "Configuration::default_storage")]
    pub storage: StorageVia,
    #[serde(default = "Configuration::default_bucket")]
    pub bucket: String,
    #[serde(default = "Configuration::default_region")]
    pub region: String,
    #[serde(default)]
    pub public_base_url: Option<String>,
    #[serde(default = "Configuration::default_max_upload_bytes")]
    pub max_upload_bytes: usize,
    #[serde(default = "Configuration::default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub json_logs: bool,
}

impl Configuration {
    // new builds a self-contained configuration backed by in-memory store and storage
    pub fn new(environment: &str) -> Self {
        Configuration {
            environment: environment.to_string(),
            runtime: Self::default_runtime(),
            http_host: Self::default_http_host(),
            http_port: Self::default_http_port(),
            store: Self::default_store(),
            dynamodb_endpoint: Self::default_dynamodb_endpoint(),
            storage: Self::default_storage(),
            bucket: Self::default_bucket(),
            region: Self::default_region(),
            public_base_url: None,
            max_upload_bytes: Self::default_max_upload_bytes(),
            log_level: Self::default_log_level(),
            json_logs: false,
        }
    }

    // load reads BOOKSTORE_* variables, after an optional .env file
    pub fn load() -> LibraryResult<Self> {
        let _ = dotenvy::dotenv();
        let settings = config::Config::builder()
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    // storage_base_url is the public prefix of every uploaded object
    pub fn storage_base_url(&self) -> String {
        match &self.public_base_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("https://{}.s3.{}.amazonaws.com", self.bucket, self.region),
        }
    }

    fn default_environment() -> String {
        "dev".to_string()
    }

    fn default_runtime() -> Runtime {
        Runtime::Local
    }

    fn default_http_host() -> String {
        "0.0.0.0".to_string()
    }

    fn default_http_port() -> u16 {
        8080
    }

    fn default_store() -> RepositoryStore {
        RepositoryStore::Memory
    }

    fn default_dynamodb_endpoint() -> String {
        "http://localhost:8000".to_string()
    }

    fn default_storage() -> StorageVia {
        StorageVia::Memory
    }

    fn default_bucket() -> String {
        "bookstore-images".to_string()
    }

    fn default_region() -> String {
        "ap-northeast-2".to_string()
    }

    fn default_max_upload_bytes() -> usize {
        20 * 1024 * 1024
    }

    fn default_log_level() -> String {
        "info".to_string()
    }
}

#[cfg(test)]
mod tests {
    use crate::core::domain::{Configuration, Runtime};
    use crate::core::repository::RepositoryStore;
    use crate::storage::StorageVia;

    #[tokio::test]
    async fn test_should_build_config() {
        let config = Configuration::new("test");
        assert_eq!("test", config.environment.as_str());
        assert_eq!(Runtime::Local, config.runtime);
        assert_eq!(RepositoryStore::Memory, config.store);
        assert_eq!(StorageVia::Memory, config.storage);
        assert_eq!(8080, config.http_port);
    }

    #[tokio::test]
    async fn test_should_build_storage_base_url() {
        let mut config = Configuration::new("test");
        assert_eq!("https://bookstore-images.s3.ap-northeast-2.amazonaws.com", config.storage_base_url());
        config.public_base_url = Some("https://cdn.example.com/".to_string());
        assert_eq!("https://cdn.example.com", config.storage_base_url());
    }

    #[tokio::test]
    async fn test_should_deserialize_partial_config() {
        let config: Configuration = serde_json::from_value(serde_json::json!({
            "runtime": "lambda",
            "store": "dynamodb",
            "storage": "s3",
            "bucket": "books",
        })).expect("should parse config");
        assert_eq!(Runtime::Lambda, config.runtime);
        assert_eq!(RepositoryStore::DynamoDB, config.store);
        assert_eq!(StorageVia::S3, config.storage);
        assert_eq!("books", config.bucket.as_str());
        assert_eq!("dev", config.environment.as_str());
    }
}
