use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::error::SdkError;
use aws_sdk_s3::operation::delete_object::DeleteObjectError;
use aws_sdk_s3::operation::put_object::PutObjectError;
use aws_sdk_s3::primitives::ByteStream;
use crate::core::library::{LibraryError, LibraryResult};
use crate::storage::client::{StorageClient, UploadFile};
use crate::storage::PathName;

#[derive(Debug)]
pub struct S3StorageClient {
    client: Client,
    bucket: String,
    base_url: String,
}

impl S3StorageClient {
    pub(crate) fn new(client: Client, bucket: &str, base_url: &str) -> Self {
        Self {
            client,
            bucket: bucket.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn key_of<'a>(&self, url: &'a str) -> LibraryResult<&'a str> {
        url.strip_prefix(self.base_url.as_str())
            .and_then(|rest| rest.strip_prefix('/'))
            .filter(|key| !key.is_empty())
            .ok_or_else(|| LibraryError::storage(
                format!("{} does not belong to bucket {}", url, self.bucket).as_str(), Some("ForeignUrl".to_string())))
    }
}

#[async_trait]
impl StorageClient for S3StorageClient {
    async fn upload(&self, path: PathName, file: &UploadFile) -> LibraryResult<String> {
        let key = file.object_key(path);
        self.client
            .put_object()
            .bucket(self.bucket.as_str())
            .key(key.as_str())
            .set_content_type(file.content_type.clone())
            .content_length(file.bytes.len() as i64)
            .body(ByteStream::from(file.bytes.clone()))
            .send()
            .await?;
        tracing::debug!(bucket = self.bucket.as_str(), key = key.as_str(), "uploaded object");
        Ok(format!("{}/{}", self.base_url, key))
    }

    async fn delete_by_url(&self, url: &str) -> LibraryResult<()> {
        let key = self.key_of(url)?;
        self.client
            .delete_object()
            .bucket(self.bucket.as_str())
            .key(key)
            .send()
            .await?;
        Ok(())
    }
}

impl From<SdkError<PutObjectError>> for LibraryError {
    fn from(err: SdkError<PutObjectError>) -> Self {
        LibraryError::storage(format!("failed to put object {:?}", err).as_str(), Some("PutObject".to_string()))
    }
}

impl From<SdkError<DeleteObjectError>> for LibraryError {
    fn from(err: SdkError<DeleteObjectError>) -> Self {
        LibraryError::storage(format!("failed to delete object {:?}", err).as_str(), Some("DeleteObject".to_string()))
    }
}

// helper method to build s3-client for the configured region
pub(crate) async fn build_s3_client(region: &str) -> Client {
    let sdk_config = aws_config::load_from_env().await;
    let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
        .region(aws_sdk_s3::config::Region::new(region.to_string()))
        .build();
    Client::from_conf(s3_config)
}
