use std::path::Path;
use async_trait::async_trait;
use bytes::Bytes;
use uuid::Uuid;
use crate::core::library::LibraryResult;
use crate::storage::PathName;

// UploadFile is one file part received from a client
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFile {
    pub field_name: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl UploadFile {
    pub fn new(field_name: &str, file_name: Option<&str>, content_type: Option<&str>, bytes: Bytes) -> Self {
        Self {
            field_name: field_name.to_string(),
            file_name: file_name.map(|s| s.to_string()),
            content_type: content_type.map(|s| s.to_string()),
            bytes,
        }
    }

    // blank parts carry no content and are skipped by callers
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    // object_key builds `<path>/<uuid>[.<ext>]`, keeping the extension of the original name
    pub fn object_key(&self, path: PathName) -> String {
        let ext = self.file_name.as_ref()
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .filter(|ext| !ext.is_empty());
        match ext {
            Some(ext) => format!("{}/{}.{}", path, Uuid::new_v4(), ext.to_lowercase()),
            None => format!("{}/{}", path, Uuid::new_v4()),
        }
    }
}

#[async_trait]
pub trait StorageClient: Sync + Send {
    // upload stores the file under the path and returns its public url
    async fn upload(&self, path: PathName, file: &UploadFile) -> LibraryResult<String>;

    // delete_by_url removes the object a previously returned url points at
    async fn delete_by_url(&self, url: &str) -> LibraryResult<()>;
}

// CleanupReport records the outcome of a best-effort purge; failures are reported, never raised
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CleanupReport {
    pub deleted: Vec<String>,
    pub failed: Vec<(String, String)>,
    pub skipped: usize,
}

impl CleanupReport {
    pub fn attempted(&self) -> usize {
        self.deleted.len() + self.failed.len()
    }

    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

// purge_urls deletes every url, logging and collecting failures instead of stopping on them
pub(crate) async fn purge_urls(client: &dyn StorageClient, urls: &[String]) -> CleanupReport {
    let mut report = CleanupReport::default();
    for url in urls {
        if url.trim().is_empty() {
            report.skipped += 1;
            continue;
        }
        match client.delete_by_url(url).await {
            Ok(_) => report.deleted.push(url.to_string()),
            Err(err) => {
                tracing::warn!(url = url.as_str(), error = %err, "failed to delete stored object, ignoring");
                report.failed.push((url.to_string(), err.to_string()));
            }
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use crate::storage::client::{purge_urls, StorageClient, UploadFile};
    use crate::storage::memory::client::MemoryStorageClient;
    use crate::storage::PathName;

    #[tokio::test]
    async fn test_should_detect_empty_files() {
        assert!(UploadFile::new("images", Some("a.png"), None, Bytes::new()).is_empty());
        assert!(!UploadFile::new("images", Some("a.png"), None, Bytes::from_static(b"png")).is_empty());
    }

    #[tokio::test]
    async fn test_should_build_object_keys() {
        let file = UploadFile::new("images", Some("cover.PNG"), Some("image/png"), Bytes::from_static(b"png"));
        let key = file.object_key(PathName::BookImages);
        assert!(key.starts_with("book-images/"));
        assert!(key.ends_with(".png"));
        let file = UploadFile::new("images", None, None, Bytes::from_static(b"raw"));
        let key = file.object_key(PathName::BookImages);
        assert!(!key.contains('.'));
        assert_ne!(key, file.object_key(PathName::BookImages));
    }

    #[tokio::test]
    async fn test_should_purge_best_effort() {
        let client = MemoryStorageClient::new("https://cdn.test");
        let file = UploadFile::new("images", Some("a.png"), None, Bytes::from_static(b"png"));
        let url = client.upload(PathName::BookImages, &file).await.expect("should upload");
        let report = purge_urls(&client, &[url.clone(), " ".to_string(), "https://elsewhere/x.png".to_string()]).await;
        assert_eq!(vec![url], report.deleted);
        assert_eq!(1, report.failed.len());
        assert_eq!(1, report.skipped);
        assert_eq!(2, report.attempted());
        assert!(!report.is_clean());
    }
}
