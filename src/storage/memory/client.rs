use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::sync::atomic::{AtomicBool, Ordering};
use async_trait::async_trait;
use bytes::Bytes;
use crate::core::library::{LibraryError, LibraryResult};
use crate::storage::client::{StorageClient, UploadFile};
use crate::storage::PathName;

#[derive(Default)]
struct ObjectState {
    objects: HashMap<String, Bytes>,
    delete_attempts: Vec<String>,
}

// MemoryStorageClient keeps objects in process; uploads and deletes can be switched to fail
pub struct MemoryStorageClient {
    base_url: String,
    fail_uploads: AtomicBool,
    fail_deletes: AtomicBool,
    state: Mutex<ObjectState>,
}

impl MemoryStorageClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            fail_uploads: AtomicBool::new(false),
            fail_deletes: AtomicBool::new(false),
            state: Mutex::new(ObjectState::default()),
        }
    }

    fn lock(&self) -> LibraryResult<MutexGuard<'_, ObjectState>> {
        self.state.lock().map_err(|_| LibraryError::runtime("object store lock poisoned", None))
    }

    fn key_of<'a>(&self, url: &'a str) -> Option<&'a str> {
        url.strip_prefix(self.base_url.as_str()).and_then(|rest| rest.strip_prefix('/'))
    }

    pub fn set_fail_uploads(&self, fail: bool) {
        self.fail_uploads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }

    pub fn contains(&self, url: &str) -> bool {
        match (self.key_of(url), self.lock()) {
            (Some(key), Ok(state)) => state.objects.contains_key(key),
            _ => false,
        }
    }

    pub fn object_count(&self) -> usize {
        self.lock().map(|state| state.objects.len()).unwrap_or_default()
    }

    // every url passed to delete_by_url, whether or not the delete succeeded
    pub fn delete_attempts(&self) -> Vec<String> {
        self.lock().map(|state| state.delete_attempts.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl StorageClient for MemoryStorageClient {
    async fn upload(&self, path: PathName, file: &UploadFile) -> LibraryResult<String> {
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(LibraryError::storage("upload rejected by object store", Some("Unavailable".to_string())));
        }
        let key = file.object_key(path);
        let url = format!("{}/{}", self.base_url, key);
        self.lock()?.objects.insert(key, file.bytes.clone());
        Ok(url)
    }

    async fn delete_by_url(&self, url: &str) -> LibraryResult<()> {
        let mut state = self.lock()?;
        state.delete_attempts.push(url.to_string());
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(LibraryError::storage(
                format!("delete of {} rejected by object store", url).as_str(), Some("Unavailable".to_string())));
        }
        match self.key_of(url) {
            Some(key) => {
                state.objects.remove(key);
                Ok(())
            }
            None => Err(LibraryError::storage(format!("{} is not an object of this store", url).as_str(), None)),
        }
    }
}
