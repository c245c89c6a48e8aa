use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};
use crate::core::domain::Identifiable;
use crate::core::library::{ErrorCode, LibraryError, LibraryResult};

struct TableState<E> {
    last_id: i64,
    records: BTreeMap<i64, E>,
    unique_index: HashMap<String, i64>,
}

// MemoryTable keeps records ordered by id and enforces their natural key under a single lock,
// so the uniqueness check and the write happen atomically.
pub(crate) struct MemoryTable<E> {
    name: String,
    not_found: ErrorCode,
    duplicate: ErrorCode,
    state: Mutex<TableState<E>>,
}

impl<E: Identifiable + Clone> MemoryTable<E> {
    pub(crate) fn new(name: &str, not_found: ErrorCode, duplicate: ErrorCode) -> Self {
        Self {
            name: name.to_string(),
            not_found,
            duplicate,
            state: Mutex::new(TableState {
                last_id: 0,
                records: BTreeMap::new(),
                unique_index: HashMap::new(),
            }),
        }
    }

    fn lock(&self) -> LibraryResult<MutexGuard<'_, TableState<E>>> {
        self.state.lock().map_err(|_| LibraryError::runtime(
            format!("{} table lock poisoned", self.name).as_str(), None))
    }

    pub(crate) fn insert(&self, entity: &E) -> LibraryResult<E> {
        let mut state = self.lock()?;
        let key = entity.unique_key();
        if state.unique_index.contains_key(&key) {
            return Err(LibraryError::duplicate_key(
                self.duplicate, format!("{} already has {}", self.name, key).as_str()));
        }
        state.last_id += 1;
        let saved = entity.with_identity(state.last_id, 0);
        state.unique_index.insert(key, saved.id());
        state.records.insert(saved.id(), saved.clone());
        Ok(saved)
    }

    pub(crate) fn get(&self, id: i64) -> LibraryResult<E> {
        let state = self.lock()?;
        state.records.get(&id).cloned().ok_or_else(|| LibraryError::not_found(
            self.not_found, format!("{} has no record {}", self.name, id).as_str()))
    }

    pub(crate) fn update(&self, entity: &E) -> LibraryResult<E> {
        let mut state = self.lock()?;
        let (old_key, old_version) = match state.records.get(&entity.id()) {
            Some(existing) => (existing.unique_key(), existing.version()),
            None => {
                return Err(LibraryError::not_found(
                    self.not_found, format!("{} has no record {}", self.name, entity.id()).as_str()));
            }
        };
        if old_version != entity.version() {
            return Err(LibraryError::database(
                format!("stale version {} of {} record {}", entity.version(), self.name, entity.id()).as_str(),
                Some("ConditionalCheckFailed".to_string()), false));
        }
        let new_key = entity.unique_key();
        if let Some(owner) = state.unique_index.get(&new_key) {
            if *owner != entity.id() {
                return Err(LibraryError::duplicate_key(
                    self.duplicate, format!("{} already has {}", self.name, new_key).as_str()));
            }
        }
        let saved = entity.with_identity(entity.id(), old_version + 1);
        state.unique_index.remove(&old_key);
        state.unique_index.insert(new_key, saved.id());
        state.records.insert(saved.id(), saved.clone());
        Ok(saved)
    }

    pub(crate) fn delete(&self, id: i64) -> LibraryResult<E> {
        let mut state = self.lock()?;
        match state.records.remove(&id) {
            Some(removed) => {
                state.unique_index.remove(&removed.unique_key());
                Ok(removed)
            }
            None => {
                Err(LibraryError::not_found(
                    self.not_found, format!("{} has no record {}", self.name, id).as_str()))
            }
        }
    }

    pub(crate) fn find_by_unique_key(&self, key: &str) -> LibraryResult<Option<E>> {
        let state = self.lock()?;
        Ok(state.unique_index.get(key).and_then(|id| state.records.get(id)).cloned())
    }

    pub(crate) fn all(&self) -> LibraryResult<Vec<E>> {
        let state = self.lock()?;
        Ok(state.records.values().cloned().collect())
    }
}
