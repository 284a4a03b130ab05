use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use gambit_core::repository::{ReadRepository, Repository, Result, UrlRecord};
use gambit_core::{Sequence, StorageError};
use jiff::Timestamp;

/// In-memory implementation of the Repository trait using DashMap.
///
/// The duplicate check and the insert happen under the same shard lock, so
/// two concurrent inserts of one sequence cannot both succeed. Expired
/// records may be replaced.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    storage: DashMap<String, UrlRecord>,
}

impl InMemoryRepository {
    /// Creates a new in-memory repository.
    pub fn new() -> Self {
        Self {
            storage: DashMap::new(),
        }
    }

    /// Creates a new in-memory repository with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: DashMap::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    fn evict_if_expired(&self, key: &str, now: Timestamp) {
        self.storage
            .remove_if(key, |_, record| record.is_expired_at(now));
    }
}

#[async_trait]
impl ReadRepository for InMemoryRepository {
    async fn get(&self, sequence: &Sequence) -> Result<Option<UrlRecord>> {
        let key = sequence.as_str();
        let now = Timestamp::now();

        let Some(entry) = self.storage.get(key) else {
            return Ok(None);
        };

        if entry.is_expired_at(now) {
            drop(entry);
            self.evict_if_expired(key, now);
            return Ok(None);
        }

        Ok(Some(entry.value().clone()))
    }

    async fn exists(&self, sequence: &Sequence) -> Result<bool> {
        let key = sequence.as_str();
        let now = Timestamp::now();

        let Some(entry) = self.storage.get(key) else {
            return Ok(false);
        };

        if entry.is_expired_at(now) {
            drop(entry);
            self.evict_if_expired(key, now);
            return Ok(false);
        }

        Ok(true)
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn insert(&self, sequence: &Sequence, record: UrlRecord) -> Result<()> {
        match self.storage.entry(sequence.as_str().to_owned()) {
            Entry::Occupied(mut occupied) => {
                if !occupied.get().is_expired_at(Timestamp::now()) {
                    return Err(StorageError::Conflict(sequence.to_string()));
                }
                occupied.insert(record);
            }
            Entry::Vacant(vacant) => {
                vacant.insert(record);
            }
        }
        Ok(())
    }

    async fn delete(&self, sequence: &Sequence) -> Result<bool> {
        Ok(self.storage.remove(sequence.as_str()).is_some())
    }

    async fn record_visit(&self, sequence: &Sequence, at: Timestamp) -> Result<bool> {
        let Some(mut entry) = self.storage.get_mut(sequence.as_str()) else {
            return Ok(false);
        };

        if !entry.is_live_at(at) {
            return Ok(false);
        }

        entry.visit_count += 1;
        entry.last_visited = Some(at);
        Ok(true)
    }
}
