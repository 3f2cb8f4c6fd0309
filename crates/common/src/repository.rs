//! Generic persistence access over a single entity type
//!
//! Postgres-backed implementations live in the domain crates, one per
//! entity type. [`MemoryStore`] is the generic in-process implementation
//! used by tests and by the `memory` storage backend.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::db::RepositoryError;
use crate::entity::Entity;
use crate::paging::{Page, PageRequest};

pub type RepositoryResult<T> = std::result::Result<T, RepositoryError>;

/// Save / find-all-paged / find-by-id over one entity type
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    /// Persist `entity`, assigning an id on first save and refreshing
    /// `updated_at` on later saves. Returns the entity as stored.
    async fn save(&self, entity: E) -> RepositoryResult<E>;

    /// One page of entities in insertion order. Out-of-range pages are empty.
    async fn find_all(&self, request: PageRequest) -> RepositoryResult<Page<E>>;

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<E>>;

    async fn exists_by_id(&self, id: i64) -> RepositoryResult<bool> {
        Ok(self.find_by_id(id).await?.is_some())
    }
}

struct MemoryTable<E> {
    rows: BTreeMap<i64, E>,
    sequence: i64,
}

/// In-memory table with its own identity sequence.
///
/// Clones share the same table.
pub struct MemoryStore<E> {
    table: Arc<Mutex<MemoryTable<E>>>,
}

impl<E> Clone for MemoryStore<E> {
    fn clone(&self) -> Self {
        Self {
            table: Arc::clone(&self.table),
        }
    }
}

impl<E: Entity> Default for MemoryStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> MemoryStore<E> {
    pub fn new() -> Self {
        Self {
            table: Arc::new(Mutex::new(MemoryTable {
                rows: BTreeMap::new(),
                sequence: 0,
            })),
        }
    }

    // Rows are written last, so a poisoned table is still consistent.
    fn lock(&self) -> MutexGuard<'_, MemoryTable<E>> {
        self.table.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Insert a new row or replace an existing one
    pub fn upsert(&self, mut entity: E) -> RepositoryResult<E> {
        let mut table = self.lock();

        let id = match entity.id() {
            Some(id) => {
                if !table.rows.contains_key(&id) {
                    return Err(RepositoryError::NotFound(format!(
                        "{} {} does not exist",
                        E::NAME,
                        id
                    )));
                }
                entity.base_mut().touch();
                id
            }
            None => {
                table.sequence += 1;
                let id = table.sequence;
                entity.base_mut().assign_id(id);
                id
            }
        };

        table.rows.insert(id, entity.clone());
        Ok(entity)
    }

    pub fn page(&self, request: PageRequest) -> Page<E> {
        let table = self.lock();
        let total = table.rows.len() as u64;
        let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);

        let content = table
            .rows
            .values()
            .skip(offset)
            .take(request.size() as usize)
            .cloned()
            .collect();

        Page::new(content, request, total)
    }

    pub fn get(&self, id: i64) -> Option<E> {
        self.lock().rows.get(&id).cloned()
    }

    pub fn contains(&self, id: i64) -> bool {
        self.lock().rows.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.lock().rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for MemoryStore<E> {
    async fn save(&self, entity: E) -> RepositoryResult<E> {
        self.upsert(entity)
    }

    async fn find_all(&self, request: PageRequest) -> RepositoryResult<Page<E>> {
        Ok(self.page(request))
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<E>> {
        Ok(self.get(id))
    }
}
