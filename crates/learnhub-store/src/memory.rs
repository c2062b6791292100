use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use learnhub_core::{BaseEntity, Entity};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Another stored entity matched the conflict predicate.
    Conflict,
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Conflict => write!(f, "A conflicting record already exists"),
        }
    }
}

impl std::error::Error for StoreError {}

/// Insertion-ordered collection of entities.
///
/// Cloning the repository shares the underlying collection. No lock is ever
/// held across an `.await`; every method takes and releases it synchronously.
/// A poisoned lock is recovered since writes never leave an entity
/// half-updated.
pub struct InMemoryRepository<T: Entity> {
    items: Arc<RwLock<Vec<T>>>,
}

impl<T: Entity> Clone for InMemoryRepository<T> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
        }
    }
}

impl<T: Entity> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            items: Arc::new(RwLock::new(Vec::new())),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<T>> {
        self.items.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<T>> {
        self.items.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn find_all(&self) -> Vec<T> {
        self.read().clone()
    }

    pub fn find_by_id(&self, id: &str) -> Option<T> {
        self.read().iter().find(|item| item.id() == id).cloned()
    }

    pub fn find_one_by<P>(&self, predicate: P) -> Option<T>
    where
        P: Fn(&T) -> bool,
    {
        self.read().iter().find(|item| predicate(item)).cloned()
    }

    pub fn find_many_by<P>(&self, predicate: P) -> Vec<T>
    where
        P: Fn(&T) -> bool,
    {
        self.read()
            .iter()
            .filter(|item| predicate(item))
            .cloned()
            .collect()
    }

    pub fn count(&self) -> usize {
        self.read().len()
    }

    /// Assign a fresh id and timestamps, store, and return a copy.
    pub fn create(&self, draft: T::Draft) -> T {
        let entity = T::from_draft(BaseEntity::new(), draft);
        self.write().push(entity.clone());
        entity
    }

    /// Like [`create`](Self::create), but fails if any stored entity matches
    /// `conflict`. Check and insert happen under the same write lock.
    pub fn create_unless<C>(&self, conflict: C, draft: T::Draft) -> Result<T, StoreError>
    where
        C: Fn(&T) -> bool,
    {
        let mut items = self.write();
        if items.iter().any(|item| conflict(item)) {
            return Err(StoreError::Conflict);
        }

        let entity = T::from_draft(BaseEntity::new(), draft);
        items.push(entity.clone());
        Ok(entity)
    }

    /// Merge `patch` into the entity and refresh `updated_at`.
    /// Returns `None` when the id is unknown.
    pub fn update(&self, id: &str, patch: T::Patch) -> Option<T> {
        let mut items = self.write();
        let entity = items.iter_mut().find(|item| item.id() == id)?;

        entity.apply_patch(patch);
        entity.base_mut().touch();
        Some(entity.clone())
    }

    /// Like [`update`](Self::update), but fails if any *other* stored entity
    /// matches `conflict`.
    pub fn update_unless<C>(
        &self,
        id: &str,
        conflict: C,
        patch: T::Patch,
    ) -> Result<Option<T>, StoreError>
    where
        C: Fn(&T) -> bool,
    {
        let mut items = self.write();
        if items
            .iter()
            .any(|item| item.id() != id && conflict(item))
        {
            return Err(StoreError::Conflict);
        }

        let Some(entity) = items.iter_mut().find(|item| item.id() == id) else {
            return Ok(None);
        };

        entity.apply_patch(patch);
        entity.base_mut().touch();
        Ok(Some(entity.clone()))
    }

    /// Returns whether an entity was removed.
    pub fn delete_by_id(&self, id: &str) -> bool {
        let mut items = self.write();
        match items.iter().position(|item| item.id() == id) {
            Some(index) => {
                items.remove(index);
                true
            }
            None => false,
        }
    }
}
