pub mod seed;

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

/// Record with a numeric primary key assigned by its store
pub trait Entity: Clone + Send + Sync + 'static {
    fn id(&self) -> i64;
    fn set_id(&mut self, id: i64);
}

/// CRUD capability over one entity type
#[async_trait]
pub trait Store<T: Entity>: Send + Sync {
    async fn list(&self) -> Vec<T>;

    async fn get_by_id(&self, id: i64) -> Option<T>;

    /// Insert with a freshly assigned id; returns the stored record
    async fn insert(&self, record: T) -> T;

    /// Apply `apply` to the record in place; `None` if no such record
    async fn update<F>(&self, id: i64, apply: F) -> Option<T>
    where
        F: FnOnce(&mut T) + Send + 'static;

    /// Returns whether a record was removed
    async fn delete(&self, id: i64) -> bool;
}

/// In-process store, insertion ordered. Ids are never reused.
#[derive(Debug)]
pub struct MemoryStore<T> {
    rows: RwLock<Vec<T>>,
    next_id: AtomicI64,
}

impl<T: Entity> MemoryStore<T> {
    pub fn new() -> Self {
        Self::seeded(Vec::new())
    }

    pub fn seeded(rows: Vec<T>) -> Self {
        let next_id = rows.iter().map(Entity::id).max().unwrap_or(0) + 1;
        Self {
            rows: RwLock::new(rows),
            next_id: AtomicI64::new(next_id),
        }
    }

    pub async fn find<P>(&self, predicate: P) -> Option<T>
    where
        P: Fn(&T) -> bool,
    {
        self.rows.read().await.iter().find(|r| predicate(r)).cloned()
    }

    pub async fn filter<P>(&self, predicate: P) -> Vec<T>
    where
        P: Fn(&T) -> bool,
    {
        self.rows.read().await.iter().filter(|r| predicate(r)).cloned().collect()
    }

    pub async fn any<P>(&self, predicate: P) -> bool
    where
        P: Fn(&T) -> bool,
    {
        self.rows.read().await.iter().any(predicate)
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    /// Return the first match, or insert the record built by `create` under one write lock
    pub async fn find_or_insert<P, C>(&self, predicate: P, create: C) -> T
    where
        P: Fn(&T) -> bool,
        C: FnOnce() -> T,
    {
        let mut rows = self.rows.write().await;
        if let Some(existing) = rows.iter().find(|r| predicate(r)) {
            return existing.clone();
        }
        let mut record = create();
        record.set_id(self.allocate_id());
        rows.push(record.clone());
        record
    }

    /// Update the first match in place, or insert a record built by `create` and then updated
    pub async fn upsert<P, C, F>(&self, predicate: P, create: C, apply: F) -> T
    where
        P: Fn(&T) -> bool,
        C: FnOnce() -> T,
        F: FnOnce(&mut T),
    {
        let mut rows = self.rows.write().await;
        if let Some(existing) = rows.iter_mut().find(|r| predicate(r)) {
            apply(existing);
            return existing.clone();
        }
        let mut record = create();
        record.set_id(self.allocate_id());
        apply(&mut record);
        rows.push(record.clone());
        record
    }

    fn allocate_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }
}

impl<T: Entity> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Entity> Store<T> for MemoryStore<T> {
    async fn list(&self) -> Vec<T> {
        self.rows.read().await.clone()
    }

    async fn get_by_id(&self, id: i64) -> Option<T> {
        self.find(|r| r.id() == id).await
    }

    async fn insert(&self, mut record: T) -> T {
        let mut rows = self.rows.write().await;
        record.set_id(self.allocate_id());
        rows.push(record.clone());
        record
    }

    async fn update<F>(&self, id: i64, apply: F) -> Option<T>
    where
        F: FnOnce(&mut T) + Send + 'static,
    {
        let mut rows = self.rows.write().await;
        let record = rows.iter_mut().find(|r| r.id() == id)?;
        apply(record);
        Some(record.clone())
    }

    async fn delete(&self, id: i64) -> bool {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|r| r.id() != id);
        rows.len() != before
    }
}
