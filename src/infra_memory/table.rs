use crate::domain_port::StoreError;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Keyed row store with a monotonic id sequence starting at 1.
pub struct MemoryTable<V> {
    rows: DashMap<u64, V>,
    next_id: AtomicU64,
}

impl<V: Clone> MemoryTable<V> {
    pub fn new() -> Self {
        MemoryTable {
            rows: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn next_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    pub fn insert(&self, id: u64, row: V) {
        self.rows.insert(id, row);
    }

    pub fn replace(&self, id: u64, row: V) -> Result<(), StoreError> {
        match self.rows.get_mut(&id) {
            Some(mut slot) => {
                *slot = row;
                Ok(())
            }
            None => Err(StoreError::NotFound(id)),
        }
    }

    pub fn get(&self, id: u64) -> Option<V> {
        self.rows.get(&id).map(|row| row.value().clone())
    }

    /// Rows ordered by id, which is insertion order.
    pub fn all(&self) -> Vec<V> {
        let mut rows: Vec<(u64, V)> = self
            .rows
            .iter()
            .map(|row| (*row.key(), row.value().clone()))
            .collect();
        rows.sort_by_key(|(id, _)| *id);
        rows.into_iter().map(|(_, row)| row).collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

impl<V: Clone> Default for MemoryTable<V> {
    fn default() -> Self {
        Self::new()
    }
}
