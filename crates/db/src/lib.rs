//! In-memory record tables.
//!
//! A [`MemoryTable`] owns records keyed by an `i64` surrogate key that the
//! table generates on insert. Keys start at 1 and are never reused, even
//! after the record holding them is removed. Nothing is written to disk.

use std::collections::BTreeMap;
use std::fmt::Debug;
use std::sync::Arc;

use tokio::sync::RwLock;

#[derive(Debug)]
struct TableState<T> {
    last_id: i64,
    rows: BTreeMap<i64, T>,
}

/// In-memory table of records of type `T`, ordered by key.
#[derive(Debug)]
pub struct MemoryTable<T> {
    name: &'static str,
    state: Arc<RwLock<TableState<T>>>,
}

impl<T> Clone for MemoryTable<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            state: self.state.clone(),
        }
    }
}

impl<T: Clone + Debug> MemoryTable<T> {
    /// Creates a new empty table.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            state: Arc::new(RwLock::new(TableState {
                last_id: 0,
                rows: BTreeMap::new(),
            })),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Allocates the next key, builds the record from it and stores it.
    pub async fn insert_with<F>(&self, build: F) -> T
    where
        F: FnOnce(i64) -> T,
    {
        let mut state = self.state.write().await;
        state.last_id += 1;
        let id = state.last_id;
        let row = build(id);
        state.rows.insert(id, row.clone());
        tracing::debug!(target: "library-db", table = self.name, id, "row inserted");
        row
    }

    pub async fn get(&self, id: i64) -> Option<T> {
        self.state.read().await.rows.get(&id).cloned()
    }

    pub async fn contains(&self, id: i64) -> bool {
        self.state.read().await.rows.contains_key(&id)
    }

    /// Applies `change` to the row with `id` and returns the updated row,
    /// or `None` if there is no such row.
    pub async fn update<F>(&self, id: i64, change: F) -> Option<T>
    where
        F: FnOnce(&mut T),
    {
        let mut state = self.state.write().await;
        let row = state.rows.get_mut(&id)?;
        change(row);
        tracing::debug!(target: "library-db", table = self.name, id, "row updated");
        Some(row.clone())
    }

    /// Removes and returns the row with `id`.
    pub async fn remove(&self, id: i64) -> Option<T> {
        let removed = self.state.write().await.rows.remove(&id);
        if removed.is_some() {
            tracing::debug!(target: "library-db", table = self.name, id, "row removed");
        }
        removed
    }

    /// Removes every row for which `keep` returns false and returns the
    /// number of removed rows.
    pub async fn retain<F>(&self, mut keep: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        let mut state = self.state.write().await;
        let before = state.rows.len();
        state.rows.retain(|_, row| keep(row));
        let removed = before - state.rows.len();
        if removed > 0 {
            tracing::debug!(target: "library-db", table = self.name, removed, "rows removed");
        }
        removed
    }

    /// All rows in key order.
    pub async fn values(&self) -> Vec<T> {
        self.state.read().await.rows.values().cloned().collect()
    }

    /// Rows matching `predicate`, in key order.
    pub async fn filter<F>(&self, mut predicate: F) -> Vec<T>
    where
        F: FnMut(&T) -> bool,
    {
        self.state
            .read()
            .await
            .rows
            .values()
            .filter(|row| predicate(*row))
            .cloned()
            .collect()
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.read().await.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: i64,
        label: String,
    }

    fn row(label: &str) -> impl FnOnce(i64) -> Row + '_ {
        move |id| Row {
            id,
            label: label.to_string(),
        }
    }

    #[tokio::test]
    async fn keys_start_at_one_and_increase() {
        let table = MemoryTable::new("rows");
        let first = table.insert_with(row("a")).await;
        let second = table.insert_with(row("b")).await;
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(table.len().await, 2);
    }

    #[tokio::test]
    async fn removed_keys_are_not_reused() {
        let table = MemoryTable::new("rows");
        table.insert_with(row("a")).await;
        let second = table.insert_with(row("b")).await;
        assert_eq!(table.remove(second.id).await, Some(second));
        let third = table.insert_with(row("c")).await;
        assert_eq!(third.id, 3);
        assert!(!table.contains(2).await);
    }

    #[tokio::test]
    async fn update_missing_row_returns_none() {
        let table: MemoryTable<Row> = MemoryTable::new("rows");
        assert!(table.update(7, |row| row.label.clear()).await.is_none());

        let inserted = table.insert_with(row("a")).await;
        let updated = table
            .update(inserted.id, |row| row.label = "z".to_string())
            .await
            .unwrap();
        assert_eq!(updated.label, "z");
        assert_eq!(table.get(inserted.id).await, Some(updated));
    }

    #[tokio::test]
    async fn retain_and_filter_preserve_key_order() {
        let table = MemoryTable::new("rows");
        for label in ["keep", "drop", "keep", "drop"] {
            table.insert_with(row(label)).await;
        }

        let kept = table.filter(|row| row.label == "keep").await;
        assert_eq!(kept.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 3]);

        assert_eq!(table.retain(|row| row.label == "keep").await, 2);
        assert_eq!(
            table.values().await.iter().map(|r| r.id).collect::<Vec<_>>(),
            vec![1, 3]
        );
    }

    #[tokio::test]
    async fn clones_share_rows() {
        let table = MemoryTable::new("rows");
        let other = table.clone();
        table.insert_with(row("a")).await;
        assert_eq!(other.len().await, 1);
        assert_eq!(other.name(), "rows");
        assert!(!other.is_empty().await);
    }
}
