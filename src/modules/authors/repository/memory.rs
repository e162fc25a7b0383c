use async_trait::async_trait;
use library_db::MemoryTable;

use crate::{
    error::LibraryResult,
    modules::authors::{
        models::{Author, AuthorId, NewAuthor},
        repository::AuthorRepository,
    },
};

/// In-memory implementation of the author repository.
#[derive(Debug, Clone)]
pub struct MemoryAuthorRepository {
    authors: MemoryTable<Author>,
}

impl Default for MemoryAuthorRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryAuthorRepository {
    /// Creates a new empty memory repository.
    pub fn new() -> Self {
        Self {
            authors: MemoryTable::new("author"),
        }
    }
}

#[async_trait]
impl AuthorRepository for MemoryAuthorRepository {
    async fn insert(&self, author: NewAuthor) -> LibraryResult<Author> {
        Ok(self
            .authors
            .insert_with(|id| Author::from_new(AuthorId::new(id), author))
            .await)
    }

    async fn update(&self, id: AuthorId, author: NewAuthor) -> LibraryResult<Option<Author>> {
        Ok(self
            .authors
            .update(id.get(), |stored| *stored = Author::from_new(id, author))
            .await)
    }

    async fn select(&self, id: AuthorId) -> LibraryResult<Option<Author>> {
        Ok(self.authors.get(id.get()).await)
    }

    async fn select_all(&self) -> LibraryResult<Vec<Author>> {
        Ok(self.authors.values().await)
    }

    async fn exists(&self, id: AuthorId) -> LibraryResult<bool> {
        Ok(self.authors.contains(id.get()).await)
    }

    async fn delete(&self, id: AuthorId) -> LibraryResult<bool> {
        Ok(self.authors.remove(id.get()).await.is_some())
    }

    async fn count(&self) -> LibraryResult<usize> {
        Ok(self.authors.len().await)
    }
}
