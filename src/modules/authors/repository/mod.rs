use std::{fmt::Debug, sync::Arc};

use async_trait::async_trait;

use super::models::{Author, AuthorId, NewAuthor};
use crate::error::LibraryResult;

pub mod memory;

#[async_trait]
pub trait AuthorRepository: Debug + Send + Sync {
    async fn insert(&self, author: NewAuthor) -> LibraryResult<Author>;
    /// Replaces every field of an existing author. `None` if there is no such author.
    async fn update(&self, id: AuthorId, author: NewAuthor) -> LibraryResult<Option<Author>>;
    async fn select(&self, id: AuthorId) -> LibraryResult<Option<Author>>;
    async fn select_all(&self) -> LibraryResult<Vec<Author>>;
    async fn exists(&self, id: AuthorId) -> LibraryResult<bool>;
    async fn delete(&self, id: AuthorId) -> LibraryResult<bool>;
    async fn count(&self) -> LibraryResult<usize>;
}

pub type AuthorRepositoryArc = Arc<dyn AuthorRepository>;
