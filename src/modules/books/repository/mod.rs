use std::{fmt::Debug, sync::Arc};

use async_trait::async_trait;

use super::models::{Book, BookId, NewBook};
use crate::{error::LibraryResult, modules::authors::models::AuthorId};

pub mod memory;

#[async_trait]
pub trait BookRepository: Debug + Send + Sync {
    async fn insert(&self, book: NewBook) -> LibraryResult<Book>;
    /// Replaces every field of an existing book. `None` if there is no such book.
    async fn update(&self, id: BookId, book: NewBook) -> LibraryResult<Option<Book>>;
    async fn select(&self, id: BookId) -> LibraryResult<Option<Book>>;
    async fn select_all(&self) -> LibraryResult<Vec<Book>>;
    async fn select_by_author(&self, author_id: AuthorId) -> LibraryResult<Vec<Book>>;
    async fn delete(&self, id: BookId) -> LibraryResult<bool>;
    /// Deletes every book of `author_id` and returns how many were removed.
    async fn delete_by_author(&self, author_id: AuthorId) -> LibraryResult<usize>;
    async fn count(&self) -> LibraryResult<usize>;
}

pub type BookRepositoryArc = Arc<dyn BookRepository>;
