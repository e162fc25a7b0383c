use std::fmt;

use serde::{Deserialize, Serialize};
use time::Date;

use crate::modules::authors::models::AuthorId;

/// Store-generated identifier of a book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(i64);

impl BookId {
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<BookId> for i64 {
    fn from(id: BookId) -> Self {
        id.0
    }
}

/// A stored book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Unique identifier assigned on insert
    pub id: BookId,
    /// Title of the book, never blank
    pub title: String,
    /// Publication date
    pub published_date: Date,
    /// Genre of the book
    pub genre: Option<String>,
    /// Author the book belongs to
    pub author_id: AuthorId,
}

impl Book {
    pub(crate) fn from_new(id: BookId, book: NewBook) -> Self {
        Self {
            id,
            title: book.title,
            published_date: book.published_date,
            genre: book.genre,
            author_id: book.author_id,
        }
    }
}

/// Unvalidated book data as submitted for create or update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookInput {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub published_date: Option<Date>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub author_id: Option<AuthorId>,
}

impl BookInput {
    pub fn new(title: impl Into<String>, published_date: Date, author_id: AuthorId) -> Self {
        Self {
            title: Some(title.into()),
            published_date: Some(published_date),
            genre: None,
            author_id: Some(author_id),
        }
    }

    pub fn genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }
}

/// Book data that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub published_date: Date,
    pub genre: Option<String>,
    pub author_id: AuthorId,
}
