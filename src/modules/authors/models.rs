use std::fmt;

use serde::{Deserialize, Serialize};
use time::Date;

/// Store-generated identifier of an author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthorId(i64);

impl AuthorId {
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for AuthorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<AuthorId> for i64 {
    fn from(id: AuthorId) -> Self {
        id.0
    }
}

/// A stored author.
///
/// The author's books are not part of the record; they are looked up by
/// `author_id` through the library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// Unique identifier assigned on insert
    pub id: AuthorId,
    /// Full name, never blank
    pub name: String,
    /// Date of birth
    pub birth_date: Date,
    /// Nationality, if known
    pub nationality: Option<String>,
}

impl Author {
    pub(crate) fn from_new(id: AuthorId, author: NewAuthor) -> Self {
        Self {
            id,
            name: author.name,
            birth_date: author.birth_date,
            nationality: author.nationality,
        }
    }
}

/// Unvalidated author data as submitted for create or update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorInput {
    #[serde(default)]
    pub name: Option<String>,
    pub birth_date: Date,
    #[serde(default)]
    pub nationality: Option<String>,
}

impl AuthorInput {
    pub fn new(name: impl Into<String>, birth_date: Date) -> Self {
        Self {
            name: Some(name.into()),
            birth_date,
            nationality: None,
        }
    }

    pub fn nationality(mut self, nationality: impl Into<String>) -> Self {
        self.nationality = Some(nationality.into());
        self
    }
}

/// Author data that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAuthor {
    pub name: String,
    pub birth_date: Date,
    pub nationality: Option<String>,
}
