//! Bulk import of authors and books from a JSON catalog.
//!
//! Books in a catalog refer to authors by their 1-based position in the
//! catalog's `authors` list, not by stored id. Positions are translated to
//! the ids assigned on import.
//!
//! Entries are decoded one at a time, so an entry that does not match the
//! record shape is rejected without affecting the rest of the catalog.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use crate::{
    error::LibraryError,
    library::Library,
    modules::{
        authors::models::{AuthorId, AuthorInput},
        books::models::BookInput,
    },
};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Catalog {
    #[serde(default)]
    pub authors: Vec<Value>,
    #[serde(default)]
    pub books: Vec<Value>,
}

impl Catalog {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("failed to parse catalog")
    }

    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read catalog '{}'", path.display()))?;
        Self::from_json(&json)
    }
}

/// A catalog entry that was not imported.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rejection {
    pub entity: &'static str,
    /// 1-based position of the entry in its catalog list
    pub position: usize,
    pub code: &'static str,
    pub message: String,
    pub details: Vec<serde_json::Value>,
}

impl Rejection {
    const INVALID_ENTRY: &'static str = "invalid_entry";

    fn new(entity: &'static str, position: usize, error: &LibraryError) -> Self {
        Self {
            entity,
            position,
            code: error.code(),
            message: error.to_string(),
            details: error.details(),
        }
    }

    fn invalid_entry(entity: &'static str, position: usize, error: &serde_json::Error) -> Self {
        Self {
            entity,
            position,
            code: Self::INVALID_ENTRY,
            message: format!("invalid {entity} entry: {error}"),
            details: vec![serde_json::json!({ "error": error.to_string() })],
        }
    }
}

fn decode<T: DeserializeOwned>(
    entity: &'static str,
    position: usize,
    entry: Value,
) -> Result<T, Rejection> {
    serde_json::from_value(entry).map_err(|err| Rejection::invalid_entry(entity, position, &err))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImportReport {
    pub authors_imported: usize,
    pub books_imported: usize,
    pub rejected: Vec<Rejection>,
}

impl ImportReport {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

impl Library {
    /// Import every entry of `catalog`, authors first.
    ///
    /// A rejected entry does not stop the import. An entry that cannot be
    /// decoded is rejected as `invalid_entry`. A book whose author entry was
    /// rejected, or that points past the end of the author list, is rejected
    /// as referring to a missing author.
    pub async fn import(&self, catalog: Catalog) -> ImportReport {
        let mut report = ImportReport::default();
        let mut imported_authors: HashMap<i64, AuthorId> = HashMap::new();

        for (index, entry) in catalog.authors.into_iter().enumerate() {
            let position = index + 1;
            let input: AuthorInput = match decode("author", position, entry) {
                Ok(input) => input,
                Err(rejection) => {
                    tracing::warn!(position, code = rejection.code, "catalog author rejected");
                    report.rejected.push(rejection);
                    continue;
                }
            };
            match self.create_author(input).await {
                Ok(author) => {
                    imported_authors.insert(position as i64, author.id);
                    report.authors_imported += 1;
                }
                Err(err) => {
                    tracing::warn!(position, code = err.code(), "catalog author rejected");
                    report.rejected.push(Rejection::new("author", position, &err));
                }
            }
        }

        for (index, entry) in catalog.books.into_iter().enumerate() {
            let position = index + 1;
            let mut input: BookInput = match decode("book", position, entry) {
                Ok(input) => input,
                Err(rejection) => {
                    tracing::warn!(position, code = rejection.code, "catalog book rejected");
                    report.rejected.push(rejection);
                    continue;
                }
            };
            let reference = input.author_id;
            input.author_id = reference.and_then(|id| imported_authors.get(&id.get()).copied());

            let result = match (reference, input.author_id) {
                (Some(author_id), None) => match self.validate_book(&BookInput {
                    author_id: Some(author_id),
                    ..input
                }) {
                    Ok(_) => Err(LibraryError::MissingAuthor { author_id }),
                    Err(errors) => Err(errors.into()),
                },
                _ => self.create_book(input).await,
            };

            match result {
                Ok(_) => report.books_imported += 1,
                Err(err) => {
                    tracing::warn!(position, code = err.code(), "catalog book rejected");
                    report.rejected.push(Rejection::new("book", position, &err));
                }
            }
        }

        tracing::info!(
            authors = report.authors_imported,
            books = report.books_imported,
            rejected = report.rejected.len(),
            "catalog imported"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use library_kernel::settings::LibrarySettings;

    const CATALOG: &str = r#"{
        "authors": [
            {"name": "J. Verne", "birth_date": "1828-02-08", "nationality": "French"},
            {"name": "", "birth_date": "1877-07-02"},
            {"name": "Thomas Mann", "birth_date": "1875-06-06"}
        ],
        "books": [
            {"title": "20,000 Leagues", "published_date": "1870-01-01", "genre": "Adventure", "author_id": 1},
            {"title": "Siddhartha", "published_date": "1922-01-01", "author_id": 2},
            {"title": "Zauberberg", "published_date": "1924-01-01", "author_id": 3},
            {"title": "", "author_id": 1},
            {"title": "Lost", "published_date": "1900-01-01", "author_id": 9}
        ]
    }"#;

    #[tokio::test]
    async fn import_collects_rejections() {
        let library = Library::in_memory(&LibrarySettings::default());
        let report = library.import(Catalog::from_json(CATALOG).unwrap()).await;

        assert_eq!(report.authors_imported, 2);
        assert_eq!(report.books_imported, 2);
        assert!(!report.is_clean());

        let rejected: Vec<_> = report
            .rejected
            .iter()
            .map(|r| (r.entity, r.position, r.code))
            .collect();
        assert_eq!(
            rejected,
            vec![
                ("author", 2, "validation_error"),
                ("book", 2, "missing_author"),
                ("book", 4, "validation_error"),
                ("book", 5, "missing_author"),
            ]
        );

        let invalid_book = &report.rejected[2];
        assert_eq!(
            invalid_book
                .details
                .iter()
                .map(|d| d["field"].as_str().unwrap())
                .collect::<Vec<_>>(),
            vec!["title", "published_date"]
        );
    }

    #[tokio::test]
    async fn positions_map_to_assigned_ids() {
        let library = Library::in_memory(&LibrarySettings::default());
        library.import(Catalog::from_json(CATALOG).unwrap()).await;

        // "Thomas Mann" is third in the file but second to be stored.
        let zauberberg = library
            .list_books()
            .await
            .unwrap()
            .into_iter()
            .find(|book| book.title == "Zauberberg")
            .unwrap();
        let author = library.author_of(&zauberberg).await.unwrap();
        assert_eq!(author.id, AuthorId::new(2));
        assert_eq!(author.name, "Thomas Mann");
    }

    #[tokio::test]
    async fn empty_catalog_is_clean() {
        let library = Library::in_memory(&LibrarySettings::default());
        let report = library.import(Catalog::from_json("{}").unwrap()).await;
        assert!(report.is_clean());
        assert_eq!(report, ImportReport::default());
    }

    #[tokio::test]
    async fn undecodable_entries_are_rejected_individually() {
        let library = Library::in_memory(&LibrarySettings::default());
        let catalog = Catalog::from_json(
            r#"{
                "authors": [
                    {"name": "No birth date"},
                    {"name": "J. Verne", "birth_date": "1828-02-08"}
                ],
                "books": [
                    {"title": "Orphan", "published_date": "1900-01-01", "author_id": 1},
                    {"title": "Bad month", "published_date": "1870-13-01", "author_id": 2},
                    {"title": "20,000 Leagues", "published_date": "1870-01-01", "author_id": 2},
                    "not a book"
                ]
            }"#,
        )
        .unwrap();
        let report = library.import(catalog).await;

        assert_eq!(report.authors_imported, 1);
        assert_eq!(report.books_imported, 1);
        let rejected: Vec<_> = report
            .rejected
            .iter()
            .map(|r| (r.entity, r.position, r.code))
            .collect();
        assert_eq!(
            rejected,
            vec![
                ("author", 1, "invalid_entry"),
                ("book", 1, "missing_author"),
                ("book", 2, "invalid_entry"),
                ("book", 4, "invalid_entry"),
            ]
        );
        assert!(report.rejected[0].message.contains("birth_date"));

        let book = library.get_book(crate::BookId::new(1)).await.unwrap();
        assert_eq!(book.title, "20,000 Leagues");
        assert_eq!(library.author_of(&book).await.unwrap().name, "J. Verne");
    }

    #[tokio::test]
    async fn dates_with_a_time_of_day_are_rejected() {
        let library = Library::in_memory(&LibrarySettings::default());
        let catalog = Catalog::from_json(
            r#"{
                "authors": [{"name": "J. Verne", "birth_date": "1828-02-08"}],
                "books": [
                    {"title": "20,000 Leagues", "published_date": "1870-01-01T10:00:00", "author_id": 1}
                ]
            }"#,
        )
        .unwrap();
        let report = library.import(catalog).await;

        assert_eq!(report.books_imported, 0);
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(report.rejected[0].code, "invalid_entry");
        assert!(library.list_books().await.unwrap().is_empty());
    }

    #[test]
    fn malformed_catalog_is_an_error() {
        let err = Catalog::from_json("[]").unwrap_err();
        assert_eq!(err.to_string(), "failed to parse catalog");
        assert!(Catalog::from_json(r#"{"authors": {"name": "J. Verne"}}"#).is_err());
    }
}
