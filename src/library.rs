//! The library service: validated create/update, lookups across the
//! author-book relation, and deletion under the configured policy.

use std::sync::Arc;

use library_kernel::settings::{DeletePolicy, LibrarySettings};
use tokio::sync::RwLock;
use tracing::info;

use crate::{
    error::{LibraryError, LibraryResult},
    modules::{
        authors::{
            self,
            models::{Author, AuthorId, AuthorInput},
            repository::{memory::MemoryAuthorRepository, AuthorRepositoryArc},
        },
        books::{
            self,
            models::{Book, BookId, BookInput, NewBook},
            repository::{memory::MemoryBookRepository, BookRepositoryArc},
        },
    },
    validation::{Messages, ValidationErrors},
};

#[derive(Debug, Clone)]
pub struct Library {
    authors: AuthorRepositoryArc,
    books: BookRepositoryArc,
    /// Held shared while a book's author is checked and the book written,
    /// and exclusively while an author is deleted.
    relations: Arc<RwLock<()>>,
    delete_policy: DeletePolicy,
    messages: Messages,
}

impl Library {
    pub fn new(
        authors: AuthorRepositoryArc,
        books: BookRepositoryArc,
        settings: &LibrarySettings,
    ) -> Self {
        Self {
            authors,
            books,
            relations: Arc::new(RwLock::new(())),
            delete_policy: settings.delete_policy,
            messages: Messages::new(settings.locale),
        }
    }

    /// A library backed by empty in-memory tables.
    pub fn in_memory(settings: &LibrarySettings) -> Self {
        Self::new(
            Arc::new(MemoryAuthorRepository::new()),
            Arc::new(MemoryBookRepository::new()),
            settings,
        )
    }

    pub fn author_repository(&self) -> AuthorRepositoryArc {
        self.authors.clone()
    }

    pub fn book_repository(&self) -> BookRepositoryArc {
        self.books.clone()
    }

    pub fn delete_policy(&self) -> DeletePolicy {
        self.delete_policy
    }

    #[tracing::instrument(skip(self))]
    pub async fn create_author(&self, input: AuthorInput) -> LibraryResult<Author> {
        let author = authors::validation::validate(&input, &self.messages)?;
        let author = self.authors.insert(author).await?;
        info!(author_id = %author.id, name = %author.name, "author created");
        Ok(author)
    }

    #[tracing::instrument(skip(self))]
    pub async fn update_author(&self, id: AuthorId, input: AuthorInput) -> LibraryResult<Author> {
        let author = authors::validation::validate(&input, &self.messages)?;
        let author = self
            .authors
            .update(id, author)
            .await?
            .ok_or_else(|| LibraryError::not_found("author", id))?;
        info!(author_id = %id, "author updated");
        Ok(author)
    }

    pub async fn get_author(&self, id: AuthorId) -> LibraryResult<Author> {
        self.authors
            .select(id)
            .await?
            .ok_or_else(|| LibraryError::not_found("author", id))
    }

    pub async fn list_authors(&self) -> LibraryResult<Vec<Author>> {
        self.authors.select_all().await
    }

    /// Delete an author according to the delete policy.
    ///
    /// Returns the number of the author's books removed with it, which is
    /// always zero under [`DeletePolicy::Restrict`].
    #[tracing::instrument(skip(self))]
    pub async fn delete_author(&self, id: AuthorId) -> LibraryResult<usize> {
        let _relations = self.relations.write().await;

        if !self.authors.exists(id).await? {
            return Err(LibraryError::not_found("author", id));
        }

        let removed_books = match self.delete_policy {
            DeletePolicy::Restrict => {
                let books = self.books.select_by_author(id).await?.len();
                if books > 0 {
                    return Err(LibraryError::AuthorHasBooks {
                        author_id: id,
                        books,
                    });
                }
                0
            }
            DeletePolicy::Cascade => self.books.delete_by_author(id).await?,
        };

        if !self.authors.delete(id).await? {
            return Err(LibraryError::not_found("author", id));
        }

        info!(
            author_id = %id,
            removed_books,
            policy = self.delete_policy.as_str(),
            "author deleted"
        );
        Ok(removed_books)
    }

    /// Validate a book submission without storing it.
    pub fn validate_book(&self, input: &BookInput) -> Result<NewBook, ValidationErrors> {
        books::validation::validate(input, &self.messages)
    }

    async fn ensure_author(&self, author_id: AuthorId) -> LibraryResult<()> {
        if self.authors.exists(author_id).await? {
            Ok(())
        } else {
            Err(LibraryError::MissingAuthor { author_id })
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn create_book(&self, input: BookInput) -> LibraryResult<Book> {
        let book = self.validate_book(&input)?;
        let _relations = self.relations.read().await;
        self.ensure_author(book.author_id).await?;
        let book = self.books.insert(book).await?;
        info!(book_id = %book.id, author_id = %book.author_id, "book created");
        Ok(book)
    }

    #[tracing::instrument(skip(self))]
    pub async fn update_book(&self, id: BookId, input: BookInput) -> LibraryResult<Book> {
        let book = self.validate_book(&input)?;
        let _relations = self.relations.read().await;
        self.ensure_author(book.author_id).await?;
        let book = self
            .books
            .update(id, book)
            .await?
            .ok_or_else(|| LibraryError::not_found("book", id))?;
        info!(book_id = %id, author_id = %book.author_id, "book updated");
        Ok(book)
    }

    pub async fn get_book(&self, id: BookId) -> LibraryResult<Book> {
        self.books
            .select(id)
            .await?
            .ok_or_else(|| LibraryError::not_found("book", id))
    }

    pub async fn list_books(&self) -> LibraryResult<Vec<Book>> {
        self.books.select_all().await
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_book(&self, id: BookId) -> LibraryResult<()> {
        if !self.books.delete(id).await? {
            return Err(LibraryError::not_found("book", id));
        }
        info!(book_id = %id, "book deleted");
        Ok(())
    }

    /// Books written by `author_id`, in insertion order.
    pub async fn books_by_author(&self, author_id: AuthorId) -> LibraryResult<Vec<Book>> {
        if !self.authors.exists(author_id).await? {
            return Err(LibraryError::not_found("author", author_id));
        }
        self.books.select_by_author(author_id).await
    }

    /// The author a book belongs to.
    pub async fn author_of(&self, book: &Book) -> LibraryResult<Author> {
        self.authors
            .select(book.author_id)
            .await?
            .ok_or(LibraryError::MissingAuthor {
                author_id: book.author_id,
            })
    }
}
