use async_trait::async_trait;
use library_db::MemoryTable;

use crate::{
    error::LibraryResult,
    modules::{
        authors::models::AuthorId,
        books::{
            models::{Book, BookId, NewBook},
            repository::BookRepository,
        },
    },
};

/// In-memory implementation of the book repository.
#[derive(Debug, Clone)]
pub struct MemoryBookRepository {
    books: MemoryTable<Book>,
}

impl Default for MemoryBookRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBookRepository {
    pub fn new() -> Self {
        Self {
            books: MemoryTable::new("book"),
        }
    }
}

#[async_trait]
impl BookRepository for MemoryBookRepository {
    async fn insert(&self, book: NewBook) -> LibraryResult<Book> {
        Ok(self
            .books
            .insert_with(|id| Book::from_new(BookId::new(id), book))
            .await)
    }

    async fn update(&self, id: BookId, book: NewBook) -> LibraryResult<Option<Book>> {
        Ok(self
            .books
            .update(id.get(), |stored| *stored = Book::from_new(id, book))
            .await)
    }

    async fn select(&self, id: BookId) -> LibraryResult<Option<Book>> {
        Ok(self.books.get(id.get()).await)
    }

    async fn select_all(&self) -> LibraryResult<Vec<Book>> {
        Ok(self.books.values().await)
    }

    async fn select_by_author(&self, author_id: AuthorId) -> LibraryResult<Vec<Book>> {
        Ok(self
            .books
            .filter(|book| book.author_id == author_id)
            .await)
    }

    async fn delete(&self, id: BookId) -> LibraryResult<bool> {
        Ok(self.books.remove(id.get()).await.is_some())
    }

    async fn delete_by_author(&self, author_id: AuthorId) -> LibraryResult<usize> {
        Ok(self
            .books
            .retain(|book| book.author_id != author_id)
            .await)
    }

    async fn count(&self) -> LibraryResult<usize> {
        Ok(self.books.len().await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn book(title: &str, author_id: i64) -> NewBook {
        NewBook {
            title: title.to_string(),
            published_date: date!(1900 - 01 - 01),
            genre: None,
            author_id: AuthorId::new(author_id),
        }
    }

    #[tokio::test]
    async fn select_by_author_filters() {
        let repository = MemoryBookRepository::new();
        repository.insert(book("Siddhartha", 1)).await.unwrap();
        repository.insert(book("Zauberberg", 2)).await.unwrap();
        repository.insert(book("Das Glasperlenspiel", 1)).await.unwrap();

        let titles: Vec<_> = repository
            .select_by_author(AuthorId::new(1))
            .await
            .unwrap()
            .into_iter()
            .map(|book| book.title)
            .collect();
        assert_eq!(titles, vec!["Siddhartha", "Das Glasperlenspiel"]);
    }

    #[tokio::test]
    async fn delete_by_author_counts_removed() {
        let repository = MemoryBookRepository::new();
        repository.insert(book("Siddhartha", 1)).await.unwrap();
        repository.insert(book("Zauberberg", 2)).await.unwrap();
        repository.insert(book("Das Glasperlenspiel", 1)).await.unwrap();

        assert_eq!(repository.delete_by_author(AuthorId::new(1)).await.unwrap(), 2);
        assert_eq!(repository.count().await.unwrap(), 1);
        assert_eq!(repository.delete_by_author(AuthorId::new(1)).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn update_missing_book() {
        let repository = MemoryBookRepository::new();
        assert!(repository
            .update(BookId::new(1), book("Nothing", 1))
            .await
            .unwrap()
            .is_none());
        assert!(!repository.delete(BookId::new(1)).await.unwrap());
    }
}
