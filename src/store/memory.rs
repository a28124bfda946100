use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{CatalogError, Result};
use crate::models::Book;
use crate::store::BookStore;

/// In-memory book store (for development and testing)
#[derive(Clone)]
pub struct InMemoryStore {
    books: Arc<DashMap<Uuid, Book>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            books: Arc::new(DashMap::new()),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookStore for InMemoryStore {
    async fn save_book(&self, book: Book) -> Result<Book> {
        let mut book = book;
        let id = *book.id.get_or_insert_with(Uuid::new_v4);
        self.books.insert(id, book.clone());

        tracing::debug!(book_id = %id, "Book saved");
        Ok(book)
    }

    async fn get_book(&self, id: &Uuid) -> Result<Option<Book>> {
        Ok(self.books.get(id).map(|entry| entry.clone()))
    }

    async fn delete_book(&self, id: &Uuid) -> Result<()> {
        if self.books.remove(id).is_some() {
            tracing::debug!(book_id = %id, "Book deleted");
            Ok(())
        } else {
            Err(CatalogError::NotFound(format!("Book {} not found", id)))
        }
    }

    async fn list_books(&self) -> Result<Vec<Book>> {
        let mut books: Vec<Book> = self
            .books
            .iter()
            .map(|entry| entry.value().clone())
            .collect();

        books.sort_by_key(|book| book.id);
        Ok(books)
    }

    async fn count_books(&self) -> Result<u64> {
        Ok(self.books.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BookCategory;

    #[tokio::test]
    async fn test_save_assigns_id_once() {
        let store = InMemoryStore::new();

        let saved = store
            .save_book(Book::new("Dune", BookCategory::SciFi, "Desert planet"))
            .await
            .unwrap();
        let id = saved.id.expect("store should assign an id");

        // Re-saving keeps the id
        let mut updated = saved.clone();
        updated.description = "Desert planet epic".to_string();
        let resaved = store.save_book(updated).await.unwrap();

        assert_eq!(resaved.id, Some(id));
        assert_eq!(store.count_books().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_get_and_delete() {
        let store = InMemoryStore::new();

        let saved = store
            .save_book(Book::new("Dune", BookCategory::SciFi, "..."))
            .await
            .unwrap();
        let id = saved.id.unwrap();

        assert!(store.get_book(&id).await.unwrap().is_some());

        store.delete_book(&id).await.unwrap();
        assert!(store.get_book(&id).await.unwrap().is_none());

        let err = store.delete_book(&id).await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_id() {
        let store = InMemoryStore::new();

        for i in 0..5 {
            store
                .save_book(Book::new(
                    format!("Book {}", i),
                    BookCategory::Mystery,
                    "...",
                ))
                .await
                .unwrap();
        }

        let books = store.list_books().await.unwrap();
        assert_eq!(books.len(), 5);
        assert!(books.windows(2).all(|pair| pair[0].id < pair[1].id));
    }
}
