use async_trait::async_trait;
use sled::Db;
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{CatalogError, Result};
use crate::models::Book;
use crate::store::BookStore;

/// Persistent book store using the Sled embedded database
#[derive(Clone)]
pub struct SledStore {
    db: Arc<Db>,
    books_tree: sled::Tree,
}

impl SledStore {
    /// Create a new Sled store at the specified path
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let db = sled::open(&path)
            .map_err(|e| CatalogError::Store(format!("Failed to open Sled database: {}", e)))?;

        let books_tree = db
            .open_tree("books")
            .map_err(|e| CatalogError::Store(format!("Failed to open books tree: {}", e)))?;

        tracing::info!(path = ?path.as_ref(), "Initialized Sled store");

        Ok(Self {
            db: Arc::new(db),
            books_tree,
        })
    }

    /// Serialize book to bytes
    fn serialize_book(book: &Book) -> Result<Vec<u8>> {
        bincode::serialize(book)
            .map_err(|e| CatalogError::Serialization(format!("Failed to serialize book: {}", e)))
    }

    /// Deserialize book from bytes
    fn deserialize_book(bytes: &[u8]) -> Result<Book> {
        bincode::deserialize(bytes)
            .map_err(|e| CatalogError::Serialization(format!("Failed to deserialize book: {}", e)))
    }

    /// Get book key
    fn book_key(id: &Uuid) -> Vec<u8> {
        id.as_bytes().to_vec()
    }

    /// Flush pending writes to disk
    fn flush(&self) -> Result<()> {
        self.books_tree
            .flush()
            .map_err(|e| CatalogError::Store(format!("Failed to flush books tree: {}", e)))?;
        Ok(())
    }

    /// Get database size in bytes
    pub fn size_on_disk(&self) -> Result<u64> {
        self.db
            .size_on_disk()
            .map_err(|e| CatalogError::Store(format!("Failed to get database size: {}", e)))
    }
}

#[async_trait]
impl BookStore for SledStore {
    async fn save_book(&self, book: Book) -> Result<Book> {
        let mut book = book;
        let id = *book.id.get_or_insert_with(Uuid::new_v4);

        let key = Self::book_key(&id);
        let value = Self::serialize_book(&book)?;

        self.books_tree
            .insert(&key, value)
            .map_err(|e| CatalogError::Store(format!("Failed to save book: {}", e)))?;

        self.flush()?;

        tracing::debug!(book_id = %id, "Book saved to Sled");
        Ok(book)
    }

    async fn get_book(&self, id: &Uuid) -> Result<Option<Book>> {
        let key = Self::book_key(id);

        match self.books_tree.get(&key) {
            Ok(Some(bytes)) => Ok(Some(Self::deserialize_book(&bytes)?)),
            Ok(None) => Ok(None),
            Err(e) => Err(CatalogError::Store(format!("Failed to get book: {}", e))),
        }
    }

    async fn delete_book(&self, id: &Uuid) -> Result<()> {
        let key = Self::book_key(id);

        let removed = self
            .books_tree
            .remove(&key)
            .map_err(|e| CatalogError::Store(format!("Failed to delete book: {}", e)))?;

        if removed.is_none() {
            return Err(CatalogError::NotFound(format!("Book {} not found", id)));
        }

        self.flush()?;

        tracing::debug!(book_id = %id, "Book deleted from Sled");
        Ok(())
    }

    async fn list_books(&self) -> Result<Vec<Book>> {
        let mut books = Vec::new();

        for entry in self.books_tree.iter() {
            let (_, bytes) =
                entry.map_err(|e| CatalogError::Store(format!("Failed to scan books: {}", e)))?;
            books.push(Self::deserialize_book(&bytes)?);
        }

        books.sort_by_key(|book| book.id);
        Ok(books)
    }

    async fn count_books(&self) -> Result<u64> {
        Ok(self.books_tree.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BookCategory;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_save_and_get() {
        let temp_dir = TempDir::new().unwrap();
        let store = SledStore::new(temp_dir.path()).unwrap();

        let saved = store
            .save_book(Book::new("Dune", BookCategory::SciFi, "Desert planet"))
            .await
            .unwrap();
        let id = saved.id.expect("store should assign an id");

        let retrieved = store.get_book(&id).await.unwrap();
        assert_eq!(retrieved, Some(saved));
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let store = SledStore::new(temp_dir.path()).unwrap();

        let err = store.delete_book(&Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_list_and_count() {
        let temp_dir = TempDir::new().unwrap();
        let store = SledStore::new(temp_dir.path()).unwrap();

        for i in 0..3 {
            store
                .save_book(Book::new(
                    format!("Book {}", i),
                    BookCategory::Horror,
                    "...",
                ))
                .await
                .unwrap();
        }

        assert_eq!(store.count_books().await.unwrap(), 3);

        let books = store.list_books().await.unwrap();
        assert_eq!(books.len(), 3);
        assert!(books.windows(2).all(|pair| pair[0].id < pair[1].id));
    }
}
