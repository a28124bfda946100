//! Catalog facade: write-through indexing and search orchestration

use std::sync::Arc;
use tokio::sync::Mutex;
use validator::Validate;

use crate::config::Config;
use crate::error::Result;
use crate::models::{Book, BookCategory};
use crate::search::{
    BookDocument, IndexManager, IndexStats, SearchConfig, SearchExecutor, SearchResult,
};
use crate::store::{create_store, BookStore};

/// The book catalog: a document store and a full-text index kept mutually
/// consistent.
///
/// Every mutation performed through this type is pushed into the index
/// before the call returns (write-through, not write-behind). There is no
/// atomicity between the store commit and the index commit against process
/// crashes; the recovery path for any divergence is [`rebuild_index`].
///
/// [`rebuild_index`]: BookCatalog::rebuild_index
pub struct BookCatalog {
    /// Document store
    store: Arc<dyn BookStore>,

    /// Index manager
    index_manager: Arc<IndexManager>,

    /// Search executor
    executor: SearchExecutor,

    /// Serializes full rebuilds against each other
    rebuild_lock: Mutex<()>,
}

impl BookCatalog {
    /// Create a new catalog from an injected store and search configuration
    pub async fn new(store: Arc<dyn BookStore>, search_config: SearchConfig) -> Result<Self> {
        let index_manager = Arc::new(IndexManager::new(search_config.clone()).await?);
        let executor = SearchExecutor::new(
            Arc::clone(&index_manager),
            Arc::clone(&store),
            search_config,
        );

        Ok(Self {
            store,
            index_manager,
            executor,
            rebuild_lock: Mutex::new(()),
        })
    }

    /// Create a catalog from configuration, constructing the store backend
    pub async fn from_config(config: &Config) -> Result<Self> {
        let store = create_store(&config.store)?;
        Self::new(store, config.search.clone()).await
    }

    /// Save a book and index it within the same logical operation.
    ///
    /// The book is validated before any store or index access. A store
    /// failure leaves the index untouched. An index failure is reported as a
    /// failure of the whole operation even though the store write has
    /// already committed; `rebuild_index` resolves the divergence.
    pub async fn save_book(&self, book: Book) -> Result<Book> {
        book.validate()?;

        tracing::info!(title = %book.title, category = %book.category, "Saving book");

        let saved = self.store.save_book(book).await?;
        let document = BookDocument::try_from(&saved)?;
        self.index_manager.upsert_book(&document).await?;

        Ok(saved)
    }

    /// Delete all books.
    ///
    /// Books are removed individually (rather than with a bulk delete) so
    /// that each removal also clears the book's index entry.
    pub async fn delete_all_books(&self) -> Result<()> {
        tracing::info!("Deleting all books");

        for book in self.store.list_books().await? {
            if let Some(id) = book.id {
                self.store.delete_book(&id).await?;
                self.index_manager.delete_book(&id).await?;
            }
        }

        Ok(())
    }

    /// List all books, ordered by ascending id
    pub async fn list_all_books(&self) -> Result<Vec<Book>> {
        self.store.list_books().await
    }

    /// Discard the index and re-derive it from current store contents.
    ///
    /// Blocks until the rebuilt index is queryable. This is the designated
    /// recovery path for data inserted out of band (directly through a store
    /// handle, bulk-loaded, or left inconsistent by a partial failure) and
    /// for first-time index population. Safe to retry on failure.
    pub async fn rebuild_index(&self) -> Result<()> {
        let _guard = self.rebuild_lock.lock().await;

        tracing::info!("Rebuilding full-text index");

        let books = self.store.list_books().await?;
        let documents = books
            .iter()
            .map(BookDocument::try_from)
            .collect::<SearchResult<Vec<_>>>()?;

        let indexed = self.index_manager.rebuild_from(&documents).await?;

        tracing::info!(indexed, "Index rebuild complete");
        Ok(())
    }

    /// Search for books in a category matching the given text.
    ///
    /// Results are ordered by descending relevance with an ascending-id
    /// tie-break; an empty match set is a normal outcome.
    pub async fn search(&self, category: BookCategory, text: &str) -> Result<Vec<Book>> {
        self.executor.search(category, text).await
    }

    /// Get statistics for the underlying index
    pub async fn index_stats(&self) -> Result<IndexStats> {
        Ok(self.index_manager.stats().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CatalogError;
    use crate::store::create_in_memory_store;
    use tempfile::TempDir;

    async fn create_test_catalog() -> (BookCatalog, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config = SearchConfig {
            index_path: temp_dir.path().to_path_buf(),
            ..Default::default()
        };
        let catalog = BookCatalog::new(create_in_memory_store(), config)
            .await
            .unwrap();
        (catalog, temp_dir)
    }

    #[tokio::test]
    async fn test_save_populates_id_and_indexes() {
        let (catalog, _guard) = create_test_catalog().await;

        let saved = catalog
            .save_book(Book::new("Dune", BookCategory::SciFi, "Desert planet"))
            .await
            .unwrap();

        assert!(saved.id.is_some());
        assert_eq!(catalog.index_stats().await.unwrap().total_documents, 1);
    }

    #[tokio::test]
    async fn test_invalid_book_is_rejected_before_persisting() {
        let (catalog, _guard) = create_test_catalog().await;

        let err = catalog
            .save_book(Book::new("", BookCategory::SciFi, "No title"))
            .await
            .unwrap_err();

        assert!(matches!(err, CatalogError::Validation(_)));
        assert!(catalog.list_all_books().await.unwrap().is_empty());
        assert_eq!(catalog.index_stats().await.unwrap().total_documents, 0);
    }

    #[tokio::test]
    async fn test_delete_all_clears_store_and_index() {
        let (catalog, _guard) = create_test_catalog().await;

        for i in 0..3 {
            catalog
                .save_book(Book::new(
                    format!("Book {}", i),
                    BookCategory::Fantasy,
                    "Some tale",
                ))
                .await
                .unwrap();
        }

        catalog.delete_all_books().await.unwrap();

        assert!(catalog.list_all_books().await.unwrap().is_empty());
        assert_eq!(catalog.index_stats().await.unwrap().total_documents, 0);
    }
}
