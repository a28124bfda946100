//! Search index management

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tantivy::collector::Count;
use tantivy::schema::Schema;
use tantivy::{Index, IndexReader, IndexWriter, ReloadPolicy, Term};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::search::config::SearchConfig;
use crate::search::document::{build_book_schema, BookDocument, SearchDocument};
use crate::search::error::{SearchError, SearchResult};

/// Index statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexStats {
    /// Total number of documents in the index
    pub total_documents: u64,

    /// Index size in bytes
    pub index_size_bytes: u64,

    /// Number of segments
    pub num_segments: usize,
}

/// Manages the Tantivy search index.
///
/// Every mutation commits and reloads the reader before returning, so a
/// successful call is immediately visible to searches.
pub struct IndexManager {
    /// The Tantivy index
    index: Index,

    /// The schema
    schema: Schema,

    /// Index writer (wrapped in RwLock for thread-safety)
    writer: Arc<RwLock<IndexWriter>>,

    /// Index reader
    reader: IndexReader,

    /// Configuration
    config: SearchConfig,
}

impl IndexManager {
    /// Create a new IndexManager, opening the index at the configured path or
    /// creating it if absent.
    pub async fn new(config: SearchConfig) -> SearchResult<Self> {
        std::fs::create_dir_all(&config.index_path).map_err(|e| {
            SearchError::IndexInitFailed(format!("Failed to create index directory: {}", e))
        })?;

        let schema = build_book_schema();

        let index = if Self::index_exists(&config.index_path) {
            Index::open_in_dir(&config.index_path).map_err(|e| {
                SearchError::IndexInitFailed(format!("Failed to open existing index: {}", e))
            })?
        } else {
            Index::create_in_dir(&config.index_path, schema.clone()).map_err(|e| {
                SearchError::IndexInitFailed(format!("Failed to create new index: {}", e))
            })?
        };

        let writer = index
            .writer(config.writer_heap_size)
            .map_err(|e| SearchError::IndexInitFailed(format!("Failed to create writer: {}", e)))?;

        // Manual reload: the reader is reloaded explicitly after every commit
        // so writes are queryable before the mutating call returns
        let reader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()
            .map_err(|e| SearchError::IndexInitFailed(format!("Failed to create reader: {}", e)))?;

        Ok(Self {
            index,
            schema,
            writer: Arc::new(RwLock::new(writer)),
            reader,
            config,
        })
    }

    /// Check if an index exists at the given path
    fn index_exists(path: &Path) -> bool {
        path.join("meta.json").exists()
    }

    /// Get the schema
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Get the index
    pub fn index(&self) -> &Index {
        &self.index
    }

    /// Get the reader
    pub fn reader(&self) -> &IndexReader {
        &self.reader
    }

    /// Commit pending operations and make them visible to searches. Rolls the
    /// writer back to the last committed state if the commit fails.
    fn commit_and_reload(&self, writer: &mut IndexWriter) -> tantivy::Result<()> {
        if let Err(e) = writer.commit() {
            let _ = writer.rollback();
            return Err(e);
        }
        self.reader.reload()
    }

    /// Upsert a single book document, keyed by id.
    pub async fn upsert_book(&self, document: &BookDocument) -> SearchResult<()> {
        let mut writer = self.writer.write().await;

        // Delete any existing document with the same ID first
        let id_field = self.schema.get_field("id")?;
        writer.delete_term(Term::from_field_text(id_field, &document.document_id()));

        if let Err(e) = writer.add_document(document.to_tantivy_doc(&self.schema)) {
            let _ = writer.rollback();
            return Err(SearchError::IndexingFailed(format!(
                "Failed to add document: {}",
                e
            )));
        }

        self.commit_and_reload(&mut writer).map_err(|e| {
            SearchError::IndexingFailed(format!("Failed to commit document: {}", e))
        })?;

        tracing::debug!(book_id = %document.id, "Book indexed");
        Ok(())
    }

    /// Delete a book document by id.
    pub async fn delete_book(&self, id: &Uuid) -> SearchResult<()> {
        let mut writer = self.writer.write().await;

        let id_field = self.schema.get_field("id")?;
        writer.delete_term(Term::from_field_text(id_field, &id.to_string()));

        self.commit_and_reload(&mut writer).map_err(|e| {
            SearchError::DeletionFailed(format!("Failed to commit deletion: {}", e))
        })?;

        tracing::debug!(book_id = %id, "Book removed from index");
        Ok(())
    }

    /// Discard the current index contents and re-derive them from the given
    /// documents. Blocks until the rebuilt index is queryable; on failure the
    /// index is left partial and the rebuild must be retried.
    pub async fn rebuild_from(&self, documents: &[BookDocument]) -> SearchResult<usize> {
        let mut writer = self.writer.write().await;

        if let Err(e) = writer.delete_all_documents() {
            let _ = writer.rollback();
            return Err(SearchError::RebuildFailed(format!(
                "Failed to clear index: {}",
                e
            )));
        }

        for document in documents {
            if let Err(e) = writer.add_document(document.to_tantivy_doc(&self.schema)) {
                let _ = writer.rollback();
                return Err(SearchError::RebuildFailed(format!(
                    "Failed to add document {}: {}",
                    document.id, e
                )));
            }
        }

        self.commit_and_reload(&mut writer)
            .map_err(|e| SearchError::RebuildFailed(format!("Failed to commit rebuild: {}", e)))?;

        Ok(documents.len())
    }

    /// Clear the entire index
    pub async fn clear(&self) -> SearchResult<()> {
        let mut writer = self.writer.write().await;

        if let Err(e) = writer.delete_all_documents() {
            let _ = writer.rollback();
            return Err(SearchError::IndexingFailed(format!(
                "Failed to clear index: {}",
                e
            )));
        }

        self.commit_and_reload(&mut writer)
            .map_err(|e| SearchError::IndexingFailed(format!("Failed to commit clear: {}", e)))?;

        Ok(())
    }

    /// Get index statistics
    pub async fn stats(&self) -> SearchResult<IndexStats> {
        let searcher = self.reader.searcher();

        let total_documents = searcher
            .search(&tantivy::query::AllQuery, &Count)
            .map_err(|e| SearchError::SearchFailed(format!("Failed to count documents: {}", e)))?
            as u64;

        let num_segments = searcher.segment_readers().len();

        let index_size_bytes = std::fs::read_dir(&self.config.index_path)
            .map(|entries| {
                entries
                    .filter_map(|e| e.ok())
                    .filter_map(|e| e.metadata().ok())
                    .map(|m| m.len())
                    .sum()
            })
            .unwrap_or(0);

        Ok(IndexStats {
            total_documents,
            index_size_bytes,
            num_segments,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_document(title: &str) -> BookDocument {
        BookDocument {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            category: "FANTASY".to_string(),
            description: "A test book".to_string(),
        }
    }

    fn test_config(temp_dir: &TempDir) -> SearchConfig {
        SearchConfig {
            index_path: temp_dir.path().to_path_buf(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_index_creation() {
        let temp_dir = TempDir::new().unwrap();
        let manager = IndexManager::new(test_config(&temp_dir)).await;
        assert!(manager.is_ok());
    }

    #[tokio::test]
    async fn test_empty_index_stats() {
        let temp_dir = TempDir::new().unwrap();
        let manager = IndexManager::new(test_config(&temp_dir)).await.unwrap();
        let stats = manager.stats().await.unwrap();

        assert_eq!(stats.total_documents, 0);
    }

    #[tokio::test]
    async fn test_upsert_is_visible_immediately() {
        let temp_dir = TempDir::new().unwrap();
        let manager = IndexManager::new(test_config(&temp_dir)).await.unwrap();

        manager.upsert_book(&test_document("One")).await.unwrap();
        assert_eq!(manager.stats().await.unwrap().total_documents, 1);
    }

    #[tokio::test]
    async fn test_upsert_same_id_does_not_duplicate() {
        let temp_dir = TempDir::new().unwrap();
        let manager = IndexManager::new(test_config(&temp_dir)).await.unwrap();

        let mut document = test_document("One");
        manager.upsert_book(&document).await.unwrap();
        document.title = "One, revised".to_string();
        manager.upsert_book(&document).await.unwrap();

        assert_eq!(manager.stats().await.unwrap().total_documents, 1);
    }

    #[tokio::test]
    async fn test_delete_removes_document() {
        let temp_dir = TempDir::new().unwrap();
        let manager = IndexManager::new(test_config(&temp_dir)).await.unwrap();

        let document = test_document("One");
        let id = Uuid::parse_str(&document.id).unwrap();
        manager.upsert_book(&document).await.unwrap();
        manager.delete_book(&id).await.unwrap();

        assert_eq!(manager.stats().await.unwrap().total_documents, 0);
    }

    #[tokio::test]
    async fn test_rebuild_replaces_contents() {
        let temp_dir = TempDir::new().unwrap();
        let manager = IndexManager::new(test_config(&temp_dir)).await.unwrap();

        manager.upsert_book(&test_document("Stale")).await.unwrap();

        let fresh = vec![test_document("Fresh A"), test_document("Fresh B")];
        let indexed = manager.rebuild_from(&fresh).await.unwrap();

        assert_eq!(indexed, 2);
        assert_eq!(manager.stats().await.unwrap().total_documents, 2);
    }
}
