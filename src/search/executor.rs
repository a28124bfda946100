//! Query execution and result resolution

use std::collections::HashSet;
use std::sync::Arc;
use tantivy::collector::TopDocs;
use tantivy::schema::Value;
use tantivy::TantivyDocument;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{Book, BookCategory};
use crate::search::config::SearchConfig;
use crate::search::error::SearchError;
use crate::search::index::IndexManager;
use crate::search::query::{BookQuery, QueryBuilder};
use crate::store::BookStore;

/// Runs built queries against the index and maps hits back to domain
/// entities through the document store.
pub struct SearchExecutor {
    /// Index manager
    index_manager: Arc<IndexManager>,

    /// Document store used to resolve hits
    store: Arc<dyn BookStore>,

    /// Configuration
    config: SearchConfig,
}

impl SearchExecutor {
    /// Create a new search executor
    pub fn new(
        index_manager: Arc<IndexManager>,
        store: Arc<dyn BookStore>,
        config: SearchConfig,
    ) -> Self {
        Self {
            index_manager,
            store,
            config,
        }
    }

    /// Search for books in a category matching the given text.
    ///
    /// Results are ordered by descending relevance score; ties are broken by
    /// ascending id so repeated searches against an unchanged index return
    /// the same order. Each matching id contributes at most one book. An
    /// empty match set is a normal outcome.
    pub async fn search(&self, category: BookCategory, text: &str) -> Result<Vec<Book>> {
        tracing::debug!(category = %category, text = %text, "Searching books");

        let query = BookQuery::new(category, text);
        let query_builder = QueryBuilder::new(
            self.index_manager.schema().clone(),
            self.index_manager.index().clone(),
        );
        let tantivy_query = query_builder.build(&query)?;

        let searcher = self.index_manager.reader().searcher();

        let limit = query.limit.min(self.config.max_results);
        let top_docs = searcher
            .search(&*tantivy_query, &TopDocs::with_limit(limit))
            .map_err(|e| SearchError::SearchFailed(format!("Search execution failed: {}", e)))?;

        let id_field = self
            .index_manager
            .schema()
            .get_field("id")
            .map_err(SearchError::from)?;

        // Extract (score, id) pairs from the raw hits
        let mut hits: Vec<(f32, Uuid)> = Vec::with_capacity(top_docs.len());
        for (score, doc_address) in top_docs {
            let doc = searcher
                .doc::<TantivyDocument>(doc_address)
                .map_err(|e| SearchError::SearchFailed(format!("Failed to retrieve doc: {}", e)))?;

            let Some(id_str) = doc.get_first(id_field).and_then(|v| v.as_str()) else {
                tracing::warn!("Index hit is missing its id field");
                continue;
            };

            match Uuid::parse_str(id_str) {
                Ok(id) => hits.push((score, id)),
                Err(_) => tracing::warn!(id = %id_str, "Index hit has a malformed id"),
            }
        }

        // Descending score, ascending id tie-break for a deterministic order
        hits.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(&b.1)));

        // Resolve hits to domain entities, at most once per id
        let mut seen: HashSet<Uuid> = HashSet::with_capacity(hits.len());
        let mut books = Vec::with_capacity(hits.len());
        for (_, id) in hits {
            if !seen.insert(id) {
                continue;
            }
            match self.store.get_book(&id).await? {
                Some(book) => books.push(book),
                None => {
                    // Store/index divergence window; resolved by a rebuild
                    tracing::warn!(book_id = %id, "Search hit has no store entry, index is stale");
                }
            }
        }

        tracing::debug!(matches = books.len(), "Search complete");
        Ok(books)
    }
}
