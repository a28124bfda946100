//! Full-text search over the book catalog, powered by Tantivy
//!
//! This module keeps the inverted index in lockstep with the document store
//! and answers structured boolean queries:
//!
//! - **Write-Through Indexing**: every store mutation is pushed into the
//!   index before the mutating call returns
//! - **Full Rebuild**: blocking re-derivation of the index from store
//!   contents, the recovery path for out-of-band data
//! - **Structured Queries**: one exact-match category clause AND free text
//!   matched by token against title and description
//! - **Deterministic Results**: BM25 relevance order with an ascending-id
//!   tie-break
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │              Search Executor                     │
//! │  - build query   - execute                       │
//! │  - resolve hits through the store                │
//! └─────────────────────────────────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────────────┐
//! │              Index Manager                       │
//! │  - upsert/delete  - rebuild  - commit + reload   │
//! └─────────────────────────────────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────────────┐
//! │              Tantivy Index                       │
//! │  - Inverted index (title, description)           │
//! │  - Raw fields (id, category)                     │
//! └─────────────────────────────────────────────────┘
//! ```

mod config;
mod document;
mod error;
mod executor;
mod index;
mod query;

pub use config::SearchConfig;
pub use document::{build_book_schema, BookDocument, SearchDocument};
pub use error::{SearchError, SearchResult};
pub use executor::SearchExecutor;
pub use index::{IndexManager, IndexStats};
pub use query::{BookQuery, QueryBuilder};
