//! Embedded book catalog with write-through full-text search
//!
//! This crate keeps a structured document store and a Tantivy full-text
//! index mutually consistent, and answers multi-field boolean queries
//! against that index:
//!
//! - **Write-Through Indexing**: every save/delete through the catalog
//!   updates the index before the call returns
//! - **Full Rebuild**: blocking re-derivation of the index from store
//!   contents, for out-of-band data and recovery
//! - **Structured Search**: exact-match category AND tokenized text over
//!   title and description, with deterministic result ordering
//! - **Pluggable Storage**: in-memory and Sled-backed stores behind a
//!   narrow async trait
//!
//! # Example
//!
//! ```no_run
//! use book_catalog::{Book, BookCatalog, BookCategory, SearchConfig};
//! use book_catalog::store::create_in_memory_store;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = create_in_memory_store();
//!     let catalog = BookCatalog::new(store, SearchConfig::default()).await?;
//!
//!     catalog
//!         .save_book(Book::new("Dune", BookCategory::SciFi, "Desert planet epic"))
//!         .await?;
//!
//!     let hits = catalog.search(BookCategory::SciFi, "desert").await?;
//!     println!("Found {} books", hits.len());
//!
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod search;
pub mod store;

pub use catalog::BookCatalog;
pub use config::{Config, StoreBackend, StoreConfig};
pub use error::{CatalogError, Result};
pub use models::{Book, BookCategory};
pub use search::{BookQuery, IndexManager, IndexStats, SearchConfig, SearchError, SearchExecutor};
pub use store::{create_in_memory_store, create_store, BookStore, InMemoryStore, SledStore};
