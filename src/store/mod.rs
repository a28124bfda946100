pub mod factory;
pub mod memory;
pub mod sled_store;

pub use factory::{create_in_memory_store, create_store};
pub use memory::InMemoryStore;
pub use sled_store::SledStore;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::Book;

/// Trait for book storage operations.
///
/// The sole persistence seam of the catalog; implementations are injected
/// into [`crate::BookCatalog`] and faked in tests.
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Persist a book, assigning an id if it has none. Returns the stored
    /// book with its id populated; the id never changes on later saves.
    async fn save_book(&self, book: Book) -> Result<Book>;

    /// Get a book by id
    async fn get_book(&self, id: &Uuid) -> Result<Option<Book>>;

    /// Delete a book by id
    async fn delete_book(&self, id: &Uuid) -> Result<()>;

    /// Full scan, ordered by ascending id
    async fn list_books(&self) -> Result<Vec<Book>>;

    /// Count stored books
    async fn count_books(&self) -> Result<u64>;
}
