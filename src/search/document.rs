//! Search document structures and schema

use serde::{Deserialize, Serialize};
use tantivy::schema::*;
use tantivy::TantivyDocument;

use crate::models::Book;
use crate::search::error::SearchError;

/// Trait for documents that can be indexed and searched
pub trait SearchDocument {
    /// Convert to Tantivy document
    fn to_tantivy_doc(&self, schema: &Schema) -> TantivyDocument;

    /// Get document ID
    fn document_id(&self) -> String;
}

/// Book document for search indexing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookDocument {
    /// Book ID
    pub id: String,

    /// Book title
    pub title: String,

    /// Category in its canonical string form
    pub category: String,

    /// Book description
    pub description: String,
}

impl TryFrom<&Book> for BookDocument {
    type Error = SearchError;

    fn try_from(book: &Book) -> Result<Self, Self::Error> {
        let id = book.id.ok_or_else(|| {
            SearchError::IndexingFailed("cannot index a book without an id".to_string())
        })?;

        Ok(Self {
            id: id.to_string(),
            title: book.title.clone(),
            category: book.category.to_string(),
            description: book.description.clone(),
        })
    }
}

impl SearchDocument for BookDocument {
    fn to_tantivy_doc(&self, schema: &Schema) -> TantivyDocument {
        let mut doc = TantivyDocument::new();

        if let Ok(field) = schema.get_field("id") {
            doc.add_text(field, &self.id);
        }

        if let Ok(field) = schema.get_field("title") {
            doc.add_text(field, &self.title);
        }

        if let Ok(field) = schema.get_field("category") {
            doc.add_text(field, &self.category);
        }

        if let Ok(field) = schema.get_field("description") {
            doc.add_text(field, &self.description);
        }

        doc
    }

    fn document_id(&self) -> String {
        self.id.clone()
    }
}

/// Build the search schema for books.
///
/// `id` and `category` are raw (exact-match) fields; `title` and
/// `description` are tokenized with relevance scoring.
pub fn build_book_schema() -> Schema {
    let mut schema_builder = Schema::builder();

    // ID - stored, indexed as a raw string
    schema_builder.add_text_field("id", STRING | STORED);

    // Title - full-text indexed, stored
    schema_builder.add_text_field("title", TEXT | STORED);

    // Category - exact-match only, never tokenized
    schema_builder.add_text_field("category", STRING | STORED);

    // Description - full-text indexed, stored
    schema_builder.add_text_field("description", TEXT | STORED);

    schema_builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BookCategory;
    use uuid::Uuid;

    #[test]
    fn test_book_to_document() {
        let mut book = Book::new(
            "Dune",
            BookCategory::SciFi,
            "Dune is a 1984 science fiction film",
        );
        book.id = Some(Uuid::new_v4());

        let doc = BookDocument::try_from(&book).unwrap();
        assert_eq!(doc.title, "Dune");
        assert_eq!(doc.category, "SCIFI");
        assert_eq!(doc.document_id(), book.id.unwrap().to_string());
    }

    #[test]
    fn test_unsaved_book_cannot_be_indexed() {
        let book = Book::new("Dune", BookCategory::SciFi, "...");
        assert!(BookDocument::try_from(&book).is_err());
    }

    #[test]
    fn test_schema_building() {
        let schema = build_book_schema();
        assert!(schema.get_field("id").is_ok());
        assert!(schema.get_field("title").is_ok());
        assert!(schema.get_field("category").is_ok());
        assert!(schema.get_field("description").is_ok());
    }
}
