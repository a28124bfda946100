//! Search query building

use serde::{Deserialize, Serialize};
use tantivy::query::{BooleanQuery, Occur, Query, QueryParser, TermQuery};
use tantivy::schema::{IndexRecordOption, Schema};
use tantivy::{Index, Term};

use crate::models::BookCategory;
use crate::search::error::{SearchError, SearchResult};

/// Default number of results per search
const DEFAULT_LIMIT: usize = 100;

/// A structured search request: one exact-match category plus free text
/// matched against the tokenized fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookQuery {
    /// Category to match exactly
    pub category: BookCategory,

    /// Free-text query, matched by token against title and description.
    /// May be blank, in which case only the category clause applies.
    pub text: String,

    /// Number of results to return
    pub limit: usize,
}

impl BookQuery {
    /// Create a new search request
    pub fn new(category: BookCategory, text: impl Into<String>) -> Self {
        Self {
            category,
            text: text.into(),
            limit: DEFAULT_LIMIT,
        }
    }

    /// Set the result limit
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

/// Builds Tantivy boolean queries from a [`BookQuery`].
///
/// The builder does no tokenization itself; the exact/tokenized distinction
/// between the category field and the text fields is carried by the schema.
pub struct QueryBuilder {
    schema: Schema,
    index: Index,
}

impl QueryBuilder {
    /// Create a new query builder
    pub fn new(schema: Schema, index: Index) -> Self {
        Self { schema, index }
    }

    /// Build a Tantivy query: category matched exactly, AND the search text
    /// matched by token against the union of title and description (a hit on
    /// either field satisfies the clause).
    pub fn build(&self, query: &BookQuery) -> SearchResult<Box<dyn Query>> {
        let mut subqueries: Vec<(Occur, Box<dyn Query>)> = Vec::new();

        let category_field = self.schema.get_field("category")?;
        let category_term =
            Term::from_field_text(category_field, &query.category.to_string());
        subqueries.push((
            Occur::Must,
            Box::new(TermQuery::new(category_term, IndexRecordOption::Basic)),
        ));

        let text = query.text.trim();
        if !text.is_empty() {
            let title_field = self.schema.get_field("title")?;
            let description_field = self.schema.get_field("description")?;

            let query_parser =
                QueryParser::for_index(&self.index, vec![title_field, description_field]);
            let parsed_query = query_parser
                .parse_query(text)
                .map_err(|e| SearchError::QueryParsingFailed(e.to_string()))?;
            subqueries.push((Occur::Must, parsed_query));
        }

        Ok(Box::new(BooleanQuery::from(subqueries)))
    }
}
