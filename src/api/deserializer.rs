//! Purpose: Orchestrate parse, envelope validation, dispatch, and extraction.
//! Exports: `QueryDeserializer`, `deserialize`, `try_deserialize`.
//! Role: Single entry point from untrusted text to a typed `Query`.
//! Invariants: Stages run in a fixed order and stop at the first failure.
//! Invariants: The `Query` is assembled only after the extractor succeeds.
//! Notes: Rejections are logged at debug level; payload values are never logged.

use crate::core::dispatch::DispatchTable;
use crate::core::document::{DocumentView, RawDocument, read_string};
use crate::core::envelope::validate_envelope;
use crate::core::error::{Error, ErrorKind};
use crate::core::query::Query;

#[derive(Clone, Copy, Debug)]
pub struct QueryDeserializer {
    table: &'static DispatchTable,
}

impl QueryDeserializer {
    pub fn new() -> Self {
        Self {
            table: DispatchTable::global(),
        }
    }

    pub fn table(&self) -> &'static DispatchTable {
        self.table
    }

    /// Parses `text` and returns the query, or `None` for any failure.
    pub fn deserialize(&self, text: &str) -> Option<Query> {
        collapse(self.try_deserialize(text))
    }

    pub fn deserialize_slice(&self, bytes: &[u8]) -> Option<Query> {
        collapse(self.try_deserialize_slice(bytes))
    }

    /// Same pipeline as [`deserialize`](Self::deserialize), keeping the first failure.
    pub fn try_deserialize(&self, text: &str) -> Result<Query, Error> {
        let document = RawDocument::parse(text)?;
        self.try_deserialize_document(&document)
    }

    pub fn try_deserialize_slice(&self, bytes: &[u8]) -> Result<Query, Error> {
        let document = RawDocument::parse_slice(bytes)?;
        self.try_deserialize_document(&document)
    }

    pub fn try_deserialize_document(&self, document: &dyn DocumentView) -> Result<Query, Error> {
        let envelope = validate_envelope(document)?;

        let query_type = read_string(document, "query_type")?;
        let extractor = self.table.lookup(query_type).ok_or_else(|| {
            Error::new(ErrorKind::UnknownQueryType)
                .with_message(format!("unknown query type `{query_type}`"))
                .with_field("query_type")
                .with_hint(format!(
                    "expected one of: {}",
                    self.table.query_types().join(", ")
                ))
        })?;

        let payload = extractor(document)?;
        tracing::trace!(query_type, "query accepted");
        Ok(Query { envelope, payload })
    }
}

impl Default for QueryDeserializer {
    fn default() -> Self {
        Self::new()
    }
}

fn collapse(result: Result<Query, Error>) -> Option<Query> {
    match result {
        Ok(query) => Some(query),
        Err(err) => {
            tracing::debug!(kind = ?err.kind(), field = ?err.field(), "query rejected");
            None
        }
    }
}

/// `QueryDeserializer::new().deserialize(text)`.
pub fn deserialize(text: &str) -> Option<Query> {
    QueryDeserializer::new().deserialize(text)
}

pub fn try_deserialize(text: &str) -> Result<Query, Error> {
    QueryDeserializer::new().try_deserialize(text)
}
