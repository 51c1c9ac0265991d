//! Query interface of the persistence layer
//!
//! Generated scoped queries and typed lookups need exactly one primitive from
//! the record store: select every record of a host type whose field equals a
//! value. Query execution itself belongs to the store.

use crate::error::Result;
use crate::record::Record;
use crate::types::{RecordId, TypeIdentity};
use crate::value::Value;

/// Equality query primitive provided by the record store
pub trait RecordQuery: Send + Sync {
    /// Records of type `host` whose `field` equals `value`, in id order
    fn where_equals(&self, host: &TypeIdentity, field: &str, value: &Value) -> Result<QueryResult>;
}

/// Records returned by a query
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResult {
    records: Vec<Record>,
}

impl QueryResult {
    /// Wrap records returned by the store
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if nothing matched
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First record, if any
    pub fn first(&self) -> Option<&Record> {
        self.records.first()
    }

    /// Iterate records
    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }

    /// Ids of the saved records
    pub fn ids(&self) -> Vec<RecordId> {
        self.records.iter().filter_map(Record::id).collect()
    }

    /// True if a record with `id` is part of the result
    pub fn contains(&self, id: RecordId) -> bool {
        self.records.iter().any(|r| r.id() == Some(id))
    }
}

impl IntoIterator for QueryResult {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}
