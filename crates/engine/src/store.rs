//! In-memory record store
//!
//! A minimal persistence layer: saves validated records, assigns ids and
//! answers equality queries. Enough to drive generated accessors end to end;
//! no transactions, no indexes.

use crate::schema::Schema;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use strata_polyref_core::{
    PolyrefError, QueryResult, Record, RecordId, RecordQuery, Result, TypeIdentity, Value,
};
use tracing::debug;

/// Records kept in insertion order
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<Vec<Record>>,
    next_id: AtomicU64,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate `record` against its model and save it
    ///
    /// Unsaved records get the next id; saved records are updated in place.
    ///
    /// # Errors
    ///
    /// Returns `RecordInvalid` with the validation messages if any rule
    /// fails, or `UnknownModel` if the record's type has no model.
    pub fn create(&self, schema: &Schema, mut record: Record) -> Result<Record> {
        let errors = schema.validate(&record)?;
        if !errors.is_empty() {
            debug!(
                record_type = %record.record_type(),
                errors = %errors,
                "Rejected invalid record"
            );
            return Err(PolyrefError::RecordInvalid(errors));
        }

        let mut records = self.records.write();
        match record.id() {
            Some(id) => {
                if let Some(slot) = records
                    .iter_mut()
                    .find(|r| r.id() == Some(id) && r.record_type() == record.record_type())
                {
                    *slot = record.clone();
                    return Ok(record);
                }
                records.push(record.clone());
            }
            None => {
                let id = RecordId::new(self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
                record.assign_id(id);
                records.push(record.clone());
            }
        }
        Ok(record)
    }

    /// Every record of type `host`, in id order
    pub fn all(&self, host: &TypeIdentity) -> QueryResult {
        let mut found: Vec<Record> = self
            .records
            .read()
            .iter()
            .filter(|r| r.record_type() == host)
            .cloned()
            .collect();
        found.sort_by_key(Record::id);
        QueryResult::new(found)
    }

    /// Record of type `host` with `id`
    pub fn find(&self, host: &TypeIdentity, id: RecordId) -> Option<Record> {
        self.records
            .read()
            .iter()
            .find(|r| r.record_type() == host && r.id() == Some(id))
            .cloned()
    }

    /// Total number of records across all types
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// True if nothing has been saved
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl RecordQuery for MemoryStore {
    fn where_equals(&self, host: &TypeIdentity, field: &str, value: &Value) -> Result<QueryResult> {
        let mut found: Vec<Record> = self
            .records
            .read()
            .iter()
            .filter(|r| r.record_type() == host && r.get(field) == Some(value))
            .cloned()
            .collect();
        found.sort_by_key(Record::id);
        Ok(QueryResult::new(found))
    }
}
