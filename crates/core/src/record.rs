//! Record instances
//!
//! A `Record` is an instance of some host record type: its runtime type, an
//! optional id (assigned on first save) and a flat map of field values.
//!
//! A reference named `R` occupies two physical fields:
//! - `R_type`: the target's type name
//! - `R_id`: the target's id

use crate::types::{RecordId, TypeIdentity};
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Name of the physical field holding a reference's type tag
pub fn type_field(reference: &str) -> String {
    format!("{}_type", reference)
}

/// Name of the physical field holding a reference's target id
pub fn id_field(reference: &str) -> String {
    format!("{}_id", reference)
}

/// An instance of a host record type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    record_type: TypeIdentity,
    id: Option<RecordId>,
    fields: BTreeMap<String, Value>,
}

impl Record {
    /// Create an unsaved record of the given type
    pub fn new(record_type: TypeIdentity) -> Self {
        Self {
            record_type,
            id: None,
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style field assignment
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(field, value);
        self
    }

    /// Builder-style reference assignment
    pub fn with_reference(mut self, reference: &str, target: Option<&Record>) -> Self {
        self.set_reference(reference, target);
        self
    }

    /// Runtime type of this record
    pub fn record_type(&self) -> &TypeIdentity {
        &self.record_type
    }

    /// Id, if the record has been saved
    pub fn id(&self) -> Option<RecordId> {
        self.id
    }

    /// Assign the id (called by the persistence layer on save)
    pub fn assign_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }

    /// Read a field; absent fields read as `None`
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Write a field
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Point reference `reference` at `target`, or clear it with `None`
    ///
    /// Writes the target's runtime type name into `reference_type` and its id
    /// into `reference_id`. An unsaved target leaves `reference_id` null.
    pub fn set_reference(&mut self, reference: &str, target: Option<&Record>) {
        match target {
            Some(target) => {
                self.set(type_field(reference), target.record_type().as_str());
                self.set(
                    id_field(reference),
                    target.id().map(|id| id.as_u64() as i64),
                );
            }
            None => {
                self.set(type_field(reference), Value::Null);
                self.set(id_field(reference), Value::Null);
            }
        }
    }

    /// Stored type tag of reference `reference`
    ///
    /// Absent, null and non-string values all read as `None`.
    pub fn reference_type(&self, reference: &str) -> Option<&str> {
        self.get(&type_field(reference)).and_then(Value::as_str)
    }

    /// Stored target id of reference `reference`
    ///
    /// A negative stored id is not a record id and reads as `None`.
    pub fn reference_id(&self, reference: &str) -> Option<RecordId> {
        self.get(&id_field(reference))
            .and_then(Value::as_int)
            .and_then(|id| u64::try_from(id).ok())
            .map(RecordId::new)
    }

    /// All fields in name order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}
