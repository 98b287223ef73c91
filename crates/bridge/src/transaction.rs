//! Bulk transaction batching.
//!
//! The map bridge replays a batch as one interop call instead of one call
//! per operation. Entries are replayed strictly in insertion order by the
//! receiving side, so order is part of the contract here.

use serde_json::{Map, Value};

/// One named operation with its positional JSON arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionEntry {
    pub event: String,
    pub data: Vec<Value>,
}

/// An ordered batch of named operations.
///
/// Operation names are not validated against any known set; unknown names
/// are accepted and simply replayed by the receiving side. Arguments may be
/// raw scalars, identifiers, or pre-encoded model fragments. A single
/// instance is single-writer; share it across threads only behind external
/// synchronization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BulkTransaction {
    entries: Vec<TransactionEntry>,
}

impl BulkTransaction {
    pub fn new() -> Self {
        BulkTransaction::default()
    }

    /// Appends one operation. Never fails; no arity checks.
    pub fn add(&mut self, event: impl Into<String>, data: impl IntoIterator<Item = Value>) {
        self.entries.push(TransactionEntry {
            event: event.into(),
            data: data.into_iter().collect(),
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[TransactionEntry] {
        &self.entries
    }

    /// Empties the batch so the instance can accumulate the next flush.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Emits `[{"event": name, "data": [args...]}, ...]` in exact insertion
    /// order. An empty batch serializes to an empty array.
    pub fn serialize(&self) -> Value {
        Value::Array(self.entries.iter().map(encode_entry).collect())
    }

    /// Like [`serialize`](Self::serialize) but consumes the batch, moving
    /// argument payloads into the output instead of cloning them.
    pub fn into_value(self) -> Value {
        Value::Array(
            self.entries
                .into_iter()
                .map(|entry| {
                    let mut row = Map::new();
                    row.insert("event".to_string(), Value::String(entry.event));
                    row.insert("data".to_string(), Value::Array(entry.data));
                    Value::Object(row)
                })
                .collect(),
        )
    }
}

fn encode_entry(entry: &TransactionEntry) -> Value {
    let mut row = Map::new();
    row.insert("event".to_string(), Value::String(entry.event.clone()));
    row.insert("data".to_string(), Value::Array(entry.data.clone()));
    Value::Object(row)
}
