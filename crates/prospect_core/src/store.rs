//! Document store boundary.
//!
//! The live backend is an external document database; the core only
//! needs the narrow query/update surface below. `MemoryStore` is the
//! in-process implementation used by the CLI (over a collection
//! snapshot file) and by tests. Stores are plain values handed to the
//! editor, never ambient globals.

use serde_json::{Map as JsonMap, Value as JsonValue};
use uuid::Uuid;

use crate::error::CoreError;

pub const ID_FIELD: &str = "_id";

/// The document-matching criteria the editor actually uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// `Key` field equals the given value.
    KeyEquals(String),
    /// Named field exists at the document root.
    RootFieldExists(String),
    /// Named field exists under the `Data` object.
    DataFieldExists(String),
    /// Any document at all.
    Any,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpdateOutcome {
    pub matched: u64,
    pub modified: u64,
}

pub trait DocumentStore {
    fn find_one(&self, query: &Query) -> Result<Option<JsonValue>, CoreError>;

    /// Apply a `$set`-style field map to the document with the given
    /// id. Keys may use dotted paths (`Data.Inventory`); intermediate
    /// objects are created as needed.
    fn update_one(
        &mut self,
        id: &str,
        fields: &JsonMap<String, JsonValue>,
    ) -> Result<UpdateOutcome, CoreError>;

    /// Insert a document, assigning an `_id` when missing; returns the id.
    fn insert_one(&mut self, document: JsonValue) -> Result<String, CoreError>;
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryStore {
    documents: Vec<JsonValue>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_documents(documents: Vec<JsonValue>) -> Self {
        let mut store = Self { documents };
        for document in &mut store.documents {
            ensure_id(document);
        }
        store
    }

    /// Load a collection snapshot: a JSON array of documents.
    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self, CoreError> {
        let value: JsonValue = serde_json::from_slice(bytes)
            .map_err(|e| CoreError::Parse(format!("malformed collection snapshot: {e}")))?;
        let JsonValue::Array(documents) = value else {
            return Err(CoreError::Parse(
                "collection snapshot must be a JSON array of documents".to_string(),
            ));
        };
        for (index, document) in documents.iter().enumerate() {
            if !document.is_object() {
                return Err(CoreError::Parse(format!(
                    "collection snapshot entry {index} is not an object"
                )));
            }
        }
        Ok(Self::from_documents(documents))
    }

    pub fn documents(&self) -> &[JsonValue] {
        &self.documents
    }

    pub fn clear(&mut self) {
        self.documents.clear();
    }

    pub fn to_json_string_pretty(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(&self.documents)
            .map_err(|e| CoreError::Io(format!("failed to encode collection snapshot: {e}")))
    }
}

impl DocumentStore for MemoryStore {
    fn find_one(&self, query: &Query) -> Result<Option<JsonValue>, CoreError> {
        Ok(self
            .documents
            .iter()
            .find(|document| matches_query(document, query))
            .cloned())
    }

    fn update_one(
        &mut self,
        id: &str,
        fields: &JsonMap<String, JsonValue>,
    ) -> Result<UpdateOutcome, CoreError> {
        let Some(document) = self
            .documents
            .iter_mut()
            .find(|document| document_id(document) == Some(id))
        else {
            return Ok(UpdateOutcome::default());
        };

        let before = document.clone();
        for (path, value) in fields {
            set_path(document, path, value.clone());
        }
        let modified = u64::from(*document != before);
        Ok(UpdateOutcome {
            matched: 1,
            modified,
        })
    }

    fn insert_one(&mut self, document: JsonValue) -> Result<String, CoreError> {
        let mut document = document;
        if !document.is_object() {
            return Err(CoreError::Validation(
                "inserted document must be a JSON object".to_string(),
            ));
        }
        let id = ensure_id(&mut document);
        self.documents.push(document);
        Ok(id)
    }
}

fn matches_query(document: &JsonValue, query: &Query) -> bool {
    match query {
        Query::KeyEquals(value) => {
            document.get("Key").and_then(JsonValue::as_str) == Some(value.as_str())
        }
        Query::RootFieldExists(field) => document.get(field).is_some(),
        Query::DataFieldExists(field) => document
            .get("Data")
            .and_then(|data| data.get(field))
            .is_some(),
        Query::Any => true,
    }
}

fn document_id(document: &JsonValue) -> Option<&str> {
    document.get(ID_FIELD).and_then(JsonValue::as_str)
}

fn ensure_id(document: &mut JsonValue) -> String {
    if let Some(id) = document_id(document) {
        return id.to_string();
    }
    let id = Uuid::new_v4().to_string();
    if let Some(map) = document.as_object_mut() {
        map.insert(ID_FIELD.to_string(), JsonValue::String(id.clone()));
    }
    id
}

fn set_path(target: &mut JsonValue, path: &str, value: JsonValue) {
    match path.split_once('.') {
        None => {
            if let Some(map) = target.as_object_mut() {
                map.insert(path.to_string(), value);
            }
        }
        Some((head, rest)) => {
            let Some(map) = target.as_object_mut() else {
                return;
            };
            let child = map
                .entry(head.to_string())
                .or_insert_with(|| JsonValue::Object(JsonMap::new()));
            if !child.is_object() {
                *child = JsonValue::Object(JsonMap::new());
            }
            set_path(child, rest, value);
        }
    }
}
