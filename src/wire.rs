//! Wire types for the task update endpoint and the board event stream.
//!
//! DESIGN
//! ======
//! Push messages are decoded into a closed enum with an `Unknown` catch-all
//! so new server message types never fail decoding. Ids accept both JSON
//! numbers and strings because the server emits integers while the move
//! body carries column ids as text taken from the DOM.

#[cfg(test)]
#[path = "wire_test.rs"]
mod wire_test;

use serde::{Deserialize, Serialize};

/// An id carried by a push message, normalized to its decimal text.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "RawId")]
pub struct WireId(pub String);

impl WireId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Int(i64),
    Text(String),
}

impl From<RawId> for WireId {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Int(n) => Self(n.to_string()),
            RawId::Text(s) => Self(s),
        }
    }
}

/// A message from the board event stream.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PushMessage {
    /// Another client moved a task to a different column.
    TaskMoved { task_id: WireId, new_column_id: WireId },
    /// A task was created; `task_html` is its server-rendered markup.
    TaskAdded { column_id: WireId, task_html: String },
    /// Any message type this client does not handle.
    #[serde(other)]
    Unknown,
}

impl PushMessage {
    /// Decode one event-stream payload.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error for malformed JSON, a missing `type`,
    /// or a known type with missing fields.
    pub fn parse(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

/// JSON body of `PUT /tasks/{id}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveBody {
    /// Target column key, as text from the column's element id.
    pub column_id: String,
    /// Zero-based index of the task within the target column.
    pub order: usize,
}

/// A task move to persist, produced by a drop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveRequest {
    /// Task key from the task's element id.
    pub task_id: String,
    pub body: MoveBody,
}

impl MoveRequest {
    /// URL for this request under the given tasks endpoint.
    #[must_use]
    pub fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", endpoint.trim_end_matches('/'), self.task_id)
    }

    /// Serialize the request body.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if serialization fails.
    pub fn body_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.body)
    }
}
