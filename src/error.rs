//! Error type for controller operations.

/// Error returned by drop handling, DOM access and persistence calls.
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    /// An element id did not have the `<prefix>-<digits>` shape.
    #[error("invalid element id: {0:?}")]
    InvalidElementId(String),
    /// The drag payload carried no element id.
    #[error("drag payload is empty")]
    EmptyPayload,
    /// No element with the given id exists in the document.
    #[error("element not found: {0}")]
    MissingElement(String),
    /// A column has no task-list container.
    #[error("column {0} has no task list")]
    MissingTaskList(String),
    /// A DOM call failed inside the browser.
    #[error("dom operation failed: {0}")]
    Dom(String),
    /// The persistence request could not be built or sent.
    #[error("request failed: {0}")]
    Request(String),
    /// The server answered with a non-success status.
    #[error("server responded with status {0}")]
    Status(u16),
    /// The response body was not valid JSON.
    #[error("failed to decode response: {0}")]
    Decode(String),
    /// The request body could not be serialized.
    #[error("failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),
}
