//! Task persistence over HTTP via `gloo-net`.
//!
//! ERROR HANDLING
//! ==============
//! A failed move is logged and otherwise dropped. The DOM already shows the
//! optimistic position; nothing here retries or reverts it.

use gloo_net::http::Request;
use serde_json::Value;

use crate::error::BoardError;
use crate::wire::MoveRequest;

/// Send `PUT {endpoint}/{task}` with the move body and decode the JSON reply.
///
/// # Errors
///
/// Returns [`BoardError::Request`] on network failure, [`BoardError::Status`]
/// on a non-2xx response, and [`BoardError::Decode`] when the body is not JSON.
pub async fn send_move(endpoint: &str, request: &MoveRequest) -> Result<Value, BoardError> {
    let url = request.url(endpoint);
    let resp = Request::put(&url)
        .json(&request.body)
        .map_err(|e| BoardError::Request(e.to_string()))?
        .send()
        .await
        .map_err(|e| BoardError::Request(e.to_string()))?;
    let status = resp.status();
    if !(200..300).contains(&status) {
        return Err(BoardError::Status(status));
    }
    resp.json::<Value>()
        .await
        .map_err(|e| BoardError::Decode(e.to_string()))
}

/// Persist a move in the background, logging the outcome.
pub fn spawn_move(endpoint: String, request: MoveRequest) {
    wasm_bindgen_futures::spawn_local(async move {
        match send_move(&endpoint, &request).await {
            Ok(updated) => log::info!("task updated: {updated}"),
            Err(e) => log::error!("error updating task {}: {e}", request.task_id),
        }
    });
}
