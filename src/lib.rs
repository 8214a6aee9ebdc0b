//! Drag-and-drop controller for the server-rendered kanban board.
//!
//! This crate is compiled to WebAssembly and loaded by the board page. It
//! owns the client half of task reordering: binding drag handlers to task and
//! column elements, turning a drop into a `PUT /tasks/{id}` request, and
//! mirroring server push messages (`/events`) into the DOM. The page markup,
//! the task store, and the event-stream transport all live on the server.
//!
//! Every rule is written against the [`dom::Dom`] trait so it can be tested
//! without a browser. The `hydrate` feature adds [`host`], which implements
//! that trait over `web-sys` and wires real browser events to the controller.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`controller`] | Drag/drop handlers and push-message application |
//! | [`bind`] | Bind-once readiness state for controller initialization |
//! | [`dom`] | DOM and drag-payload traits the controller runs against |
//! | [`wire`] | Push messages and the task move request body |
//! | [`ids`] | `<prefix>-<key>` element id parsing |
//! | [`config`] | Class names, endpoints and timings, with page overrides |
//! | [`error`] | Controller error type |
//! | [`consts`] | Default selectors, endpoints and delays |
//! | `host` | Browser bindings (`hydrate` feature only) |

pub mod bind;
pub mod config;
pub mod consts;
pub mod controller;
pub mod dom;
pub mod error;
pub mod ids;
pub mod wire;

#[cfg(feature = "hydrate")]
pub mod host;

#[cfg(test)]
#[path = "dom_memory.rs"]
mod dom_memory;
