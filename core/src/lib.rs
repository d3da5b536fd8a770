//! Client core for the todo service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern), keeps the local list state
//! a UI renders from, and renders that state as text.
//!
//! # Design
//! - `TodoClient` is stateless; it holds only `base_url`.
//! - Each operation is split into `build_*` and `parse_*`, so the I/O
//!   boundary is explicit and the host owns timeouts and transport errors.
//! - `TodoListState` changes only from confirmed server responses.
//! - DTOs are defined independently from the server crate; the live
//!   integration test catches schema drift.

pub mod client;
pub mod error;
pub mod http;
pub mod render;
pub mod state;
pub mod types;

pub use client::TodoClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, REQUEST_TIMEOUT};
pub use render::render;
pub use state::{validate_draft, DraftError, TodoListState, TodoStats};
pub use types::{CreateTodo, ErrorBody, Health, Todo, UpdateTodo};
