//! Todo HTTP API
//!
//! This crate provides the request-handling layer of the todo service: an
//! axum router exposing CRUD endpoints over a [`todo_core::TodoService`].
//!
//! # Overview
//!
//! - `POST /api/v1/todos`, `GET /api/v1/todos?completed=<bool>`
//! - `GET | PATCH | DELETE /api/v1/todos/:id`
//! - `GET /health`
//! - Error mapping from domain errors to status codes and the
//!   `{"success": false, "message": ...}` body
//! - `x-request-id` propagation and per-request logging
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use todo_api::TodoServer;
//!
//! async fn start_server<R: todo_core::TodoRepository + 'static>(
//!     repository: Arc<R>,
//! ) -> std::io::Result<()> {
//!     let shutdown = async {
//!         let _ = tokio::signal::ctrl_c().await;
//!     };
//!     TodoServer::new(repository)
//!         .serve("127.0.0.1:3000", shutdown)
//!         .await
//! }
//! ```

pub mod error;
pub mod handler;
pub mod request_logger;
pub mod serialization;
pub mod server;

// Re-export key types for easier usage
pub use error::*;
pub use handler::AppState;
pub use request_logger::REQUEST_ID_HEADER;
pub use serialization::*;
pub use server::TodoServer;
