//! Client-side state for a remote todo list.
//!
//! # Overview
//! Three layers, leaf first:
//! - `client` / `api`: the remote resource client. `TodoClient` builds
//!   `HttpRequest` values and parses `HttpResponse` values without touching
//!   the network; `HttpTodoApi` runs them through an `HttpTransport`.
//! - `store`: `TodoStore`, the local copy of the collection, mutated only
//!   after the server confirms each write.
//! - `view`: a pure filtered, searched and sorted projection of the store's
//!   items for presentation.
//!
//! # Design
//! - `TodoClient` is stateless; it holds only `base_url`.
//! - The store depends on the `TodoApi` trait, so tests substitute an
//!   in-memory implementation.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod store;
pub mod transport;
pub mod types;
pub mod view;

pub use api::{HttpTodoApi, TodoApi};
pub use client::TodoClient;
pub use config::Config;
pub use error::{ApiError, ErrorKind, Operation, StoreError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};
pub use store::TodoStore;
pub use transport::UreqTransport;
pub use types::{CreateTodo, Todo, TodoItem, UpdateTodo, UNTITLED};
pub use view::{project, Filter, SortBy, SortOrder, ViewParams};
