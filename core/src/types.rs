//! Domain DTOs for the todo API.
//!
//! # Design
//! `Todo` is the wire shape and is deliberately lenient: servers may omit
//! `title`, `completed` or `createdAt`, so each decodes as `None`.
//! `TodoItem` is what the store holds after sanitization, with every field
//! present. The wire types
//! mirror the mock-server's schema but are defined independently; integration
//! tests catch any schema drift between the two crates.

use serde::{Deserialize, Serialize};

/// Display title substituted when neither the server nor the caller supplies one.
pub const UNTITLED: &str = "Untitled";

/// A single todo as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Todo {
    /// Convert a server response into a store item.
    ///
    /// A blank or missing title falls back to `fallback`, then to [`UNTITLED`].
    /// A missing `completed` reads as `false` and a missing `createdAt` as the
    /// empty string.
    pub fn sanitize(self, fallback: Option<&str>) -> TodoItem {
        let title = self
            .title
            .filter(|t| !t.trim().is_empty())
            .or_else(|| fallback.filter(|t| !t.trim().is_empty()).map(str::to_string))
            .unwrap_or_else(|| UNTITLED.to_string());
        TodoItem {
            id: self.id,
            title,
            completed: self.completed.unwrap_or(false),
            created_at: self.created_at.unwrap_or_default(),
        }
    }
}

/// A sanitized todo held by `TodoStore`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    pub id: u64,
    pub title: String,
    pub completed: bool,
    pub created_at: String,
}

/// Request payload for creating a new todo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTodo {
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

/// Request payload for updating an existing todo. Only the fields present in
/// the JSON are applied; omitted fields remain unchanged on the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTodo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}
