//! Error types for the todo API client and store.
//!
//! # Design
//! `ApiError` describes why a single HTTP call failed. Status codes are kept
//! for debugging but never branched on: every non-2xx response is a
//! `Server` error. `StoreError` records which store operation failed, with
//! the underlying cause, and is what `TodoStore::error` exposes.

use std::fmt;

use thiserror::Error;

/// Errors returned by `TodoClient` parse methods and `HttpTransport`s.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced a response (connection refused, DNS, I/O).
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Server { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

/// A store operation, used to tag errors and in-flight reservations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Load,
    Add,
    Toggle,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Load => "load",
            Operation::Add => "add",
            Operation::Toggle => "toggle",
            Operation::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// Coarse error category, one per store operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    LoadError,
    AddError,
    ToggleError,
    DeleteError,
}

impl From<Operation> for ErrorKind {
    fn from(op: Operation) -> Self {
        match op {
            Operation::Load => ErrorKind::LoadError,
            Operation::Add => ErrorKind::AddError,
            Operation::Toggle => ErrorKind::ToggleError,
            Operation::Delete => ErrorKind::DeleteError,
        }
    }
}

/// The last failure recorded by a `TodoStore`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("error loading todos: {0}")]
    Load(#[source] ApiError),

    #[error("error adding todo: {0}")]
    Add(#[source] ApiError),

    #[error("error updating todo {id}: {source}")]
    Toggle { id: u64, source: ApiError },

    #[error("error deleting todo {id}: {source}")]
    Delete { id: u64, source: ApiError },

    /// `op` was rejected because `in_flight` had not finished for the same id.
    #[error("cannot {op} todo {id}: {in_flight} still in flight")]
    Busy {
        op: Operation,
        id: u64,
        in_flight: Operation,
    },
}

impl StoreError {
    /// The operation that failed.
    pub fn operation(&self) -> Operation {
        match self {
            StoreError::Load(_) => Operation::Load,
            StoreError::Add(_) => Operation::Add,
            StoreError::Toggle { .. } => Operation::Toggle,
            StoreError::Delete { .. } => Operation::Delete,
            StoreError::Busy { op, .. } => *op,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.operation().into()
    }

    /// The API failure behind this error, if the request was issued at all.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            StoreError::Load(source) | StoreError::Add(source) => Some(source),
            StoreError::Toggle { source, .. } | StoreError::Delete { source, .. } => Some(source),
            StoreError::Busy { .. } => None,
        }
    }
}
