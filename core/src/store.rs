//! Local copy of the todo collection, written only through the remote API.
//!
//! # Design
//! `TodoStore` owns its state and its `TodoApi`; there is no global instance.
//! State sits behind a `parking_lot::Mutex` that is never held across an
//! `.await`, so every operation takes `&self` and several may be in flight at
//! once (for example under `tokio::join!`).
//!
//! Local state changes only after the server answers. Nothing is applied
//! optimistically, so a failed call leaves `items` exactly as it was.
//!
//! Failures are logged and recorded as the store's last error; they are never
//! returned as `Err`. Callers see them through `error()` and through the
//! `None`/`false` return of the operation.
//!
//! `toggle` and `delete` reserve their id for the duration of the network
//! call. A second reserving operation on the same id is rejected with
//! `StoreError::Busy` instead of racing the first one.

use std::collections::HashMap;

use parking_lot::Mutex;
use tracing::{debug, error, warn};

use crate::api::TodoApi;
use crate::error::{Operation, StoreError};
use crate::types::TodoItem;
use crate::view::{SortBy, SortOrder};

#[derive(Debug, Default)]
struct State {
    items: Vec<TodoItem>,
    loads_in_flight: usize,
    error: Option<StoreError>,
    pending: HashMap<u64, Operation>,
}

#[derive(Debug)]
pub struct TodoStore<A> {
    api: A,
    state: Mutex<State>,
}

impl<A: TodoApi> TodoStore<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: Mutex::new(State::default()),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Snapshot of the collection in insertion/load order.
    pub fn items(&self) -> Vec<TodoItem> {
        self.state.lock().items.clone()
    }

    pub fn get(&self, id: u64) -> Option<TodoItem> {
        self.state.lock().items.iter().find(|item| item.id == id).cloned()
    }

    pub fn is_loading(&self) -> bool {
        self.state.lock().loads_in_flight > 0
    }

    pub fn error(&self) -> Option<StoreError> {
        self.state.lock().error.clone()
    }

    pub fn clear_error(&self) {
        self.state.lock().error = None;
    }

    /// Whether a toggle or delete for `id` is awaiting the server.
    pub fn is_pending(&self, id: u64) -> bool {
        self.state.lock().pending.contains_key(&id)
    }

    /// Replace the collection with the server's. On failure the previous
    /// items are kept. Returns whether the load succeeded.
    pub async fn load(&self) -> bool {
        let _loading = LoadingGuard::acquire(&self.state);
        self.state.lock().error = None;

        match self.api.list().await {
            Ok(todos) => {
                let items: Vec<TodoItem> = todos.into_iter().map(|todo| todo.sanitize(None)).collect();
                debug!(count = items.len(), "loaded todos");
                self.state.lock().items = items;
                true
            }
            Err(source) => {
                self.record(StoreError::Load(source));
                false
            }
        }
    }

    /// Create a todo from `title`, trimmed. Blank titles are ignored without
    /// a network call.
    pub async fn add(&self, title: &str) -> Option<TodoItem> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }

        match self.api.create(title).await {
            Ok(todo) => {
                let item = todo.sanitize(Some(title));
                self.insert(item.clone());
                debug!(id = item.id, "added todo");
                Some(item)
            }
            Err(source) => {
                self.record(StoreError::Add(source));
                None
            }
        }
    }

    /// Flip `completed` on the server and adopt its answer. The local title
    /// is kept since the server need not echo it; a reply without `completed`
    /// reads as the requested value. Unknown ids are a no-op.
    pub async fn toggle(&self, id: u64) -> Option<TodoItem> {
        let current = self.get(id)?;
        let _pending = match self.reserve(id, Operation::Toggle) {
            Ok(guard) => guard,
            Err(err) => {
                self.record(err);
                return None;
            }
        };

        let requested = !current.completed;
        match self.api.set_completed(id, requested).await {
            Ok(todo) => {
                let completed = todo.completed.unwrap_or(requested);
                let mut item = todo.sanitize(Some(&current.title));
                item.id = id;
                item.title = current.title;
                item.completed = completed;
                if item.created_at.is_empty() {
                    item.created_at = current.created_at;
                }

                let replaced = {
                    let mut state = self.state.lock();
                    match state.items.iter_mut().find(|existing| existing.id == id) {
                        Some(slot) => {
                            *slot = item.clone();
                            true
                        }
                        None => false,
                    }
                };
                if !replaced {
                    debug!(id, "todo left the collection while toggle was in flight");
                    return None;
                }
                Some(item)
            }
            Err(source) => {
                self.record(StoreError::Toggle { id, source });
                None
            }
        }
    }

    /// Delete on the server, then locally. Returns whether the server
    /// confirmed the deletion.
    pub async fn delete(&self, id: u64) -> bool {
        let _pending = match self.reserve(id, Operation::Delete) {
            Ok(guard) => guard,
            Err(err) => {
                self.record(err);
                return false;
            }
        };

        match self.api.delete(id).await {
            Ok(()) => {
                self.state.lock().items.retain(|item| item.id != id);
                debug!(id, "deleted todo");
                true
            }
            Err(source) => {
                self.record(StoreError::Delete { id, source });
                false
            }
        }
    }

    /// Reorder the local collection by title. No network call.
    pub fn sort(&self, order: SortOrder) {
        self.sort_by(SortBy::Title, order);
    }

    /// Reorder the local collection. Stable. No network call.
    pub fn sort_by(&self, key: SortBy, order: SortOrder) {
        self.state
            .lock()
            .items
            .sort_by(|a, b| order.apply(key.compare(a, b)));
    }

    fn insert(&self, item: TodoItem) {
        let mut state = self.state.lock();
        if let Some(slot) = state.items.iter_mut().find(|existing| existing.id == item.id) {
            warn!(id = item.id, "server returned an id already in the collection; replacing");
            *slot = item;
        } else {
            state.items.push(item);
        }
    }

    fn record(&self, err: StoreError) {
        match &err {
            StoreError::Busy { .. } => warn!(kind = ?err.kind(), "{err}"),
            _ => error!(kind = ?err.kind(), "{err}"),
        }
        self.state.lock().error = Some(err);
    }

    fn reserve(&self, id: u64, op: Operation) -> Result<PendingGuard<'_>, StoreError> {
        let mut state = self.state.lock();
        if let Some(&in_flight) = state.pending.get(&id) {
            return Err(StoreError::Busy { op, id, in_flight });
        }
        state.pending.insert(id, op);
        Ok(PendingGuard {
            state: &self.state,
            id,
        })
    }
}

/// Holds the loading flag up while alive, including when the owning future
/// is dropped mid-call.
struct LoadingGuard<'a> {
    state: &'a Mutex<State>,
}

impl<'a> LoadingGuard<'a> {
    fn acquire(state: &'a Mutex<State>) -> Self {
        state.lock().loads_in_flight += 1;
        Self { state }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.state.lock();
        state.loads_in_flight = state.loads_in_flight.saturating_sub(1);
    }
}

/// In-flight reservation for one id.
struct PendingGuard<'a> {
    state: &'a Mutex<State>,
    id: u64,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.state.lock().pending.remove(&self.id);
    }
}
