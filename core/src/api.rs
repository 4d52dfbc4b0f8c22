//! Asynchronous remote resource client.
//!
//! # Design
//! `TodoApi` is the seam the store depends on: four single-shot calls, no
//! retries. `HttpTodoApi` is the production implementation and is nothing
//! more than `TodoClient::build_*` → `HttpTransport::execute` →
//! `TodoClient::parse_*`.

use async_trait::async_trait;
use tracing::debug;

use crate::client::TodoClient;
use crate::config::Config;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, HttpTransport};
use crate::transport::UreqTransport;
use crate::types::{CreateTodo, Todo};

/// Remote todo collection.
#[async_trait]
pub trait TodoApi: Send + Sync {
    async fn list(&self) -> Result<Vec<Todo>, ApiError>;

    /// Creates `{title, completed: false}`; the server assigns `id` and `createdAt`.
    async fn create(&self, title: &str) -> Result<Todo, ApiError>;

    async fn set_completed(&self, id: u64, completed: bool) -> Result<Todo, ApiError>;

    async fn delete(&self, id: u64) -> Result<(), ApiError>;
}

/// `TodoApi` over HTTP/JSON.
#[derive(Debug, Clone)]
pub struct HttpTodoApi<T> {
    client: TodoClient,
    transport: T,
}

impl<T: HttpTransport> HttpTodoApi<T> {
    pub fn new(client: TodoClient, transport: T) -> Self {
        Self { client, transport }
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = ?request.method, path = %request.path, "dispatching request");
        let response = self.transport.execute(request).await?;
        debug!(status = response.status, "received response");
        Ok(response)
    }
}

impl HttpTodoApi<UreqTransport> {
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.client(), UreqTransport::new())
    }
}

#[async_trait]
impl<T: HttpTransport> TodoApi for HttpTodoApi<T> {
    async fn list(&self) -> Result<Vec<Todo>, ApiError> {
        let response = self.send(self.client.build_list_todos()).await?;
        self.client.parse_list_todos(response)
    }

    async fn create(&self, title: &str) -> Result<Todo, ApiError> {
        let input = CreateTodo {
            title: title.to_string(),
            completed: false,
        };
        let request = self.client.build_create_todo(&input)?;
        let response = self.send(request).await?;
        self.client.parse_create_todo(response)
    }

    async fn set_completed(&self, id: u64, completed: bool) -> Result<Todo, ApiError> {
        let request = self.client.build_set_completed(id, completed)?;
        let response = self.send(request).await?;
        self.client.parse_update_todo(response)
    }

    async fn delete(&self, id: u64) -> Result<(), ApiError> {
        let response = self.send(self.client.build_delete_todo(id)).await?;
        self.client.parse_delete_todo(response)
    }
}
