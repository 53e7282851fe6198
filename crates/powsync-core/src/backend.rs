//! Backend capability
//!
//! The only thing the store needs from the outside world: JSON requests
//! against the REST API, addressed by path relative to the base URL.

use crate::error::SyncError;
use async_trait::async_trait;
use serde_json::Value;

/// JSON-over-HTTP access to the backend
///
/// Implementations attach authentication and map every failure onto
/// [`SyncError`]. An empty success body is returned as [`Value::Null`].
#[async_trait]
pub trait Backend: Send + Sync {
    /// `GET path`
    async fn get(&self, path: &str) -> Result<Value, SyncError>;

    /// `POST path` with a JSON body
    async fn post(&self, path: &str, body: Value) -> Result<Value, SyncError>;

    /// `DELETE path`
    async fn delete(&self, path: &str) -> Result<Value, SyncError>;
}

#[async_trait]
impl<B: Backend + ?Sized> Backend for std::sync::Arc<B> {
    async fn get(&self, path: &str) -> Result<Value, SyncError> {
        (**self).get(path).await
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value, SyncError> {
        (**self).post(path, body).await
    }

    async fn delete(&self, path: &str) -> Result<Value, SyncError> {
        (**self).delete(path).await
    }
}
