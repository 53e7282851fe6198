//! reqwest-backed [`Backend`]
//!
//! Sends JSON requests relative to the configured base URL and maps every
//! response onto the sync error taxonomy.

use crate::config::{ClientConfig, ConfigError};
use async_trait::async_trait;
use powsync_core::{Backend, SyncError};
use reqwest::{Client, Method, RequestBuilder};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::time::Duration;

/// HTTP access to the REST API
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpBackend {
    /// Create backend from configuration
    ///
    /// # Errors
    /// - `ConfigError` if the configuration is invalid or the client cannot
    ///   be built
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ConfigError::Http(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.bearer_token.clone(),
        })
    }

    /// Base URL requests are sent to
    #[inline]
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let request = self.client.request(method, format!("{}{path}", self.base_url));
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn execute(&self, request: RequestBuilder) -> Result<Value, SyncError> {
        let response = request
            .send()
            .await
            .map_err(|e| SyncError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| SyncError::Transport(e.to_string()))?;

        classify_response(status, &body)
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn get(&self, path: &str) -> Result<Value, SyncError> {
        tracing::debug!("GET {}", path);
        self.execute(self.request(Method::GET, path)).await
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value, SyncError> {
        tracing::debug!("POST {}", path);
        self.execute(self.request(Method::POST, path).json(&body))
            .await
    }

    async fn delete(&self, path: &str) -> Result<Value, SyncError> {
        tracing::debug!("DELETE {}", path);
        self.execute(self.request(Method::DELETE, path)).await
    }
}

/// Map a status code and raw body onto a result
///
/// - 2xx: the JSON body, or `Null` when empty
/// - 4xx with field-keyed messages: `Validation`
/// - anything else: `Status`
pub(crate) fn classify_response(status: u16, body: &str) -> Result<Value, SyncError> {
    if (200..300).contains(&status) {
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        return serde_json::from_str(body).map_err(SyncError::from);
    }

    if (400..500).contains(&status) {
        if let Ok(value) = serde_json::from_str::<Value>(body) {
            let fields = field_errors(&value);
            if !fields.is_empty() {
                return Err(SyncError::Validation { status, fields });
            }
        }
    }

    Err(SyncError::Status {
        status,
        body: body.to_string(),
    })
}

/// Extract field -> message pairs from an error body
///
/// Understands flat objects (`{"name": "required"}`, first entry of array
/// values), FastAPI-style `{"detail": [{"loc": [..], "msg": ..}]}` and the
/// Flask-RESTful `{"message": {...}}` envelope. A plain-string `detail` or
/// `message` is a general error and carries no field information.
fn field_errors(value: &Value) -> BTreeMap<String, String> {
    let Some(object) = value.as_object() else {
        return BTreeMap::new();
    };

    if let Some(raw) = object.get("detail") {
        let mut fields = BTreeMap::new();
        for detail in raw.as_array().map(Vec::as_slice).unwrap_or_default() {
            let field = detail
                .get("loc")
                .and_then(Value::as_array)
                .and_then(|loc| loc.last())
                .map(|last| match last {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                });
            let message = detail.get("msg").and_then(Value::as_str);
            if let (Some(field), Some(message)) = (field, message) {
                fields.insert(field, message.to_string());
            }
        }
        return fields;
    }

    if let Some(raw) = object.get("message") {
        return raw.as_object().map(flat_fields).unwrap_or_default();
    }

    flat_fields(object)
}

fn flat_fields(object: &Map<String, Value>) -> BTreeMap<String, String> {
    let mut fields = BTreeMap::new();
    for (field, message) in object {
        let message = match message {
            Value::String(s) => Some(s.clone()),
            Value::Array(items) => items.first().and_then(Value::as_str).map(str::to_string),
            _ => None,
        };
        if let Some(message) = message {
            fields.insert(field.clone(), message);
        }
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_bodies() {
        assert_eq!(classify_response(200, r#"{"items": []}"#).unwrap(), json!({"items": []}));
        assert_eq!(classify_response(204, "").unwrap(), Value::Null);
        assert_eq!(classify_response(201, "  \n").unwrap(), Value::Null);
    }

    #[test]
    fn malformed_success_is_decode_error() {
        let err = classify_response(200, "<html>").unwrap_err();
        assert!(matches!(err, SyncError::Decode(_)));
    }

    #[test]
    fn flat_validation_body() {
        let err = classify_response(400, r#"{"name": "required", "order": ["not a number"]}"#)
            .unwrap_err();
        match err {
            SyncError::Validation { status, fields } => {
                assert_eq!(status, 400);
                assert_eq!(fields["name"], "required");
                assert_eq!(fields["order"], "not a number");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn fastapi_validation_body() {
        let body = r#"{"detail": [{"loc": ["body", "name"], "msg": "field required", "type": "missing"}]}"#;
        let err = classify_response(422, body).unwrap_err();
        assert_eq!(err.fields()["name"], "field required");
    }

    #[test]
    fn plain_client_error_is_status() {
        let err = classify_response(404, "Not Found").unwrap_err();
        assert!(matches!(err, SyncError::Status { status: 404, .. }));

        let err = classify_response(401, r#"{"detail": "Access denied"}"#).unwrap_err();
        assert!(matches!(err, SyncError::Status { status: 401, .. }));
    }

    #[test]
    fn message_envelope() {
        let err = classify_response(404, r#"{"message": "The requested URL was not found"}"#)
            .unwrap_err();
        assert!(matches!(err, SyncError::Status { status: 404, .. }));

        let err = classify_response(400, r#"{"message": {"name": "required"}}"#).unwrap_err();
        assert_eq!(err.fields()["name"], "required");
    }

    #[test]
    fn server_error_is_status() {
        let err = classify_response(500, r#"{"name": "boom"}"#).unwrap_err();
        assert!(matches!(err, SyncError::Status { status: 500, .. }));
    }

    #[test]
    fn backend_trims_trailing_slash() {
        let backend =
            HttpBackend::new(&ClientConfig::new().with_base_url("http://localhost:5000/")).unwrap();
        assert_eq!(backend.base_url(), "http://localhost:5000");
    }

    #[test]
    fn backend_rejects_invalid_config() {
        let result = HttpBackend::new(&ClientConfig::new().with_base_url("nope"));
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn unreachable_server_is_transport_error() {
        let config = ClientConfig::new()
            .with_base_url("http://127.0.0.1:1")
            .with_timeout_secs(2);
        let backend = HttpBackend::new(&config).unwrap();

        let err = backend.get("/team").await.unwrap_err();
        assert!(matches!(err, SyncError::Transport(_)));
    }
}
