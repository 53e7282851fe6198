//! Testing utilities for the powsync workspace
//!
//! Shared fixtures and a scripted in-memory [`Backend`].

#![allow(missing_docs)]

use async_trait::async_trait;
use parking_lot::Mutex;
use powsync_core::{AssignmentPayload, Backend, Route, Station, SyncError, Team, User};
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::Notify;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Delete,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

#[derive(Debug, Clone)]
struct Scripted {
    response: Result<Value, SyncError>,
    gate: Option<Arc<Notify>>,
}

/// Backend answering from scripted responses and recording every request
///
/// One-shot responses queued with [`FakeBackend::respond_once`] are used
/// first, then the sticky response set with [`FakeBackend::respond`].
/// Unscripted requests fail with a 404 status error.
#[derive(Debug, Default)]
pub struct FakeBackend {
    once: Mutex<HashMap<(Method, String), VecDeque<Scripted>>>,
    sticky: Mutex<HashMap<(Method, String), Result<Value, SyncError>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend serving `world` on every refresh endpoint
    pub fn with_world(world: &World) -> Self {
        let backend = Self::new();
        backend.serve_world(world);
        backend
    }

    pub fn respond(&self, method: Method, path: &str, response: Result<Value, SyncError>) {
        self.sticky.lock().insert((method, path.to_string()), response);
    }

    pub fn respond_once(&self, method: Method, path: &str, response: Result<Value, SyncError>) {
        self.push_once(method, path, Scripted { response, gate: None });
    }

    /// One-shot response held back until `gate` is notified
    pub fn respond_once_after(
        &self,
        method: Method,
        path: &str,
        response: Result<Value, SyncError>,
        gate: Arc<Notify>,
    ) {
        self.push_once(
            method,
            path,
            Scripted {
                response,
                gate: Some(gate),
            },
        );
    }

    /// Script the five refresh endpoints from `world`
    pub fn serve_world(&self, world: &World) {
        self.respond(Method::Get, "/user", Ok(listing(&world.users)));
        self.respond(Method::Get, "/team", Ok(listing(&world.teams)));
        self.respond(Method::Get, "/route", Ok(listing(&world.routes)));
        self.respond(Method::Get, "/station", Ok(listing(&world.stations)));
        self.respond(Method::Get, "/assignments", Ok(to_value(&world.assignments)));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }

    pub fn count(&self, method: Method, path: &str) -> usize {
        self.requests
            .lock()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    pub fn last_body(&self, method: Method, path: &str) -> Option<Value> {
        self.requests
            .lock()
            .iter()
            .rev()
            .find(|r| r.method == method && r.path == path)
            .and_then(|r| r.body.clone())
    }

    pub fn clear_requests(&self) {
        self.requests.lock().clear();
    }

    fn push_once(&self, method: Method, path: &str, scripted: Scripted) {
        self.once
            .lock()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(scripted);
    }

    async fn answer(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value, SyncError> {
        self.requests.lock().push(RecordedRequest {
            method,
            path: path.to_string(),
            body,
        });

        let key = (method, path.to_string());
        let scripted = self.once.lock().get_mut(&key).and_then(VecDeque::pop_front);

        if let Some(Scripted { response, gate }) = scripted {
            if let Some(gate) = gate {
                gate.notified().await;
            }
            return response;
        }

        let sticky = self.sticky.lock().get(&key).cloned();
        sticky.unwrap_or_else(|| {
            Err(SyncError::Status {
                status: 404,
                body: format!("no fake response for {method:?} {path}"),
            })
        })
    }
}

#[async_trait]
impl Backend for FakeBackend {
    async fn get(&self, path: &str) -> Result<Value, SyncError> {
        self.answer(Method::Get, path, None).await
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value, SyncError> {
        self.answer(Method::Post, path, Some(body)).await
    }

    async fn delete(&self, path: &str) -> Result<Value, SyncError> {
        self.answer(Method::Delete, path, None).await
    }
}

/// Complete server-side state for a refresh
#[derive(Debug, Clone, Default)]
pub struct World {
    pub users: Vec<User>,
    pub teams: Vec<Team>,
    pub routes: Vec<Route>,
    pub stations: Vec<Station>,
    pub assignments: AssignmentPayload,
}

/// Two routes, three teams, three stations; team A and station S1 on R1
pub fn sample_world() -> World {
    World {
        users: vec![User::new("admin").with_role("admin"), User::new("jane")],
        teams: vec![Team::new("A"), Team::new("B"), Team::new("C")],
        routes: vec![Route::new("R1").with_color("#f00"), Route::new("R2")],
        stations: vec![Station::new("S1"), Station::new("S2"), Station::new("S3")],
        assignments: AssignmentPayload::new()
            .with_team("R1", Team::new("A"))
            .with_station("R1", Station::new("S1")),
    }
}

pub fn listing<T: Serialize>(items: &[T]) -> Value {
    json!({ "items": to_value(&items) })
}

pub fn to_value<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

pub fn validation_error(field: &str, message: &str) -> SyncError {
    let mut fields = BTreeMap::new();
    fields.insert(field.to_string(), message.to_string());
    SyncError::Validation {
        status: 400,
        fields,
    }
}

pub fn transport_error() -> SyncError {
    SyncError::Transport("connection refused".to_string())
}

pub fn dashboard_rows(station: &str) -> Value {
    json!([
        {"team": "A", "state": "arrived", "score": 0, "updated": null, "station": station},
        {"team": "B", "state": "unknown", "score": 0, "updated": null, "station": station}
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn once_responses_precede_sticky() {
        let backend = FakeBackend::new();
        backend.respond(Method::Get, "/team", Ok(json!(1)));
        backend.respond_once(Method::Get, "/team", Ok(json!(0)));

        assert_eq!(backend.get("/team").await.unwrap(), json!(0));
        assert_eq!(backend.get("/team").await.unwrap(), json!(1));
        assert_eq!(backend.count(Method::Get, "/team"), 2);
    }

    #[tokio::test]
    async fn unscripted_request_is_404() {
        let backend = FakeBackend::new();
        let err = backend.delete("/team/X").await.unwrap_err();
        assert!(matches!(err, SyncError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn world_serves_listings() {
        let backend = FakeBackend::with_world(&sample_world());
        let teams = backend.get("/team").await.unwrap();
        assert_eq!(teams["items"][0]["name"], json!("A"));
    }
}
