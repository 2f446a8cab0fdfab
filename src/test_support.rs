//! Scripted transport shared by the unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::Method;
use serde_json::{json, Value};

use crate::error::StorageError;
use crate::transport::{ApiRequest, ApiResponse, Transport};

#[derive(Clone)]
enum Scripted {
    Response(ApiResponse),
    Disconnect(String),
}

/// Replays queued responses per `METHOD path`. The last queued entry of a route
/// repeats forever; unknown routes answer 404.
#[derive(Default)]
pub(crate) struct MockTransport {
    routes: Mutex<HashMap<String, VecDeque<Scripted>>>,
    calls: Mutex<Vec<ApiRequest>>,
}

fn route_key(method: &Method, path: &str) -> String {
    format!("{} {}", method, path.trim_start_matches('/'))
}

impl MockTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn push(&self, method: Method, path: &str, entry: Scripted) {
        self.routes
            .lock()
            .expect("routes lock")
            .entry(route_key(&method, path))
            .or_default()
            .push_back(entry);
    }

    pub(crate) fn respond(&self, method: Method, path: &str, status: u16, body: Value) -> &Self {
        self.push(
            method,
            path,
            Scripted::Response(ApiResponse::new(status, body.to_string())),
        );
        self
    }

    pub(crate) fn disconnect(&self, method: Method, path: &str, reason: &str) -> &Self {
        self.push(method, path, Scripted::Disconnect(reason.to_string()));
        self
    }

    /// Queues one `GET jobs/{id}` snapshot per status, in order.
    pub(crate) fn job_statuses(&self, id: u64, statuses: &[&str]) -> &Self {
        for status in statuses {
            self.respond(
                Method::GET,
                &format!("jobs/{id}"),
                200,
                json!({"id": id, "status": status, "operationName": "tableImport"}),
            );
        }
        self
    }

    pub(crate) fn calls(&self) -> Vec<ApiRequest> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub(crate) fn call_count(&self, method: Method, path: &str) -> usize {
        let key = route_key(&method, path);
        self.calls()
            .iter()
            .filter(|req| route_key(&req.method, &req.path) == key)
            .count()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, StorageError> {
        self.calls.lock().expect("calls lock").push(request.clone());

        let next = {
            let mut routes = self.routes.lock().expect("routes lock");
            routes
                .get_mut(&route_key(&request.method, &request.path))
                .and_then(|queue| {
                    if queue.len() > 1 {
                        queue.pop_front()
                    } else {
                        queue.front().cloned()
                    }
                })
        };

        match next {
            Some(Scripted::Response(resp)) => Ok(resp),
            Some(Scripted::Disconnect(reason)) => Err(StorageError::HttpError(reason)),
            None => Ok(ApiResponse::new(
                404,
                json!({"error": format!("No route for {}", request.path), "code": "mock.notFound"})
                    .to_string(),
            )),
        }
    }
}
