// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test utilities for mocking Kubernetes API responses.

use crate::types::credentials::{render_repositories, CredentialEntry, SshPrivateKeySecret};
use http::{Request, Response};
use http_body_util::BodyExt;
use kube::client::Body;
use kube::Client;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tower::Service;

/// A mock HTTP service with sequenced responses per (method, path) and a
/// log of every request it served.
#[derive(Clone)]
pub struct MockService {
    responses: Arc<Mutex<HashMap<(String, String), VecDeque<(u16, String)>>>>,
    requests: Arc<Mutex<Vec<(String, String, String)>>>,
}

impl MockService {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue a response for GET requests matching the exact path.
    /// Repeated calls for the same path answer in queue order; the last
    /// queued response repeats once the queue is drained.
    pub fn on_get(self, path: &str, status: u16, body: &str) -> Self {
        self.queue("GET", path, status, body)
    }

    /// Queue a response for POST requests matching the exact path
    pub fn on_post(self, path: &str, status: u16, body: &str) -> Self {
        self.queue("POST", path, status, body)
    }

    /// Queue a response for PUT requests matching the exact path
    pub fn on_put(self, path: &str, status: u16, body: &str) -> Self {
        self.queue("PUT", path, status, body)
    }

    fn queue(self, method: &str, path: &str, status: u16, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .entry((method.to_string(), path.to_string()))
            .or_default()
            .push_back((status, body.to_string()));
        self
    }

    /// Build a kube Client from this mock service
    pub fn into_client(self) -> Client {
        Client::new(self, "argo-cd")
    }

    /// Number of served requests with this method and exact path
    pub fn requests_matching(&self, method: &str, path: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|(m, p, _)| m == method && p == path)
            .count()
    }

    /// Body of the most recent request with this method and exact path
    pub fn last_request_body(&self, method: &str, path: &str) -> Option<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(m, p, _)| m == method && p == path)
            .map(|(_, _, body)| body.clone())
    }

    fn next_response(&self, method: &str, path: &str) -> Option<(u16, String)> {
        let mut responses = self.responses.lock().unwrap();

        if let Some(queue) = responses.get_mut(&(method.to_string(), path.to_string())) {
            if queue.len() > 1 {
                return queue.pop_front();
            }
            return queue.front().cloned();
        }

        // Prefix match for paths like /api/v1/namespaces/foo
        for ((m, p), queue) in responses.iter_mut() {
            if m == method && path.starts_with(p.as_str()) {
                if queue.len() > 1 {
                    return queue.pop_front();
                }
                return queue.front().cloned();
            }
        }

        None
    }
}

impl Default for MockService {
    fn default() -> Self {
        Self::new()
    }
}

impl Service<Request<Body>> for MockService {
    type Response = Response<Body>;
    type Error = tower::BoxError;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let method = req.method().to_string();
        let path = req.uri().path().to_string();

        let response = self.next_response(&method, &path);
        let requests = self.requests.clone();

        Box::pin(async move {
            let body_bytes = req.into_body().collect().await?.to_bytes();
            requests.lock().unwrap().push((
                method,
                path,
                String::from_utf8_lossy(&body_bytes).to_string(),
            ));

            match response {
                Some((status, body)) => Ok(Response::builder()
                    .status(status)
                    .header("content-type", "application/json")
                    .body(Body::from(body.into_bytes()))
                    .unwrap()),
                None => {
                    // Default 404 for unmatched requests
                    let body = r#"{"kind":"Status","apiVersion":"v1","status":"Failure","message":"not found","reason":"NotFound","code":404}"#;
                    Ok(Response::builder()
                        .status(404)
                        .header("content-type", "application/json")
                        .body(Body::from(body.as_bytes().to_vec()))
                        .unwrap())
                }
            }
        })
    }
}

/// Path of the Application collection in the argo-cd namespace
pub fn applications_path() -> String {
    "/apis/argoproj.io/v1alpha1/namespaces/argo-cd/applications".to_string()
}

/// Path of the argocd-cm ConfigMap in the argo-cd namespace
pub fn config_map_path() -> String {
    "/api/v1/namespaces/argo-cd/configmaps/argocd-cm".to_string()
}

/// A credential entry fixture matching the wire defaults
pub fn make_entry(name: &str) -> CredentialEntry {
    CredentialEntry {
        name: name.to_string(),
        ssh_private_key_secret: SshPrivateKeySecret {
            key: "sshPrivateKey".to_string(),
            name: "argocd-ssh-key".to_string(),
        },
        repo_type: "git".to_string(),
        url: format!("git@gitlab.example.com:group/{name}.git"),
    }
}

/// Create a single Application JSON response
pub fn application_json(name: &str, repo_url: &str) -> String {
    serde_json::json!({
        "apiVersion": "argoproj.io/v1alpha1",
        "kind": "Application",
        "metadata": {
            "name": name,
            "namespace": "argo-cd",
            "uid": "test-uid",
            "resourceVersion": "1"
        },
        "spec": {
            "destination": {
                "namespace": "anarchy-operator",
                "server": "https://kubernetes.default.svc"
            },
            "source": {
                "path": "objects/ocp-init",
                "repoURL": repo_url,
                "targetRevision": "HEAD"
            },
            "project": "default"
        }
    })
    .to_string()
}

/// Create an ApplicationList JSON response, optionally carrying a
/// continue token for a following page
pub fn application_list_json(names: &[&str], continue_token: Option<&str>) -> String {
    let items: Vec<serde_json::Value> = names
        .iter()
        .map(|name| {
            serde_json::from_str(&application_json(
                name,
                &format!("git@gitlab.example.com:group/{name}.git"),
            ))
            .unwrap()
        })
        .collect();

    let mut metadata = serde_json::json!({ "resourceVersion": "1" });
    if let Some(token) = continue_token {
        metadata["continue"] = serde_json::Value::String(token.to_string());
    }

    serde_json::json!({
        "apiVersion": "argoproj.io/v1alpha1",
        "kind": "ApplicationList",
        "metadata": metadata,
        "items": items
    })
    .to_string()
}

/// Create an argocd-cm ConfigMap JSON response. An empty entry slice
/// yields a ConfigMap without the repositories key.
pub fn config_map_json(resource_version: &str, entries: &[CredentialEntry]) -> String {
    let mut config_map = serde_json::json!({
        "apiVersion": "v1",
        "kind": "ConfigMap",
        "metadata": {
            "name": "argocd-cm",
            "namespace": "argo-cd",
            "uid": "test-uid",
            "resourceVersion": resource_version
        }
    });

    if !entries.is_empty() {
        config_map["data"] = serde_json::json!({
            "repositories": render_repositories(entries).unwrap()
        });
    }

    config_map.to_string()
}

/// Create a 409 conflict response
pub fn conflict_json(name: &str) -> String {
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "status": "Failure",
        "message": format!("\"{}\" already exists or was modified", name),
        "reason": "Conflict",
        "code": 409
    })
    .to_string()
}

/// Create a 500 internal error response
pub fn server_error_json() -> String {
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "status": "Failure",
        "message": "internal error",
        "reason": "InternalError",
        "code": 500
    })
    .to_string()
}
