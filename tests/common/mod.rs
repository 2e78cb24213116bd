//! In-process transport double for client integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use drupal_fetch::clients::{HttpError, HttpRequest, HttpResponse, Transport};
use drupal_fetch::DrupalConfig;
use serde_json::{json, Value};

pub const BASE_URL: &str = "https://cms.example.com";

#[derive(Clone, Debug)]
struct Route {
    status: u16,
    body: String,
    delay: Option<Duration>,
}

/// Canned responses keyed by URL path. Unknown paths answer `404`.
#[derive(Debug, Default)]
pub struct MockTransport {
    routes: HashMap<String, Route>,
    requests: Mutex<Vec<HttpRequest>>,
    completed: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers `path` with `status` and a JSON body.
    pub fn route_json(self, path: &str, status: u16, body: &Value) -> Self {
        self.route_raw(path, status, &body.to_string())
    }

    /// Answers `path` with `status` and a raw body.
    pub fn route_raw(mut self, path: &str, status: u16, body: &str) -> Self {
        self.routes.insert(
            path.to_string(),
            Route {
                status,
                body: body.to_string(),
                delay: None,
            },
        );
        self
    }

    /// Delays the answer for `path`.
    pub fn delay(mut self, path: &str, delay: Duration) -> Self {
        if let Some(route) = self.routes.get_mut(path) {
            route.delay = Some(delay);
        }
        self
    }

    /// Serves a JSON:API index listing `types` under `/jsonapi/<entity>/<bundle>`.
    pub fn with_index(self, types: &[&str]) -> Self {
        let mut links = serde_json::Map::new();
        links.insert("self".into(), json!({"href": format!("{BASE_URL}/jsonapi")}));
        for resource_type in types {
            let (entity, bundle) = resource_type.split_once("--").unwrap_or((*resource_type, ""));
            links.insert(
                (*resource_type).to_string(),
                json!({"href": format!("{BASE_URL}/jsonapi/{entity}/{bundle}")}),
            );
        }
        self.route_json("/jsonapi", 200, &json!({"jsonapi": {"version": "1.0"}, "links": links}))
    }

    /// All requests received so far, in arrival order.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Paths of requests with `path`, in arrival order.
    pub fn requests_to(&self, path: &str) -> Vec<HttpRequest> {
        self.requests()
            .into_iter()
            .filter(|request| request.url.path() == path)
            .collect()
    }

    /// Paths in the order their responses completed.
    pub fn completed(&self) -> Vec<String> {
        self.completed.lock().unwrap().clone()
    }

    /// Highest number of requests that were in flight at once.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        let path = request.url.path().to_string();
        let route = self.routes.get(&path).cloned();
        self.requests.lock().unwrap().push(request);

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if let Some(delay) = route.as_ref().and_then(|route| route.delay) {
            tokio::time::sleep(delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.completed.lock().unwrap().push(path);

        Ok(match route {
            Some(route) => HttpResponse::new(route.status, HashMap::new(), route.body),
            None => HttpResponse::new(404, HashMap::new(), ""),
        })
    }
}

pub fn config() -> DrupalConfig {
    DrupalConfig::from_base_url(BASE_URL).unwrap()
}

/// A `path`-only collection document with the given aliases.
pub fn alias_collection(resource_type: &str, aliases: &[Option<&str>]) -> Value {
    let data: Vec<Value> = aliases
        .iter()
        .enumerate()
        .map(|(index, alias)| {
            let path = alias.map_or(Value::Null, |alias| {
                json!({"alias": alias, "pid": index, "langcode": "en"})
            });
            json!({
                "type": resource_type,
                "id": format!("{resource_type}-{index}"),
                "attributes": {"path": path}
            })
        })
        .collect();
    json!({"data": data})
}
