//! In-memory transport for unit tests

use crate::crawler::fetcher::{HttpResponse, Transport, TransportError};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, ACCEPT_LANGUAGE, USER_AGENT};
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Debug, Clone)]
enum Canned {
    Response { status: u16, body: Vec<u8> },
    Fail(TransportError),
}

/// A request as seen by the stub
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub url: String,
    pub accept_language: Option<String>,
    pub user_agent: Option<String>,
}

/// Serves canned responses by exact URL; unknown URLs get a 404
#[derive(Debug, Default)]
pub struct StubTransport {
    routes: HashMap<String, Canned>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_body(self, url: &str, body: &str) -> Self {
        self.with_bytes(url, body.as_bytes().to_vec())
    }

    pub fn with_bytes(mut self, url: &str, body: Vec<u8>) -> Self {
        self.routes
            .insert(url.to_string(), Canned::Response { status: 200, body });
        self
    }

    pub fn with_status(mut self, url: &str, status: u16) -> Self {
        self.routes.insert(
            url.to_string(),
            Canned::Response {
                status,
                body: Vec::new(),
            },
        );
        self
    }

    pub fn with_timeout(mut self, url: &str) -> Self {
        self.routes
            .insert(url.to_string(), Canned::Fail(TransportError::Timeout));
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self, url: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.url == url)
            .count()
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn get(&self, url: &str, headers: HeaderMap) -> Result<HttpResponse, TransportError> {
        let header = |name: HeaderName| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        self.requests.lock().unwrap().push(RecordedRequest {
            url: url.to_string(),
            accept_language: header(ACCEPT_LANGUAGE),
            user_agent: header(USER_AGENT),
        });

        match self.routes.get(url) {
            Some(Canned::Response { status, body }) => Ok(HttpResponse {
                status: *status,
                headers: HeaderMap::new(),
                body: body.clone(),
            }),
            Some(Canned::Fail(e)) => Err(e.clone()),
            None => Ok(HttpResponse {
                status: 404,
                headers: HeaderMap::new(),
                body: Vec::new(),
            }),
        }
    }
}
