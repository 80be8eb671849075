//! In-process mock backend shared by the integration tests.
//!
//! Every request is recorded and answered with one canned response, so a test
//! can assert both what the client sent and how it handled the reply.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, HeaderValue, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use report_api::{ApiConfig, ReportApiClient};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::Mutex;

/// A request as the mock backend saw it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    /// Raw request path, still percent-encoded.
    pub path: String,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl RecordedRequest {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("request body is not JSON")
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[derive(Clone)]
struct Canned {
    status: StatusCode,
    content_type: Option<&'static str>,
    body: String,
}

#[derive(Clone)]
struct MockState {
    canned: Canned,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

pub struct MockBackend {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockBackend {
    /// Answers every request with `status` and a JSON body.
    pub async fn json(status: u16, body: Value) -> Self {
        Self::start(Canned {
            status: StatusCode::from_u16(status).unwrap(),
            content_type: Some("application/json"),
            body: body.to_string(),
        })
        .await
    }

    /// Answers every request with `status` and a plain-text body.
    pub async fn text(status: u16, body: &str) -> Self {
        Self::start(Canned {
            status: StatusCode::from_u16(status).unwrap(),
            content_type: Some("text/plain; charset=utf-8"),
            body: body.to_string(),
        })
        .await
    }

    /// Answers every request with `status` and no body.
    pub async fn empty(status: u16) -> Self {
        Self::start(Canned {
            status: StatusCode::from_u16(status).unwrap(),
            content_type: None,
            body: String::new(),
        })
        .await
    }

    async fn start(canned: Canned) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            canned,
            requests: requests.clone(),
        };
        let app = Router::new().fallback(record).with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, requests }
    }

    /// A client whose base URL points at this backend's `/api` root.
    pub fn client(&self) -> ReportApiClient {
        ReportApiClient::new(ApiConfig::new(format!("http://{}/api", self.addr)))
    }

    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().await.clone()
    }

    /// Asserts exactly one request was made and returns it.
    pub async fn single_request(&self) -> RecordedRequest {
        let mut requests = self.requests().await;
        assert_eq!(requests.len(), 1, "expected exactly one request");
        requests.remove(0)
    }
}

async fn record(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    state.requests.lock().await.push(RecordedRequest {
        method,
        path: uri.path().to_string(),
        content_type,
        body,
    });

    let canned = state.canned;
    let mut response = (canned.status, canned.body).into_response();
    match canned.content_type {
        Some(ct) => {
            response
                .headers_mut()
                .insert(header::CONTENT_TYPE, HeaderValue::from_static(ct));
        }
        None => {
            response.headers_mut().remove(header::CONTENT_TYPE);
        }
    }
    response
}

/// A report body shaped like the backend's.
pub fn report_json(id: &str, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "type": "open_report",
        "content": "Body text",
        "sources": ["https://example.com/a"],
        "create_time": "2025-03-01T08:30:00.123456+00:00",
        "update_time": "2025-03-01T08:30:00.123456+00:00"
    })
}

/// A report whose timestamps carry no UTC offset, as a naive `datetime`
/// column serializes them.
pub fn report_json_without_offset(id: &str, title: &str) -> Value {
    let mut report = report_json(id, title);
    report["create_time"] = json!("2025-03-01T08:30:00.123456");
    report["update_time"] = json!("2025-03-02T09:00:00");
    report
}
