//! In-process HTTP responder for fetcher tests.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::extract::{Request, State};
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::Response;
use tokio::sync::oneshot;

/// Canned HTTP response.
pub struct Reply {
    status: StatusCode,
    headers: Vec<(&'static str, String)>,
    body: Vec<u8>,
}

impl Reply {
    pub fn html(body: &str) -> Self {
        Self::with_type("text/html; charset=utf-8", body.as_bytes().to_vec())
    }

    pub fn text(body: &str) -> Self {
        Self::with_type("text/plain; charset=utf-8", body.as_bytes().to_vec())
    }

    pub fn json(body: &str) -> Self {
        Self::with_type("application/json", body.as_bytes().to_vec())
    }

    pub fn status(status: StatusCode) -> Self {
        Self {
            status,
            ..Self::text(status.canonical_reason().unwrap_or("error"))
        }
    }

    pub fn with_type(content_type: &str, body: Vec<u8>) -> Self {
        Self {
            status: StatusCode::OK,
            headers: vec![("Content-Type", content_type.to_string())],
            body,
        }
    }

    pub fn header(mut self, name: &'static str, value: &str) -> Self {
        self.headers.push((name, value.to_string()));
        self
    }

    fn to_response(&self) -> Response {
        let mut builder = Response::builder().status(self.status);
        for (name, value) in &self.headers {
            builder = builder.header(*name, value.as_str());
        }
        builder.body(Body::from(self.body.clone())).unwrap()
    }
}

/// What the server saw of the first request.
#[derive(Debug)]
pub struct RecordedRequest {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

#[derive(Clone)]
struct ServerState {
    reply: Arc<Reply>,
    recorder: Arc<Mutex<Option<oneshot::Sender<RecordedRequest>>>>,
}

/// A running responder; every request gets the same reply.
pub struct TestServer {
    addr: SocketAddr,
    first_request: oneshot::Receiver<RecordedRequest>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// The first request received.
    pub async fn request(self) -> RecordedRequest {
        self.first_request.await.unwrap()
    }
}

async fn respond(State(state): State<ServerState>, request: Request) -> Response {
    let (parts, body) = request.into_parts();
    let body = to_bytes(body, usize::MAX).await.unwrap_or_default();
    let recorded = RecordedRequest {
        method: parts.method,
        uri: parts.uri,
        headers: parts.headers,
        body: String::from_utf8_lossy(&body).into_owned(),
    };
    if let Some(sender) = state.recorder.lock().unwrap().take() {
        let _ = sender.send(recorded);
    }
    state.reply.to_response()
}

/// Serve `reply` on an ephemeral port, recording the first request.
pub async fn serve_once(reply: Reply) -> TestServer {
    let (sender, first_request) = oneshot::channel();
    let state = ServerState {
        reply: Arc::new(reply),
        recorder: Arc::new(Mutex::new(Some(sender))),
    };
    let router = Router::new().fallback(respond).with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    TestServer {
        addr,
        first_request,
    }
}
