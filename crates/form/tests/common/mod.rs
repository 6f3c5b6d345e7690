#![allow(dead_code)]

use api_rest::{router, AppState};
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Json, Response};
use axum::Router;
use dengue_client::{ClientConfig, NotificationClient};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Reference API bound to an ephemeral local port.
pub struct TestApi {
    pub base_url: String,
    pub state: AppState,
    requests: Arc<AtomicUsize>,
}

impl TestApi {
    pub async fn start() -> Self {
        let state = AppState::new();
        let requests = Arc::new(AtomicUsize::new(0));
        let app = router(state.clone())
            .layer(middleware::from_fn_with_state(requests.clone(), count_requests));

        Self {
            base_url: serve(app).await,
            state,
            requests,
        }
    }

    pub fn client(&self) -> NotificationClient {
        client_for(&self.base_url)
    }

    /// Number of HTTP requests the server has received so far.
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

async fn count_requests(
    State(requests): State<Arc<AtomicUsize>>,
    request: Request,
    next: Next,
) -> Response {
    requests.fetch_add(1, Ordering::SeqCst);
    next.run(request).await
}

/// Serve `app` on `127.0.0.1:0` and return its `/api` base URL.
pub async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve test api");
    });
    format!("http://{addr}/api")
}

/// A server that answers every request with the same status and JSON body.
pub async fn serve_json(status: StatusCode, body: serde_json::Value) -> String {
    let app = Router::new().fallback(move || {
        let body = body.clone();
        async move { (status, Json(body)).into_response() }
    });
    serve(app).await
}

/// A server that accepts connections but never answers.
pub async fn serve_hung() -> String {
    let app = Router::new().fallback(|| async { std::future::pending::<StatusCode>().await });
    serve(app).await
}

pub fn client_for(base_url: &str) -> NotificationClient {
    let config = ClientConfig::new(base_url, None).expect("test config");
    NotificationClient::new(config).expect("test client")
}
