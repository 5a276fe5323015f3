//! HTTP server setup and the capture handler.
//!
//! # Responsibilities
//! - Create the Axum Router (admin routes + catch-all capture route)
//! - Wire up middleware (request ID, tracing, timeout, body limit)
//! - Serve with connect info so the peer address reaches handlers
//! - Record every recordable request before answering it

use axum::{
    body::{Body, Bytes},
    extract::{ConnectInfo, State},
    http::{request::Parts, Request},
    middleware,
    response::Response,
    routing::any,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{limit::RequestBodyLimitLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::admin::{setup_admin_router, AdminExporter};
use crate::capture::{format_request, format_response, CaptureDraft, LogStore, RequestParts, ResponseParts};
use crate::config::MonitorConfig;
use crate::http::request::{
    protocol_label, request_id_middleware, request_target, resolve_source_ip, RequestIdExt,
};
use crate::http::response::capture_response;
use crate::observability::metrics;
use crate::routing::{CaptureRouter, RouteDecision};

/// How the recorded response text is rendered.
#[derive(Debug, Clone)]
pub struct ResponseSettings {
    pub content_type: String,
    pub include_content_length: bool,
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<LogStore>,
    pub router: Arc<CaptureRouter>,
    pub exporter: Arc<AdminExporter>,
    pub response: Arc<ResponseSettings>,
}

impl AppState {
    /// Build state around an existing store.
    pub fn new(config: &MonitorConfig, store: Arc<LogStore>) -> Self {
        let exporter = AdminExporter::new(
            store.clone(),
            config.display_domain(),
            config.admin.path.clone(),
        );
        Self {
            store,
            router: Arc::new(CaptureRouter::from_config(&config.capture)),
            exporter: Arc::new(exporter),
            response: Arc::new(ResponseSettings {
                content_type: config.capture.content_type.clone(),
                include_content_length: config.capture.include_content_length,
            }),
        }
    }
}

/// HTTP server for the monitor.
pub struct HttpServer {
    router: Router,
    store: Arc<LogStore>,
}

impl HttpServer {
    /// Create a new HTTP server with a fresh store sized from the config.
    pub fn new(config: MonitorConfig) -> Self {
        let store = Arc::new(LogStore::new(config.capture.max_logs));
        Self::with_store(config, store)
    }

    /// Create a server around a caller-owned store.
    pub fn with_store(config: MonitorConfig, store: Arc<LogStore>) -> Self {
        let state = AppState::new(&config, store.clone());
        let router = Self::build_router(&config, state);
        Self { router, store }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &MonitorConfig, state: AppState) -> Router {
        Router::new()
            .route("/", any(capture_handler))
            .route("/{*path}", any(capture_handler))
            .merge(setup_admin_router(&config.admin.path))
            .with_state(state)
            .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    request_id = %request.request_id(),
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }))
            .layer(middleware::from_fn(request_id_middleware))
    }

    /// The fully layered router, for serving or driving in tests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// The store captures are written to.
    pub fn store(&self) -> Arc<LogStore> {
        self.store.clone()
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            max_logs = self.store.max_logs(),
            "HTTP server starting"
        );

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Catch-all handler for every non-admin request.
///
/// Recordable requests are captured in a spawned task that is awaited before
/// the response is returned: the entry is visible to the admin view before
/// the client sees its response, and a client that disconnects mid-request
/// cannot cancel the capture.
async fn capture_handler(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    request: Request<Body>,
) -> Response {
    let decision = state.router.route(request.uri().path());

    if !decision.record {
        metrics::record_ignored(decision.kind.as_str());
        tracing::debug!(
            request_id = %request.request_id(),
            path = %request.uri().path(),
            route = decision.kind.as_str(),
            "Request not recorded"
        );
        return capture_response(&decision, &state.response.content_type);
    }

    let request_id = request.request_id().to_string();
    let (parts, body) = request.into_parts();
    let task_state = state.clone();
    let task_decision = decision.clone();
    let task = tokio::spawn(async move {
        let body = match axum::body::to_bytes(body, usize::MAX).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(
                    request_id = %request_id,
                    error = %e,
                    "Failed to read request body, recording it as empty"
                );
                Bytes::new()
            }
        };
        record_capture(&task_state, &parts, &body, peer, &task_decision, &request_id);
    });

    if let Err(e) = task.await {
        tracing::error!(error = %e, "Capture task failed");
    }

    capture_response(&decision, &state.response.content_type)
}

fn record_capture(
    state: &AppState,
    parts: &Parts,
    body: &[u8],
    peer: SocketAddr,
    decision: &RouteDecision,
    request_id: &str,
) {
    let target = request_target(&parts.uri, parts.version);
    let raw_request = format_request(&RequestParts {
        method: parts.method.as_str(),
        target: &target,
        protocol: protocol_label(parts.version),
        authority: parts.uri.authority().map(|a| a.as_str()),
        headers: &parts.headers,
        body,
    });
    let raw_response = format_response(&ResponseParts {
        status: decision.status,
        content_type: &state.response.content_type,
        include_content_length: state.response.include_content_length,
        date: SystemTime::now(),
        body: &decision.body,
    });

    let entry = state.store.record(CaptureDraft {
        source_ip: resolve_source_ip(&parts.headers, peer),
        raw_request,
        raw_response,
    });
    metrics::record_capture(decision.kind.as_str());

    tracing::info!(
        request_id = %request_id,
        capture_id = entry.id(),
        source_ip = %entry.source_ip(),
        method = %parts.method,
        target = %target,
        body_bytes = body.len(),
        "Captured request"
    );
}
