//! Axum-based HTTP server for the garage door API.
//!
//! Provides REST endpoints for:
//! - GET `/api/state` - Current door state and move progress
//! - GET `/api/target` - Last requested target
//! - POST `/api/target` - Request open or closed
//! - GET `/api/info` - Accessory information
//! - GET `/` - Web UI (serves index.html)

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::config::WebConfig;
use crate::messages::parse_target_request;

use super::api::{ApiResponse, CommandResponse, InfoResponse, StateResponse, TargetResponse};
use super::shared::DoorStateProvider;

const INDEX_HTML: &str = include_str!("../../www/index.html");

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /api/state - Returns current door state
async fn get_state<S: DoorStateProvider + 'static>(
    State(state): State<Arc<S>>,
) -> Json<ApiResponse<StateResponse>> {
    let snapshot = state.state();
    Json(ApiResponse::ok(StateResponse::from(&snapshot)))
}

/// GET /api/target - Returns the last requested target
async fn get_target<S: DoorStateProvider + 'static>(
    State(state): State<Arc<S>>,
) -> Json<ApiResponse<TargetResponse>> {
    let target = state.state().target;
    Json(ApiResponse::ok(TargetResponse::from(target)))
}

/// POST /api/target - Request a door target
///
/// Accepts JSON: `{"target": "open"}` or `{"target": "closed"}`
async fn set_target<S: DoorStateProvider + 'static>(
    State(state): State<Arc<S>>,
    body: Bytes,
) -> (StatusCode, Json<ApiResponse<CommandResponse>>) {
    let Some(request) = parse_target_request(&body) else {
        log::warn!("Rejected target request: {:?}", String::from_utf8_lossy(&body));
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::err(
                "Invalid target request, expected {\"target\": \"open\"|\"closed\"}",
            )),
        );
    };

    let outcome = state.request_target(request.target);
    (
        StatusCode::OK,
        Json(ApiResponse::ok(CommandResponse::from(&outcome))),
    )
}

/// GET /api/info - Accessory information
async fn get_info<S: DoorStateProvider + 'static>(
    State(state): State<Arc<S>>,
) -> Json<ApiResponse<InfoResponse>> {
    Json(ApiResponse::ok(InfoResponse::from(state.device())))
}

/// Fallback handler for 404
async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::<()>::err("Not found")),
    )
}

/// The web UI with the poll interval filled in.
fn render_index(poll_interval_ms: u32) -> String {
    INDEX_HTML.replace("__POLL_MS__", &poll_interval_ms.to_string())
}

// ============================================================================
// Server Builder
// ============================================================================

/// Configuration for the web server
#[derive(Debug, Clone)]
pub struct WebServerConfig {
    /// Address to bind to
    pub addr: SocketAddr,
    /// Whether to enable CORS for all origins
    pub cors_permissive: bool,
    /// How often the web UI polls `/api/state`
    pub poll_interval_ms: u32,
}

impl Default for WebServerConfig {
    fn default() -> Self {
        Self::from_config(&WebConfig::default())
    }
}

impl WebServerConfig {
    /// Create a new config with the given address
    pub fn new(addr: impl Into<SocketAddr>) -> Self {
        Self {
            addr: addr.into(),
            ..Default::default()
        }
    }

    /// Set whether CORS should be permissive
    pub fn cors(mut self, permissive: bool) -> Self {
        self.cors_permissive = permissive;
        self
    }

    /// Create from shared WebConfig
    pub fn from_config(config: &WebConfig) -> Self {
        Self {
            addr: ([0, 0, 0, 0], config.port).into(),
            cors_permissive: config.cors_permissive,
            poll_interval_ms: config.poll_interval_ms,
        }
    }
}

/// Build the Axum router with all routes
pub fn build_router<S: DoorStateProvider + 'static>(
    state: Arc<S>,
    config: &WebServerConfig,
) -> Router {
    let page = render_index(config.poll_interval_ms);

    let mut router = Router::new()
        // API routes
        .route("/api/state", get(get_state::<S>))
        .route("/api/target", get(get_target::<S>).post(set_target::<S>))
        .route("/api/info", get(get_info::<S>))
        // Web UI
        .route(
            "/",
            get(move || {
                let page = page.clone();
                async move { Html(page) }
            }),
        )
        // Fallback
        .fallback(not_found)
        .with_state(state);

    // Add CORS if requested
    if config.cors_permissive {
        router = router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    router
}

/// Start the web server with shared state
///
/// Runs until the server fails. Spawn
/// [`spawn_update_loop`](super::spawn_update_loop) on the same state first,
/// or moves will never be confirmed.
///
/// # Example
///
/// ```ignore
/// let state = Arc::new(SharedDoorState::new(door));
/// spawn_update_loop(Arc::clone(&state), 50);
/// run_server_with_state(state, web_config).await?;
/// ```
pub async fn run_server_with_state<S: DoorStateProvider + 'static>(
    state: Arc<S>,
    config: WebServerConfig,
) -> Result<(), std::io::Error> {
    let router = build_router(state, &config);
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    log::info!("Web server listening on http://{}", config.addr);
    axum::serve(listener, router).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_gets_poll_interval() {
        let page = render_index(750);
        assert!(page.contains("750"));
        assert!(!page.contains("__POLL_MS__"));
    }

    #[test]
    fn server_config_from_web_config() {
        let config = WebServerConfig::from_config(&WebConfig::default().with_port(3000).with_cors(false));
        assert_eq!(config.addr.port(), 3000);
        assert!(!config.cors_permissive);
    }

    #[test]
    fn server_config_new_keeps_defaults() {
        let config = WebServerConfig::new(([127, 0, 0, 1], 9000)).cors(false);
        assert_eq!(config.addr.port(), 9000);
        assert_eq!(config.poll_interval_ms, WebConfig::default().poll_interval_ms);
        assert!(!config.cors_permissive);
    }
}
