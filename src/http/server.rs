//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the page handler
//! - Wire up middleware (tracing, timeout, request ID, security headers)
//! - Serve until shutdown, applying hot-reloaded render options

use std::sync::Arc;
use std::time::{Duration, Instant};

use arc_swap::ArcSwap;
use axum::{
    extract::State,
    http::{HeaderMap, Uri},
    response::Response,
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{RenderConfig, SiteConfig};
use crate::http::request::{request_id, MakeRequestUuidV4, X_REQUEST_ID};
use crate::http::response::{html_page, security_headers};
use crate::lifecycle::shutdown;
use crate::observability::metrics;
use crate::render::Renderer;
use crate::routing::{Location, RouteTreeError};

/// Error type for server setup and serving.
#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    #[error("invalid route tree: {0}")]
    Routes(#[from] RouteTreeError),

    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub renderer: Arc<Renderer>,
    pub options: Arc<ArcSwap<RenderConfig>>,
}

/// HTTP server for the site.
pub struct HttpServer {
    router: Router,
    config: SiteConfig,
    options: Arc<ArcSwap<RenderConfig>>,
}

impl HttpServer {
    /// Build the route tree, page renderer and HTTP router.
    pub fn new(config: SiteConfig) -> Result<Self, ServeError> {
        let renderer = Arc::new(Renderer::for_site(config.routing.case_sensitive)?);
        let options = Arc::new(ArcSwap::from_pointee(config.render.clone()));

        let state = AppState {
            renderer,
            options: options.clone(),
        };

        let router = Self::build_router(&config, state);
        Ok(Self {
            router,
            config,
            options,
        })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &SiteConfig, state: AppState) -> Router {
        let mut router = Router::new()
            .route("/", get(page_handler))
            .route("/{*path}", get(page_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )));

        if config.security.enable_headers {
            for layer in security_headers() {
                router = router.layer(layer);
            }
        }

        router
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuidV4))
    }

    /// Router with state and middleware applied, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Run the server until `shutdown_rx` fires.
    ///
    /// Configs received on `config_updates` replace the render options.
    /// Listener and routing changes are logged and need a restart.
    pub async fn run(
        self,
        listener: TcpListener,
        mut config_updates: mpsc::UnboundedReceiver<SiteConfig>,
        shutdown_rx: broadcast::Receiver<()>,
    ) -> Result<(), ServeError> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let options = self.options.clone();
        let current = self.config.clone();
        let updates = tokio::spawn(async move {
            while let Some(next) = config_updates.recv().await {
                if next.listener != current.listener || next.routing != current.routing {
                    tracing::warn!("Listener or routing settings changed; restart to apply them");
                }
                tracing::info!(
                    title = %next.render.title,
                    devtools = next.render.devtools,
                    "Render options reloaded"
                );
                options.store(Arc::new(next.render));
            }
        });

        let result = axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::wait(shutdown_rx))
            .await;
        updates.abort();
        result?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Resolve the request path and render the page.
async fn page_handler(State(state): State<AppState>, headers: HeaderMap, uri: Uri) -> Response {
    let start = Instant::now();
    let href = uri.path_and_query().map(|p| p.as_str()).unwrap_or("/");
    let location = Location::parse(href);

    let page = state.renderer.render(&location);
    let options = state.options.load();
    let document = page.to_document(&options);

    let status = page.status.as_u16();
    tracing::debug!(
        request_id = %request_id(&headers),
        path = %location.pathname(),
        route = %page.leaf(),
        status,
        "Rendered page"
    );
    metrics::record_render(page.leaf().as_str(), status, start);

    html_page(page.status, document)
}
