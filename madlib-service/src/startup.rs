//! Application startup and lifecycle management.

use crate::config::MadlibConfig;
use crate::error::ApiError;
use crate::handlers;
use crate::services::providers::openai::OpenAiProvider;
use crate::services::providers::{ImageProvider, TextProvider};
use crate::services::GenerationService;
use axum::{
    body::Body,
    extract::DefaultBodyLimit,
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    cors::cors_layer, request_id::request_id_middleware, trace::request_span,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

/// Shared application state. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: MadlibConfig,
    pub generation: GenerationService,
}

impl AppState {
    pub fn new(
        config: MadlibConfig,
        text_provider: Arc<dyn TextProvider>,
        image_provider: Arc<dyn ImageProvider>,
    ) -> Self {
        let generation =
            GenerationService::new(text_provider, image_provider, config.models.clone());
        Self { config, generation }
    }

    /// State backed by the OpenAI provider for both text and images.
    pub fn from_config(config: MadlibConfig) -> Self {
        let provider = Arc::new(OpenAiProvider::new(config.openai.clone()));
        Self::new(config, provider.clone(), provider)
    }

    /// Fail the request when the upstream credential is not configured.
    pub fn require_credential(&self) -> Result<(), ApiError> {
        match self.config.openai.credential() {
            Some(_) => Ok(()),
            None => Err(ApiError::MissingCredential),
        }
    }
}

/// Route table: `GET /`, `POST /madlib`, `POST /image`, everything else is a 404.
///
/// Bodies are unbounded so the credential check always runs before any size rejection.
/// The request id layer wraps CORS so preflight answers carry the header too.
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.common.origins());

    Router::new()
        .route("/", get(handlers::index).fallback(handlers::not_found))
        .route(
            "/madlib",
            post(handlers::create_madlib).fallback(handlers::not_found),
        )
        .route(
            "/image",
            post(handlers::create_image).fallback(handlers::not_found),
        )
        .fallback(handlers::not_found)
        .layer(DefaultBodyLimit::disable())
        .with_state(state)
        .layer(TraceLayer::new_for_http().make_span_with(request_span::<Body>))
        .layer(cors)
        .layer(from_fn(request_id_middleware))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application with the OpenAI provider.
    pub async fn build(config: MadlibConfig) -> Result<Self, AppError> {
        if config.openai.credential().is_none() {
            tracing::warn!("OPENAI_API_KEY is not set; generation routes will answer 500");
        }

        tracing::info!(
            base_url = %config.openai.base_url,
            story_model = %config.models.story_model,
            image_model = %config.models.image_model,
            "Initialized OpenAI provider"
        );

        Self::with_state(AppState::from_config(config)).await
    }

    /// Bind the listener for an already assembled state (port 0 = random port).
    pub async fn with_state(state: AppState) -> Result<Self, AppError> {
        let address = state.config.common.address();
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", address, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Madlib service: HTTP on port {}", port);

        Ok(Self {
            port,
            listener,
            router: build_router(state),
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Serve requests until Ctrl+C or SIGTERM.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                std::io::Error::other(format!("HTTP server error: {}", e))
            })
    }
}
