use crate::config::Config;
use crate::events::UiEvent;
use crate::frontend::Frontend;
use crate::surface::{Element, MemorySurface};
use crate::tmdb::{TmdbApi, TmdbClient};
use anyhow::Result;
use axum::{
    extract::State,
    response::Html,
    routing::{get, post},
    Json, Router,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

const MAX_BODY_BYTES: usize = 64 * 1024;

#[derive(Clone)]
pub struct ServerState {
    pub frontend: Frontend<MemorySurface>,
}

pub async fn run_server(config: Config) -> Result<()> {
    let tmdb: Arc<dyn TmdbApi> =
        Arc::new(TmdbClient::new(config.tmdb_api_key.clone()).with_base_url(config.tmdb_base_url.clone()));
    let frontend = Frontend::new(tmdb, MemorySurface::new(config.viewport_width), config.frontend);

    let bootstrap = frontend.clone();
    tokio::spawn(async move { bootstrap.start().await });

    let app = build_router(ServerState { frontend });

    info!("Listening on {}", config.addr);
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

pub fn build_router(state: ServerState) -> Router {
    Router::new()
        .route("/", get(page))
        .route("/health", get(health))
        .route("/surface", get(surface))
        .route("/events", post(handle_event))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "OK"
}

async fn page(State(state): State<ServerState>) -> Html<String> {
    Html(state.frontend.ui().lock().await.surface.to_html())
}

async fn surface(State(state): State<ServerState>) -> Json<BTreeMap<&'static str, Element>> {
    Json(state.frontend.ui().lock().await.surface.snapshot())
}

async fn handle_event(
    State(state): State<ServerState>,
    Json(event): Json<UiEvent>,
) -> Json<BTreeMap<&'static str, Element>> {
    state.frontend.dispatch(event).await;
    Json(state.frontend.ui().lock().await.surface.snapshot())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Shutdown signal received (Ctrl+C)");
        }
        _ = terminate => {
            info!("Shutdown signal received (SIGTERM)");
        }
    }
}
