//! Fincoach Engine - Main entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{HeaderValue, Method};
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fincoach_engine::{api, App, EngineConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root (the engine is often run from `crates/engine`).
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fincoach_engine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Fincoach Engine");

    let config = EngineConfig::from_env();
    if config.llm.api_key.is_none() {
        tracing::warn!("LLM_API_KEY is not set; requests to the LLM provider are unauthenticated");
    }
    tracing::info!(
        base_url = %config.llm.base_url,
        chat_model = %config.llm.chat_model,
        scenario_model = %config.llm.scenario_model,
        timeout_secs = config.llm.timeout_secs,
        batch_size = config.game.batch_size,
        recency_capacity = config.game.recency_capacity,
        mockbank_url = %config.mockbank_url,
        "Configuration loaded"
    );

    let app = Arc::new(App::from_config(&config));

    let mut router = api::http::routes()
        .route("/ws", get(api::websocket::ws_handler))
        .with_state(app)
        .layer(TraceLayer::new_for_http());

    if let Some(cors) = build_cors_layer(config.cors_allowed_origins.as_deref()) {
        router = router.layer(cors);
    }

    // Start server
    let addr: SocketAddr = config.bind_address().parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}

fn build_cors_layer(allowed_origins: Option<&[String]>) -> Option<CorsLayer> {
    let allowed_origins = allowed_origins.filter(|o| !o.is_empty())?;

    let mut cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        // The web client posts JSON, which triggers CORS preflights.
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    if allowed_origins.iter().any(|o| o == "*") {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|s| HeaderValue::from_str(s).ok())
            .collect();

        if origins.is_empty() {
            return None;
        }

        cors = cors.allow_origin(origins);
    }

    Some(cors)
}
