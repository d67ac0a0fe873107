//! Price Quiz Back binary entrypoint wiring REST, MongoDB and the question feed.

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod clock;
mod config;
mod dao;
mod dto;
mod error;
mod feed;
mod room;
mod routes;
mod services;
mod state;

use clock::SystemClock;
use config::AppConfig;
#[cfg(not(feature = "mongo-store"))]
use dao::room_store::memory::MemoryRoomStore;
#[cfg(feature = "mongo-store")]
use dao::room_store::{
    RoomStore,
    mongodb::{MongoConfig, MongoRoomStore},
};
use feed::HttpQuestionSource;
use state::{AppState, SharedState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AppConfig::from_env();

    let questions =
        HttpQuestionSource::new(&config.feed_url, config.feed_timeout).context("feed client")?;
    let app_state = AppState::new(Arc::new(questions), Arc::new(SystemClock));

    spawn_storage_supervisor(app_state.clone(), &config);
    // Build the HTTP router once the shared state is ready.
    let app = build_router(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!(%addr, "starting server");

    let listener = TcpListener::bind(addr).await.context("binding server")?;
    let service = app.into_make_service();
    axum::serve(listener, service)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving axum")?;

    Ok(())
}

/// Hand the MongoDB connection to the background supervisor, which installs the
/// store once it is reachable and toggles degraded mode on connectivity changes.
#[cfg(feature = "mongo-store")]
fn spawn_storage_supervisor(state: SharedState, config: &AppConfig) {
    let uri = config.mongo_uri.clone();
    let db_name = config.mongo_db.clone();

    tokio::spawn(services::storage_supervisor::run(state, move || {
        let uri = uri.clone();
        let db_name = db_name.clone();
        async move {
            let mongo_config = MongoConfig::from_uri(&uri, db_name.as_deref()).await?;
            let store = MongoRoomStore::connect(mongo_config).await?;
            Ok(Arc::new(store) as Arc<dyn RoomStore>)
        }
    }));
}

/// Install the in-memory store right away; nothing to supervise without MongoDB.
#[cfg(not(feature = "mongo-store"))]
fn spawn_storage_supervisor(state: SharedState, _config: &AppConfig) {
    tokio::spawn(async move {
        state
            .install_room_store(Arc::new(MemoryRoomStore::new()))
            .await;
        info!("running on the in-memory room store");
    });
}

/// Build the top-level router and attach cross-cutting middleware layers.
fn build_router(state: SharedState) -> Router<()> {
    routes::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Configure tracing subscribers so logs include spans by default.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=debug".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Wait for Ctrl+C or SIGTERM and shut the server down gracefully.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut term = signal(SignalKind::terminate()).expect("install SIGTERM handler");
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = term.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
