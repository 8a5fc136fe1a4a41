use class_portal::config::AppConfig;
use class_portal::infrastructure::{database, storage};
use class_portal::services::local::LocalStore;
use class_portal::services::poll::Poller;
use class_portal::services::remote::RemoteStore;
use class_portal::services::session::SessionCell;
use class_portal::services::store::Storage;
use class_portal::{AppState, StorageMode, create_app};
use dotenvy::dotenv;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "class_portal=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("🚀 Starting Class Portal...");

    let config = AppConfig::from_env();

    // Mode is evaluated exactly once. A single missing backend parameter
    // forces full local fallback.
    let mut poller: Option<Poller> = None;
    let (store, mode): (Arc<dyn Storage>, StorageMode) = if config.remote_configured() {
        let db = database::setup_database(&config).await?;
        let blob = storage::setup_storage(&config).await;
        let store = RemoteStore::new(db, blob).await?;
        info!("☁️  Remote mode: backend configured, live updates enabled");
        (Arc::new(store), StorageMode::Remote)
    } else {
        warn!(
            "💾 Local mode: backend not configured, records live in '{}' only",
            config.data_dir
        );
        let store = Arc::new(LocalStore::open(config.data_dir.clone())?);

        // The poll loop stands in for the remote change subscription;
        // consumers see up to one interval of staleness
        let refresh_store = store.clone();
        poller = Some(Poller::start(
            Duration::from_secs(config.poll_interval_secs),
            move || {
                if let Err(e) = refresh_store.refresh() {
                    warn!("Local poll failed: {}", e);
                }
            },
        ));

        (store, StorageMode::Local)
    };

    let state = AppState {
        store,
        session: SessionCell::new(),
        config: config.clone(),
        mode,
    };

    let app = create_app(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(axum::extract::DefaultBodyLimit::max(config.max_upload_size));

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    info!("✅ Server ready at http://{}", addr);
    info!("📖 Swagger UI: http://{}/swagger-ui", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(poller) = poller.take() {
        poller.stop();
    }

    info!("🛑 Server shut down gracefully.");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("⌨️  Ctrl+C received, starting graceful shutdown...");
        },
        _ = terminate => {
            info!("💤 SIGTERM received, starting graceful shutdown...");
        },
    }
}
