use mood_journal::{
    AppState, Config, FileKvStore, KeyValueStore, MemoryKvStore, MoodSession, MoodStorage,
    StorageBackend, router,
};
use std::{net::SocketAddr, sync::Arc};
use tokio::{fs, signal};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env();
    let store: Arc<dyn KeyValueStore> = match config.storage {
        StorageBackend::File => {
            fs::create_dir_all(&config.data_path).await?;
            info!("storing mood data in {}", config.data_path.display());
            Arc::new(FileKvStore::new(&config.data_path))
        }
        StorageBackend::Memory => {
            info!("using in-memory storage; entries are lost on exit");
            Arc::new(MemoryKvStore::new())
        }
    };

    let storage = MoodStorage::new(store);
    let session = MoodSession::new(storage.clone(), config.save_delay);
    let state = AppState::new(storage, session.clone());
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if session.flush() {
        info!("saved pending entry on shutdown");
    }
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutting down");
}
