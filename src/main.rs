use std::sync::Arc;

use anyhow::Context;
use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tokio::signal;

use contacts_api::config::{Settings, StorageBackend};
use contacts_api::{app, telemetry, ContactStore, MemoryStore, PgStore};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env().context("loading configuration")?;
    telemetry::init_tracing(&settings.log_filter).context("installing tracing subscriber")?;

    let store: Arc<dyn ContactStore> = match &settings.storage {
        StorageBackend::Postgres {
            database_url,
            max_connections,
        } => {
            let store = PgStore::connect(database_url, *max_connections)
                .await
                .context("connecting to postgres")?;
            tracing::info!(max_connections, "connected to postgres");
            Arc::new(store)
        }
        StorageBackend::Memory => {
            tracing::warn!("using in-memory storage, contacts will not survive a restart");
            Arc::new(MemoryStore::new())
        }
    };

    let listener = TcpListener::bind(settings.bind_addr)
        .await
        .with_context(|| format!("binding {}", settings.bind_addr))?;
    tracing::info!("Server running at http://{}", settings.bind_addr);

    axum::serve(listener, app(store))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving http")?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(err) => tracing::error!(error = %err, "failed to listen for SIGTERM"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
