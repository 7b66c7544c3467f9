//! VoiceCompanion backend HTTP server
//!
//! Serves the language-feedback, progress, personalization, conversation,
//! guidance, speech and gallery routes over one axum router. Collaborators and stores come in through
//! [`AppState`], so the whole server runs against stubs in tests.

pub mod error;
pub mod extract;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::info;

/// Handle to a running server that can be used to stop it
pub struct ServerHandle {
    shutdown_tx: oneshot::Sender<()>,
    task: JoinHandle<()>,
    port: u16,
}

impl ServerHandle {
    /// Get the port the server is running on
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Base URL for local clients
    pub fn url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    /// Signal shutdown and wait for in-flight requests to finish
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(());
        if let Err(e) = self.task.await {
            tracing::error!("Server task failed: {}", e);
        }
    }
}

/// Start the server on a random local port
pub async fn start_server(state: AppState) -> anyhow::Result<ServerHandle> {
    start_server_on("127.0.0.1", 0, state).await
}

/// Start the server on the specified host and port
pub async fn start_server_on(
    host: &str,
    port: u16,
    state: AppState,
) -> anyhow::Result<ServerHandle> {
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    let listener = TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;
    let actual_port = local_addr.port();

    info!("VoiceCompanion backend listening on {}", local_addr);

    let app = routes::router(Arc::new(state));
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let task = tokio::spawn(async move {
        let shutdown = async {
            let _ = shutdown_rx.await;
            info!("Shutting down VoiceCompanion backend");
        };
        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await
        {
            tracing::error!("Server error: {}", e);
        }
    });

    Ok(ServerHandle {
        shutdown_tx,
        task,
        port: actual_port,
    })
}
