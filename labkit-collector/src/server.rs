//! Serve loop and interrupt handling

use std::future::{Future, IntoFuture};

use tokio::net::TcpListener;

use crate::api::create_router;

/// Serve the collector on `listener` until `shutdown` resolves
///
/// Requests in flight when `shutdown` fires are dropped along with the
/// listening socket; there is no drain.
pub async fn serve<F>(listener: TcpListener, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send,
{
    let app = create_router();

    tokio::select! {
        result = axum::serve(listener, app).into_future() => result,
        _ = shutdown => {
            tracing::info!("Shutdown requested, closing listener");
            Ok(())
        }
    }
}

/// Resolves on Ctrl-C, or SIGTERM on unix
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
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
        _ = ctrl_c => tracing::info!("Received Ctrl-C"),
        _ = terminate => tracing::info!("Received SIGTERM"),
    }
}
