use tokio::signal;
use tracing::log::{error, info};

pub struct Shutdown;

impl Shutdown {
    /// Resolves on Ctrl+C or SIGTERM. A handler that cannot be installed never fires.
    pub async fn signal(message: &str) {
        let ctrl_c = async {
            if let Err(error) = signal::ctrl_c().await {
                error!("Failed to install Ctrl+C handler: {}", error);
                std::future::pending::<()>().await;
            }
        };

        let terminate = async {
            match signal::unix::signal(signal::unix::SignalKind::terminate()) {
                Ok(mut terminate) => {
                    terminate.recv().await;
                },
                Err(error) => {
                    error!("Failed to install SIGTERM handler: {}", error);
                    std::future::pending::<()>().await;
                },
            }
        };

        tokio::select! {
            _ = ctrl_c => {},
            _ = terminate => {},
        }

        info!("{message}");
    }
}
