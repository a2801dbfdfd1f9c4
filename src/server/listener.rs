use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use crate::config::Config;
use crate::http::connection::Connection;
use crate::routing::Router;

pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&cfg.listen_addr).await?;
    info!("Listening on {}", listener.local_addr()?);
    if let Some(dir) = &cfg.directory {
        info!("Serving files from {}", dir.display());
    }

    let router = Arc::new(Router::new(Arc::new(cfg.clone())));
    serve(listener, router).await
}

/// Accepts connections forever, one task per connection.
///
/// A failed accept or a failing connection is logged and never stops the loop.
pub async fn serve(listener: TcpListener, router: Arc<Router>) -> anyhow::Result<()> {
    loop {
        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                tracing::error!("Failed to accept connection: {}", e);
                continue;
            }
        };
        tracing::debug!("Accepted connection from {}", peer);

        let router = Arc::clone(&router);
        tokio::spawn(async move {
            let mut conn = Connection::new(socket, router);
            if let Err(e) = conn.run().await {
                tracing::debug!("Connection error from {}: {}", peer, e);
            }
        });
    }
}
