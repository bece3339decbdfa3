// ============================================================================
// stock-api - Serveur
// ============================================================================
// Sert l'API REST des stocks et la page d'accueil jusqu'à Ctrl+C
// ============================================================================

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::info;

use stockview::config::Config;
use stockview::logging::{init_logging, LogTarget};
use stockview::server::{self, ServerState, StockService};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;
    init_logging(&config.log, LogTarget::Stdout)?;

    info!("Starting stock API");

    let service = Arc::new(StockService::seeded(config.server.init_size));
    let format = config.display.date_time_format()?;
    let state = ServerState::new(service, format, config.client.title.clone())?;

    let address = config.server.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Échec du bind sur {}", address))?;

    server::serve(listener, state).await
}
