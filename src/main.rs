// ============================================================================
// stockview - Front-end
// ============================================================================
// Monte le conteneur racine sur l'API des stocks, attend l'unique réponse,
// puis écrit la page HTML (fichier configuré ou stdout).
//
// Un échec de la requête n'est pas une erreur du programme : la page est
// écrite avec un tableau vide et l'échec est dans les logs.
// ============================================================================

use std::io::{self, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{error, info};

use stockview::api::HttpClient;
use stockview::app::App;
use stockview::config::Config;
use stockview::logging::{init_logging, LogTarget};
use stockview::ui::render_page;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;

    // Logging en premier ; s'il échoue on continue sans
    init_logging(&config.log, LogTarget::File).unwrap_or_else(|e| {
        eprintln!("Warning: failed to initialize logging: {:#}", e);
        eprintln!("Continuing without logging...");
    });
    info!(base_url = %config.client.base_url, "stockview starting up");

    let format = config.display.date_time_format()?;
    let client = Arc::new(HttpClient::new(config.client.base_url.as_str())?);

    // Montage : une seule requête, puis un seul rendu
    let mut app = App::new(format);
    app.component_did_mount(client);
    app.settle().await;

    let page = render_page(&config.client.title, app.render());

    let result = match &config.client.output {
        Some(path) => std::fs::write(path, &page)
            .with_context(|| format!("Échec de l'écriture de {}", path.display())),
        None => io::stdout()
            .lock()
            .write_all(page.as_bytes())
            .context("Échec de l'écriture sur stdout"),
    };

    match &result {
        Ok(()) => info!(rows = app.stocks().len(), "Page written"),
        Err(e) => error!(error = ?e, "Failed to write page"),
    }
    result
}
