// ============================================================================
// Initialisation du logging
// ============================================================================
// CONCEPT : deux destinations selon le binaire
// - Front-end (stockview) : stdout transporte la page HTML, donc les logs
//   vont dans un fichier avec rotation quotidienne
// - Serveur (stock-api) : logs sur la console, texte ou JSON
//
// CONCEPT RUST : Tracing subscriber
// - Registry : point central des logs
// - Layer : transforme et route les logs
// - EnvFilter : filtre par niveau (RUST_LOG prioritaire sur la config)
// ============================================================================

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LogConfig;

/// Nom de base des fichiers de log (suffixé par la date)
const LOG_FILE_NAME: &str = "stockview.log";

/// Format des lignes de log, lu depuis `[log] format` ("plain" ou "json")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Texte lisible
    #[default]
    Plain,
    /// Un objet JSON par ligne
    Json,
}

/// Destination des logs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// Fichier avec rotation quotidienne dans `LogConfig::log_dir()`
    File,
    /// Console
    Stdout,
}

/// Construit le filtre : RUST_LOG s'il est défini, sinon le niveau configuré
fn build_filter(level: &str) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(level)
            .with_context(|| format!("Niveau de log invalide : {}", level)),
    }
}

/// Initialise le subscriber global
///
/// # Utilisation
/// ```bash
/// # Contrôler le niveau de log
/// RUST_LOG=debug stock-api
/// RUST_LOG=stockview=trace stockview
///
/// # Voir les logs du front-end en temps réel
/// tail -f ~/.local/share/stockview/logs/stockview.log.*
/// ```
pub fn init_logging(config: &LogConfig, target: LogTarget) -> Result<()> {
    let filter = build_filter(&config.level)?;
    let format = config.format;

    match target {
        LogTarget::File => {
            let log_dir = config.log_dir();
            std::fs::create_dir_all(&log_dir)
                .context("Échec de la création du répertoire de logs")?;

            let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, LOG_FILE_NAME);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false) // Pas de codes couleur dans le fichier
                .with_target(true)
                .with_line_number(true);

            match format {
                LogFormat::Json => tracing_subscriber::registry()
                    .with(layer.json())
                    .with(filter)
                    .try_init(),
                LogFormat::Plain => tracing_subscriber::registry()
                    .with(layer)
                    .with(filter)
                    .try_init(),
            }
            .context("Subscriber de logs déjà initialisé")?;

            info!(log_dir = %log_dir.display(), ?format, "Logging initialised");
        }
        LogTarget::Stdout => {
            let layer = tracing_subscriber::fmt::layer().with_target(true);

            match format {
                LogFormat::Json => tracing_subscriber::registry()
                    .with(layer.json())
                    .with(filter)
                    .try_init(),
                LogFormat::Plain => tracing_subscriber::registry()
                    .with(layer)
                    .with(filter)
                    .try_init(),
            }
            .context("Subscriber de logs déjà initialisé")?;

            info!(?format, "Logging initialised");
        }
    }

    Ok(())
}
