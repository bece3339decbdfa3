// ============================================================================
// Configuration
// ============================================================================
// Fichier TOML optionnel ; chaque champ a une valeur par défaut.
//
// Recherche du fichier :
// 1. variable d'environnement STOCKVIEW_CONFIG (le fichier doit exister)
// 2. ./stockview.toml s'il existe
// 3. sinon : valeurs par défaut
//
// Exemple :
// ```toml
// [server]
// port = 8080
// init_size = 10
//
// [client]
// base_url = "http://127.0.0.1:8080"
// output = "stocks.html"
//
// [display]
// locale = "en_US"
// utc_offset = "+02:00"
//
// [log]
// level = "stockview=debug,info"
// format = "json"
// ```
// ============================================================================

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use crate::logging::LogFormat;
use crate::ui::{DateTimeFormat, Locale, Zone};

/// Variable d'environnement donnant le chemin du fichier de configuration
pub const CONFIG_ENV_VAR: &str = "STOCKVIEW_CONFIG";

/// Fichier cherché dans le répertoire courant
pub const DEFAULT_CONFIG_FILE: &str = "stockview.toml";

/// Configuration complète
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub client: ClientConfig,
    pub display: DisplayConfig,
    pub log: LogConfig,
}

/// API REST (binaire stock-api)
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub address: String,
    pub port: u16,

    /// Nombre de stocks créés au démarrage
    pub init_size: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: "0.0.0.0".to_string(),
            port: 8080,
            init_size: 10,
        }
    }
}

impl ServerConfig {
    /// Adresse d'écoute "adresse:port"
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.address, self.port)
    }
}

/// Front-end (binaire stockview)
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// URL de base de l'API
    pub base_url: String,

    /// Fichier de sortie de la page (stdout si absent)
    pub output: Option<PathBuf>,

    /// Titre de la page
    pub title: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080".to_string(),
            output: None,
            title: "Stocks".to_string(),
        }
    }
}

/// Affichage des dates
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Locale forcée (sinon celle de l'environnement)
    pub locale: Option<String>,

    /// Décalage UTC forcé, ex: "+02:00" (sinon le fuseau local)
    pub utc_offset: Option<String>,
}

impl DisplayConfig {
    /// Construit le formateur de dates
    pub fn date_time_format(&self) -> Result<DateTimeFormat> {
        let locale = self
            .locale
            .as_deref()
            .map(Locale::from_tag)
            .unwrap_or_else(Locale::from_env);

        let zone = match self.utc_offset.as_deref() {
            Some(offset) => Zone::parse_offset(offset).context("display.utc_offset invalide")?,
            None => Zone::Local,
        };

        Ok(DateTimeFormat::new(locale, zone))
    }
}

/// Logging
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Directive EnvFilter (RUST_LOG a la priorité)
    pub level: String,

    /// "plain" ou "json"
    pub format: LogFormat,

    /// Répertoire des fichiers de log (front-end)
    pub dir: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Plain,
            dir: None,
        }
    }
}

impl LogConfig {
    /// Répertoire des logs
    ///
    /// Par défaut :
    /// - Linux : ~/.local/share/stockview/logs
    /// - macOS : ~/Library/Application Support/stockview/logs
    /// - Windows : C:\Users\<user>\AppData\Local\stockview\logs
    /// - repli : ./logs
    pub fn log_dir(&self) -> PathBuf {
        self.dir.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .map(|dir| dir.join("stockview").join("logs"))
                .unwrap_or_else(|| PathBuf::from("./logs"))
        })
    }
}

impl Config {
    /// Charge la configuration (voir l'ordre de recherche en tête de fichier)
    pub fn load() -> Result<Self> {
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            return Self::from_file(Path::new(&path));
        }

        let default_path = Path::new(DEFAULT_CONFIG_FILE);
        if default_path.exists() {
            return Self::from_file(default_path);
        }

        Ok(Self::default())
    }

    /// Lit et parse un fichier TOML
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Échec de la lecture de {}", path.display()))?;
        let config = Self::from_toml_str(&content)
            .with_context(|| format!("Configuration invalide dans {}", path.display()))?;

        debug!(path = %path.display(), "Configuration loaded");
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Échec du parsing TOML")
    }
}
