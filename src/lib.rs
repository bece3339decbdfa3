// ============================================================================
// stockview - Library
// ============================================================================
// Expose les modules publics pour les binaires et les tests
// ============================================================================

pub mod api;     // Collaborateur HTTP (trait + client reqwest)
pub mod app;     // Conteneur racine : cycle de vie de la requête
pub mod config;  // Configuration TOML
pub mod logging; // Initialisation de tracing
pub mod models;  // Structures de données
pub mod server;  // API REST des stocks
pub mod ui;      // Vues : tableau, ligne, page
