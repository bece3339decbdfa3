// ============================================================================
// Module : api
// ============================================================================
// Le collaborateur HTTP utilisé par le front-end et son implémentation réseau
// ============================================================================

pub mod client; // Trait RestClient + Request/Response
pub mod http;   // Implémentation reqwest

#[cfg(test)]
pub(crate) mod mock; // Client simulé pour les tests

// Re-exports des types principaux
pub use client::{Method, Request, Response, RestClient};
pub use http::HttpClient;

/// Chemin de la collection de stocks
pub const STOCKS_PATH: &str = "/api/stocks";
