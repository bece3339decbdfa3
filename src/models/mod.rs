// ============================================================================
// Module : models
// ============================================================================
// Structures de données partagées par le front-end et l'API
// ============================================================================

pub mod stock; // Stock et StockRequest (fichier stock.rs)

// Re-export pour simplifier les imports
// Au lieu de : use stockview::models::stock::Stock;
// On peut faire : use stockview::models::Stock;
pub use stock::{Stock, StockRequest};
