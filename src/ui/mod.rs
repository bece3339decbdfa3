// ============================================================================
// Module : ui
// ============================================================================
// Les vues du front-end : fonctions pures qui construisent un arbre HTML
// ============================================================================

pub mod datetime;   // Formatage des dates selon la locale
pub mod markup;     // Arbre d'éléments HTML + sérialisation
pub mod page;       // Page hôte et point de montage
pub mod stock_list; // Vue tableau
pub mod stock_row;  // Vue ligne

// Re-exports pour simplifier les imports
pub use datetime::{DateTimeFormat, Locale, Zone};
pub use markup::{Element, Node};
pub use page::render_page;
pub use stock_list::render_stock_list;
pub use stock_row::render_stock_row;
