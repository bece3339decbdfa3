// ============================================================================
// Structures : Stock et StockRequest
// ============================================================================
// Stock : l'unique entité affichée par le front-end (une ligne du tableau)
// StockRequest : le corps JSON accepté par l'API pour créer/modifier un stock
//
// CONCEPTS RUST :
// 1. #[serde(rename_all = "camelCase")] : current_price <-> "currentPrice"
// 2. Validation explicite : Result<(), String> plutôt qu'une exception
// ============================================================================

use serde::{Deserialize, Serialize};

/// Nombre maximum de chiffres avant la virgule pour un prix
const MAX_INTEGER_DIGITS: usize = 12;

/// Nombre maximum de chiffres après la virgule pour un prix
const MAX_FRACTION_DIGITS: usize = 2;

/// Un stock tel que renvoyé par `GET /api/stocks`
///
/// Format JSON :
/// `{"id": 1, "name": "ACME", "currentPrice": 12.5, "lastUpdate": 0}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stock {
    /// Identifiant unique, sert de clé à la ligne du tableau
    pub id: i64,

    /// Nom affiché tel quel
    pub name: String,

    /// Prix courant, affiché sans formatage
    pub current_price: f64,

    /// Dernière mise à jour en millisecondes depuis l'epoch Unix
    pub last_update: i64,
}

impl Stock {
    pub fn new(id: i64, name: impl Into<String>, current_price: f64, last_update: i64) -> Self {
        Self {
            id,
            name: name.into(),
            current_price,
            last_update,
        }
    }
}

/// Corps des requêtes POST/PUT sur l'API
///
/// L'id et la date de mise à jour ne sont jamais fournis par le client :
/// le serveur les attribue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockRequest {
    pub name: String,
    pub current_price: f64,
}

impl StockRequest {
    pub fn new(name: impl Into<String>, current_price: f64) -> Self {
        Self {
            name: name.into(),
            current_price,
        }
    }

    /// Vérifie le nom et le prix
    ///
    /// - nom : non vide, uniquement des caractères de mot (`[A-Za-z0-9_]`)
    /// - prix : fini, positif ou nul, au plus 12 chiffres entiers et 2 décimales
    ///
    /// # Retourne
    /// * `Err(message)` décrivant la première règle violée
    pub fn validate(&self) -> Result<(), String> {
        if self.name.is_empty() {
            return Err("name must not be empty".to_string());
        }
        if !self.name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(format!("name '{}' must be alphanumeric", self.name));
        }

        let price = self.current_price;
        if !price.is_finite() {
            return Err("currentPrice must be a finite number".to_string());
        }
        if price < 0.0 {
            return Err("currentPrice must be positive".to_string());
        }

        // CONCEPT : Display de f64 donne la plus courte écriture décimale
        // qui relit la même valeur, donc les chiffres tels qu'envoyés en JSON
        let repr = price.to_string();
        let (integer, fraction) = repr.split_once('.').unwrap_or((repr.as_str(), ""));
        if integer.len() > MAX_INTEGER_DIGITS || fraction.len() > MAX_FRACTION_DIGITS {
            return Err(format!(
                "currentPrice {} must have at most {} integer and {} fraction digits",
                repr, MAX_INTEGER_DIGITS, MAX_FRACTION_DIGITS
            ));
        }

        Ok(())
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================
