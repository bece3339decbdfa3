// ============================================================================
// StockService : stockage en mémoire
// ============================================================================
// Garde les stocks dans une map ordonnée par id, protégée par un RwLock.
// Les ids viennent d'une séquence atomique (1, 2, 3, ...).
//
// CONCEPTS RUST :
// 1. RwLock : plusieurs lecteurs OU un seul écrivain
// 2. AtomicI64 : séquence sans verrou, sûre entre threads
// 3. BTreeMap : itération triée par id (liste stable)
// ============================================================================

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, info};

use crate::models::{Stock, StockRequest};
use crate::server::error::ApiError;

/// Stockage des stocks : création, mise à jour, lecture, liste
#[derive(Debug, Default)]
pub struct StockService {
    stocks: RwLock<BTreeMap<i64, Stock>>,
    id_sequence: AtomicI64,
}

impl StockService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Crée un service avec `count` stocks initiaux
    pub fn seeded(count: u32) -> Self {
        let service = Self::new();
        service.seed(count);
        service
    }

    /// Ajoute `count` stocks : name_1 à 1.66, name_2 à 2.66, ...
    pub fn seed(&self, count: u32) {
        let now = now_millis();
        let mut stocks = self.write();
        for n in 1..=count {
            let id = self.next_id();
            let price = ((f64::from(n) + 0.66) * 100.0).round() / 100.0;
            stocks.insert(id, Stock::new(id, format!("name_{}", n), price, now));
        }
        info!(count, "Seeded stocks");
    }

    /// Tous les stocks, triés par id
    pub fn list(&self) -> Vec<Stock> {
        self.read().values().cloned().collect()
    }

    pub fn get(&self, id: i64) -> Result<Stock, ApiError> {
        self.read().get(&id).cloned().ok_or(ApiError::NotFound(id))
    }

    /// Valide la requête, attribue le prochain id et enregistre le stock
    pub fn create(&self, request: StockRequest) -> Result<Stock, ApiError> {
        request.validate().map_err(ApiError::Invalid)?;

        let id = self.next_id();
        let stock = Stock::new(id, request.name, request.current_price, now_millis());
        self.write().insert(id, stock.clone());

        debug!(id, "Created stock");
        Ok(stock)
    }

    /// Remplace le nom et le prix d'un stock existant
    ///
    /// L'id est conservé, la date de mise à jour est rafraîchie
    pub fn update(&self, id: i64, request: StockRequest) -> Result<Stock, ApiError> {
        request.validate().map_err(ApiError::Invalid)?;

        let mut stocks = self.write();
        let Some(existing) = stocks.get_mut(&id) else {
            return Err(ApiError::NotFound(id));
        };
        *existing = Stock::new(id, request.name, request.current_price, now_millis());

        debug!(id, "Updated stock");
        Ok(existing.clone())
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn next_id(&self) -> i64 {
        self.id_sequence.fetch_add(1, Ordering::SeqCst) + 1
    }

    // Un verrou empoisonné garde des données cohérentes : chaque écriture est
    // un insert ou un remplacement complet
    fn read(&self) -> RwLockReadGuard<'_, BTreeMap<i64, Stock>> {
        self.stocks.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, BTreeMap<i64, Stock>> {
        self.stocks.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Date courante en millisecondes depuis l'epoch
fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
