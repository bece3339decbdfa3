// ============================================================================
// Structure : App (conteneur racine)
// ============================================================================
// Possède la liste des stocks et le cycle de vie de l'unique requête qui la
// remplit.
//
// CONCEPTS RUST :
// 1. State Management : la liste est un simple champ, modifié uniquement
//    quand la réponse de la requête est appliquée
// 2. Background task : la requête tourne dans une tâche tokio détachée
// 3. Channel oneshot : la tâche renvoie son résultat à App
//    - Si App est détruite avant la réponse, le receiver disparaît avec elle
//      et le résultat est jeté (jamais appliqué à une vue détruite)
//
// CYCLE DE VIE :
//   new() -> liste vide
//   component_did_mount() -> une seule requête GET /api/stocks
//   poll_response() / settle() -> remplace la liste si succès
// ============================================================================

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::api::{Request, RestClient, STOCKS_PATH};
use crate::models::Stock;
use crate::ui::{render_stock_list, DateTimeFormat, Element};

/// Résultat renvoyé par la tâche de chargement
type LoadResult = Result<Vec<Stock>>;

/// Tâche de chargement : `true` si son résultat a atteint App
pub type Delivery = JoinHandle<bool>;

/// Conteneur racine du front-end
pub struct App {
    /// Liste affichée, remplacée en bloc par une réponse réussie
    stocks: Vec<Stock>,

    /// Vrai une fois component_did_mount() appelé
    mounted: bool,

    /// Réponse attendue de la requête en vol
    pending: Option<oneshot::Receiver<LoadResult>>,

    /// Locale et fuseau de la colonne LastUpdate
    format: DateTimeFormat,
}

impl App {
    /// Crée le conteneur avec une liste vide
    pub fn new(format: DateTimeFormat) -> Self {
        Self {
            stocks: Vec::new(),
            mounted: false,
            pending: None,
            format,
        }
    }

    /// Lance la requête de chargement (une seule fois par montage)
    ///
    /// La requête tourne dans une tâche tokio ; appeler `poll_response()` ou
    /// `settle()` pour appliquer sa réponse.
    ///
    /// # Retourne
    /// * `Some(delivery)` si la requête a été lancée : la tâche se termine
    ///   avec `true` si le résultat a été remis à App, `false` s'il a été jeté
    /// * `None` si déjà monté
    pub fn component_did_mount<C>(&mut self, client: Arc<C>) -> Option<Delivery>
    where
        C: RestClient + ?Sized + 'static,
    {
        if self.mounted {
            debug!("App already mounted, skipping fetch");
            return None;
        }
        self.mounted = true;

        let (result_tx, result_rx) = oneshot::channel();
        self.pending = Some(result_rx);

        info!(path = STOCKS_PATH, "Fetching stocks");
        let delivery = tokio::spawn(async move {
            let result = load_stocks(client.as_ref()).await;
            let delivered = result_tx.send(result).is_ok();
            if !delivered {
                // Le receiver a été détruit avec App : rien à mettre à jour
                debug!("App dropped before the stock response arrived, discarding it");
            }
            delivered
        });

        Some(delivery)
    }

    /// Applique la réponse si elle est arrivée, sans attendre
    ///
    /// CONCEPT : Non-blocking receive avec try_recv
    /// - Ok(result) : applique le résultat
    /// - Empty : pas encore de réponse
    /// - Closed : la tâche a disparu sans répondre
    ///
    /// # Retourne
    /// * `true` si la liste a changé (il faut redessiner)
    pub fn poll_response(&mut self) -> bool {
        let Some(receiver) = self.pending.as_mut() else {
            return false;
        };

        match receiver.try_recv() {
            Ok(result) => {
                self.pending = None;
                self.apply(result)
            }
            Err(oneshot::error::TryRecvError::Empty) => false,
            Err(oneshot::error::TryRecvError::Closed) => {
                self.pending = None;
                warn!("Stock request ended without a result");
                false
            }
        }
    }

    /// Attend la réponse de la requête en vol et l'applique
    ///
    /// # Retourne
    /// * `true` si la liste a changé (il faut redessiner)
    pub async fn settle(&mut self) -> bool {
        let Some(receiver) = self.pending.take() else {
            return false;
        };

        match receiver.await {
            Ok(result) => self.apply(result),
            Err(_) => {
                warn!("Stock request ended without a result");
                false
            }
        }
    }

    /// Remplace la liste en cas de succès ; un échec est journalisé et ignoré
    fn apply(&mut self, result: LoadResult) -> bool {
        match result {
            Ok(stocks) => {
                info!(count = stocks.len(), "Stocks loaded");
                self.stocks = stocks;
                true
            }
            Err(e) => {
                warn!(error = ?e, "Failed to load stocks, keeping the current list");
                false
            }
        }
    }

    /// Liste actuellement affichée
    pub fn stocks(&self) -> &[Stock] {
        &self.stocks
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Vrai tant qu'une réponse est attendue
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Dessine l'arbre : le tableau des stocks
    pub fn render(&self) -> Element {
        render_stock_list(&self.stocks, &self.format)
    }
}

/// Exécute `GET /api/stocks` et décode le corps en liste de stocks
///
/// Erreurs : requête échouée, statut non-2xx, corps illisible
async fn load_stocks<C>(client: &C) -> LoadResult
where
    C: RestClient + ?Sized,
{
    let response = client
        .call(Request::get(STOCKS_PATH))
        .await
        .context("Échec de la requête des stocks")?;

    if !response.is_success() {
        bail!("GET {} returned HTTP {}", STOCKS_PATH, response.status);
    }

    serde_json::from_value(response.entity)
        .with_context(|| format!("Réponse de {} illisible", STOCKS_PATH))
}

// ============================================================================
// Tests
// ============================================================================
