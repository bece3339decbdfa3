// ============================================================================
// MockClient : collaborateur HTTP simulé
// ============================================================================
// Réponse figée ou échec réseau, compteur d'appels, et une barrière optionnelle
// qui retient la réponse jusqu'à ce que le test la libère.
// ============================================================================

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::api::client::{Request, Response, RestClient};

pub(crate) struct MockClient {
    outcome: Result<Response, String>,
    calls: AtomicUsize,
    requests: Mutex<Vec<Request>>,
    gate: Option<Arc<Notify>>,
    completed: AtomicUsize,
}

impl MockClient {
    /// Répond 200 avec le corps JSON donné
    pub(crate) fn ok(entity: serde_json::Value) -> Self {
        Self::responding(Response::new(200, entity))
    }

    /// Répond avec la réponse donnée
    pub(crate) fn responding(response: Response) -> Self {
        Self {
            outcome: Ok(response),
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
            gate: None,
            completed: AtomicUsize::new(0),
        }
    }

    /// Échoue comme une erreur réseau
    pub(crate) fn failing(message: &str) -> Self {
        Self {
            outcome: Err(message.to_string()),
            ..Self::ok(serde_json::Value::Null)
        }
    }

    /// Retient chaque réponse jusqu'à `gate.notify_one()`
    pub(crate) fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Nombre d'appels arrivés au bout (barrière franchie)
    pub(crate) fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }

    pub(crate) fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl RestClient for MockClient {
    async fn call(&self, request: Request) -> anyhow::Result<Response> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request);

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.completed.fetch_add(1, Ordering::SeqCst);

        match &self.outcome {
            Ok(response) => Ok(response.clone()),
            Err(message) => Err(anyhow::anyhow!("{}", message)),
        }
    }
}
