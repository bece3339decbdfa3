// ============================================================================
// Collaborateur HTTP
// ============================================================================
// Le front-end ne parle jamais directement à reqwest : il décrit une requête
// {method, path} et reçoit une réponse {status, entity}.
//
// CONCEPTS RUST :
// 1. Trait async (async-trait) : plusieurs implémentations interchangeables
//    - HttpClient : vrai appel réseau (reqwest)
//    - LocalClient : appel en mémoire côté serveur
//    - MockClient : réponses simulées dans les tests
// 2. Send + Sync : le client est partagé via Arc avec la tâche tokio
// ============================================================================

use std::fmt;

use async_trait::async_trait;

/// Méthode HTTP d'une requête
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
}

impl Method {
    /// Nom de la méthode tel qu'écrit sur le fil
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Description d'une requête : méthode + chemin (+ corps JSON optionnel)
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub body: Option<serde_json::Value>,
}

impl Request {
    /// Raccourci pour une requête GET
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            body: None,
        }
    }

    /// Requête POST avec un corps JSON
    pub fn post(path: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            body: Some(body),
        }
    }

    /// Requête PUT avec un corps JSON
    pub fn put(path: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            method: Method::Put,
            path: path.into(),
            body: Some(body),
        }
    }
}

/// Réponse reçue : statut HTTP + corps JSON décodé
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: u16,

    /// Corps de la réponse (`Value::Null` si vide)
    pub entity: serde_json::Value,
}

impl Response {
    pub fn new(status: u16, entity: serde_json::Value) -> Self {
        Self { status, entity }
    }

    /// Vrai pour un statut 2xx
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Effectue une requête HTTP et renvoie sa réponse
///
/// Une erreur (`Err`) signifie que la requête n'a pas abouti (réseau, corps
/// illisible). Un statut d'erreur HTTP reste une `Response` : c'est à
/// l'appelant de décider quoi en faire.
#[async_trait]
pub trait RestClient: Send + Sync {
    async fn call(&self, request: Request) -> anyhow::Result<Response>;
}
