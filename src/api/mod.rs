use serde::{Deserialize, Serialize};

#[derive(Serialize, Clone)]
pub struct ChatRequest {
    pub message: String,
}

/// Reply shape of the chat endpoint. The demo backend decorates replies
/// with the serving model and a timestamp; only `message` is required.
#[derive(Deserialize)]
pub struct ChatReply {
    pub message: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// One catalog entry from the model registry endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelEntry {
    pub id: String,
    pub name: String,
    pub provider: String,
}

#[derive(Deserialize)]
pub struct HealthReply {
    pub status: String,
}

pub mod client;

pub use client::{Backend, BackendResult, HttpBackend};
