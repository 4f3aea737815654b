pub mod http;

use async_trait::async_trait;
use log::{ error, warn };
use thiserror::Error;
use crate::models::wire::{ ChatOutcome, ChatRequest, ChatResponse };

pub use self::http::HttpTransport;

/// Network and body-parse failures are one kind to callers.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("invalid response body: {0}")]
    Body(#[from] serde_json::Error),
    #[error("invalid endpoint: {0}")]
    Endpoint(#[from] url::ParseError),
}

#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, TransportError>;
}

/// Sends one request and folds every failure into `ChatOutcome::Failed`.
pub async fn dispatch(transport: &dyn ChatTransport, request: &ChatRequest) -> ChatOutcome {
    match transport.send(request).await {
        Ok(resp) => {
            if let Some(err) = resp.error.as_ref() {
                warn!("Server reported an error for {} request: {}", request.mode, err);
            }
            ChatOutcome::from(resp)
        }
        Err(e) => {
            error!("Error: {}", e);
            ChatOutcome::Failed { reason: e.to_string() }
        }
    }
}
