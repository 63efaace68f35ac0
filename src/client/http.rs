use log::debug;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use super::{
    Backend,
    error::{Result, TransportError},
};
use crate::specs::{PredictionRequest, TrainingRequest};

/// Talks to the training service over HTTP with JSON bodies.
///
/// No timeout is set: a call waits until the service answers or the
/// connection fails.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    train_url: String,
    predict_url: String,
}

impl HttpBackend {
    /// Creates a backend rooted at `base_url`, e.g. `http://127.0.0.1:8080`.
    pub fn new(base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/');
        Self {
            client: Client::new(),
            train_url: format!("{base_url}/train"),
            predict_url: format!("{base_url}/predict"),
        }
    }

    pub fn train_url(&self) -> &str {
        &self.train_url
    }

    pub fn predict_url(&self) -> &str {
        &self.predict_url
    }

    async fn post<B: Serialize + Sync + ?Sized>(&self, url: &str, body: &B) -> Result<Value> {
        debug!(url = url; "posting request");

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| TransportError::unreachable(url, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| TransportError::decode(url, e))
    }
}

impl Backend for HttpBackend {
    async fn train(&self, request: &TrainingRequest<'_>) -> Result<Value> {
        self.post(&self.train_url, request).await
    }

    async fn predict(&self, request: &PredictionRequest<'_>) -> Result<Value> {
        self.post(&self.predict_url, request).await
    }
}
