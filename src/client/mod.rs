mod error;
mod http;

use serde_json::Value;

pub use error::{Result, TransportError};
pub use http::HttpBackend;

use crate::specs::{PredictionRequest, TrainingRequest};

/// The remote training service.
///
/// The service is stateless with respect to trained models: everything a
/// prediction needs travels inside the request.
#[trait_variant::make(Backend: Send)]
pub trait BackendTemplate {
    /// Should submit a training request and return the service's JSON answer.
    ///
    /// # Arguments
    /// * `request` - The training body.
    ///
    /// # Returns
    /// The response object, or a transport error if no 2xx answer arrived.
    async fn train(&self, request: &TrainingRequest<'_>) -> Result<Value>;

    /// Should submit a prediction request and return the service's JSON answer.
    async fn predict(&self, request: &PredictionRequest<'_>) -> Result<Value>;
}
