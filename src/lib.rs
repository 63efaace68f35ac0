//! Client for a remote train/predict service.
//!
//! Operators pick an algorithm, fill in its parameters and provide a CSV
//! training table. The session validates all of it locally, submits a
//! training request, keeps the returned model and sends it back with every
//! prediction request, since the service itself holds no models.

pub mod client;
pub mod config;
pub mod dataset;
pub mod error;
pub mod request;
pub mod schema;
pub mod selection;
mod session;
pub mod specs;

pub use client::{Backend, HttpBackend, TransportError};
pub use config::ClientConfig;
pub use error::{ErrorKind, SessionError};
pub use selection::Selection;
pub use session::{SessionState, TrainingSession};

/// Opens a session against the service described by `config`.
pub fn connect(config: &ClientConfig) -> TrainingSession<HttpBackend> {
    log::info!("using training service at {}", config.base_url);
    TrainingSession::new(HttpBackend::new(&config.base_url), config)
}
