use std::{error::Error, fmt};

use serde_json::Value;

use crate::{client::TransportError, dataset::DatasetError, request::RequestError, schema::SchemaError};

/// The session's result type.
pub type Result<T> = std::result::Result<T, SessionError>;

/// The action a rejected call was attempting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Train,
    Predict,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Train => f.write_str("training"),
            Self::Predict => f.write_str("prediction"),
        }
    }
}

/// Which side of the wire a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Detected locally, nothing was sent.
    Input,
    /// The service could not be reached or did not answer with 2xx.
    Transport,
    /// The service answered but reported a failure.
    Service,
}

/// All errors a training session can surface.
///
/// Every error is terminal only for the action that raised it; the session
/// stays usable afterwards.
#[derive(Debug)]
pub enum SessionError {
    /// Training was requested before choosing an algorithm.
    NoAlgorithmSelected,
    /// Training was requested without a dataset.
    NoDatasetProvided,
    /// The same action is already in flight.
    Busy(Action),
    /// The dataset text could not be turned into a table.
    Dataset(DatasetError),
    /// A parameter, prediction vector or selection was rejected.
    Request(RequestError),
    /// The service could not be reached.
    Transport(TransportError),
    /// The service answered with a non-success status.
    Service { message: String, response: Value },
}

impl SessionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Transport(_) => ErrorKind::Transport,
            Self::Service { .. } => ErrorKind::Service,
            _ => ErrorKind::Input,
        }
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoAlgorithmSelected => write!(f, "no algorithm selected"),
            Self::NoDatasetProvided => write!(f, "no dataset provided"),
            Self::Busy(action) => write!(f, "a {action} is already in progress"),
            Self::Dataset(e) => write!(f, "invalid dataset: {e}"),
            Self::Request(e) => write!(f, "{e}"),
            Self::Transport(e) => write!(f, "{e}"),
            Self::Service { message, .. } => write!(f, "service error: {message}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Dataset(e) => Some(e),
            Self::Request(e) => Some(e),
            Self::Transport(e) => Some(e),
            _ => None,
        }
    }
}

impl From<DatasetError> for SessionError {
    fn from(e: DatasetError) -> Self {
        Self::Dataset(e)
    }
}

impl From<RequestError> for SessionError {
    fn from(e: RequestError) -> Self {
        Self::Request(e)
    }
}

impl From<SchemaError> for SessionError {
    fn from(e: SchemaError) -> Self {
        Self::Request(e.into())
    }
}

impl From<TransportError> for SessionError {
    fn from(e: TransportError) -> Self {
        Self::Transport(e)
    }
}
