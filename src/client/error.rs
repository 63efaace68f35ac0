use std::{error::Error, fmt};

/// The client module's result type.
pub type Result<T> = std::result::Result<T, TransportError>;

type BoxError = Box<dyn Error + Send + Sync>;

/// Failures talking to the training service, as opposed to failures it reports.
#[derive(Debug)]
pub enum TransportError {
    /// The service could not be reached (refused, DNS, reset, ...).
    Unreachable { url: String, source: BoxError },
    /// The service answered with a status outside 200-299.
    Status { url: String, status: u16, body: String },
    /// The service answered with something that is not JSON.
    Decode { url: String, source: BoxError },
}

impl TransportError {
    pub fn unreachable<E: Into<BoxError>>(url: impl Into<String>, source: E) -> Self {
        Self::Unreachable {
            url: url.into(),
            source: source.into(),
        }
    }

    pub fn decode<E: Into<BoxError>>(url: impl Into<String>, source: E) -> Self {
        Self::Decode {
            url: url.into(),
            source: source.into(),
        }
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unreachable { url, source } => {
                write!(f, "service unreachable at {url}: {source}")
            }
            Self::Status { url, status, .. } => {
                write!(f, "service at {url} answered with HTTP status {status}")
            }
            Self::Decode { url, source } => {
                write!(f, "invalid response from {url}: {source}")
            }
        }
    }
}

impl Error for TransportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Unreachable { source, .. } | Self::Decode { source, .. } => Some(source.as_ref()),
            Self::Status { .. } => None,
        }
    }
}
