use std::{error::Error, fmt};

use crate::schema::SchemaError;

/// The request module's result type.
pub type Result<T> = std::result::Result<T, RequestError>;

/// Reasons a training or prediction request cannot be built.
///
/// A failed build never yields a partial request.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestError {
    /// A selection names something the registry does not know.
    Schema(SchemaError),
    /// A required field was not provided or left blank.
    MissingParameter { field: &'static str },
    /// A field could not be coerced to its type or is out of range.
    InvalidParameter { field: &'static str, value: String },
    /// The prediction vector is empty or holds a non-numeric token.
    InvalidPredictionInput { input: String },
    /// No trained model is held to predict with.
    NoTrainedModel,
    /// The prediction vector's width differs from the training rows'.
    PredictionWidthMismatch { expected: usize, got: usize },
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Schema(e) => write!(f, "{e}"),
            Self::MissingParameter { field } => write!(f, "missing parameter: {field}"),
            Self::InvalidParameter { field, value } => {
                write!(f, "invalid value for {field}: '{value}'")
            }
            Self::InvalidPredictionInput { input } => write!(
                f,
                "invalid prediction input '{input}': expected comma-separated numbers"
            ),
            Self::NoTrainedModel => write!(f, "no trained model, train one first"),
            Self::PredictionWidthMismatch { expected, got } => write!(
                f,
                "prediction vector has {got} value(s), the model was trained on {expected} feature(s)"
            ),
        }
    }
}

impl Error for RequestError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Schema(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SchemaError> for RequestError {
    fn from(value: SchemaError) -> Self {
        Self::Schema(value)
    }
}
