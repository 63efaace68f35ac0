use std::{error::Error, fmt};

/// The schema module's result type.
pub type Result<T> = std::result::Result<T, SchemaError>;

/// A selection named something outside the closed sets the registry knows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    UnknownAlgorithm(String),
    UnknownCostFunction(String),
    UnknownOptimizer(String),
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownAlgorithm(name) => write!(f, "unknown algorithm: {name}"),
            Self::UnknownCostFunction(name) => write!(f, "unknown cost function: {name}"),
            Self::UnknownOptimizer(name) => write!(f, "unknown optimizer: {name}"),
        }
    }
}

impl Error for SchemaError {}
