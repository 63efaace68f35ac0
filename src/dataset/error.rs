use std::{error::Error, fmt, io, path::PathBuf};

/// The dataset module's result type.
pub type Result<T> = std::result::Result<T, DatasetError>;

/// Reasons a training table cannot be turned into a [`Dataset`](crate::specs::Dataset).
///
/// Line indices are zero-based positions in the source text, blank lines included.
#[derive(Debug)]
pub enum DatasetError {
    /// The text holds no non-blank line.
    Empty,
    /// A cell is not a finite number.
    MalformedRow { line: usize, token: String },
    /// A row's width differs from the first row's.
    InconsistentColumnCount {
        line: usize,
        expected: usize,
        actual: usize,
    },
    /// Rows have a label but no feature column.
    InsufficientColumns { columns: usize },
    /// The dataset file could not be read.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "dataset is empty"),
            Self::MalformedRow { line, token } => {
                write!(f, "dataset line {line}: cannot parse '{token}' as a number")
            }
            Self::InconsistentColumnCount {
                line,
                expected,
                actual,
            } => write!(
                f,
                "dataset line {line}: expected {expected} columns, got {actual}"
            ),
            Self::InsufficientColumns { columns } => write!(
                f,
                "dataset needs at least one feature and a label column, got {columns} column(s)"
            ),
            Self::Io { path, source } => {
                write!(f, "cannot read dataset '{}': {source}", path.display())
            }
        }
    }
}

impl Error for DatasetError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
