mod error;
mod parser;

pub use error::{DatasetError, Result};
pub use parser::{parse, parse_file, read_file};

pub(crate) use parser::parse_number;
