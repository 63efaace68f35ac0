mod builder;
mod error;
mod resolved;

pub use builder::{RawFields, RequestBuilder, parse_vector};
pub use error::{RequestError, Result};
pub use resolved::Resolved;
