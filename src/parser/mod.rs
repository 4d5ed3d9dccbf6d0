//! Command-line input validation.
//!
//! Only one kind of input exists: the URL of the file to fetch. See
//! [`validate_url`] for the accepted grammar.

mod error;
mod url;

pub use error::ParseError;
pub use self::url::{is_valid_url, validate_url};
