//! Stock validators for optgraph arguments.
//!
//! Every validator implements [`optgraph_parser::Validator`] and is attached to an argument with
//! [`ArgumentBuilder::validator`](optgraph_parser::ArgumentBuilder::validator).

pub mod choice;
pub mod file;
pub mod integer;
pub mod string;
pub mod url;

pub use choice::ChoiceValidator;
pub use file::FileValidator;
pub use integer::{IntegerValidator, IntegerValidatorBuilder};
pub use string::{StringValidator, StringValidatorBuilder};
pub use url::UrlValidator;

/// Defines the errors that may occur when building a validator.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BuildError {
    /// A choice validator needs at least one accepted value.
    #[error("list of accepted values can't be empty")]
    EmptyChoices,

    /// The pattern of a string validator does not compile.
    #[error("invalid pattern")]
    InvalidPattern(#[from] regex::Error),

    /// Integers are parsed with a radix between 2 and 36.
    #[error("invalid radix {0}, expected 2 to 36")]
    InvalidRadix(u32),

    /// The lower bound is greater than the upper bound.
    #[error("empty range, minimum {min} is greater than maximum {max}")]
    EmptyRange {
        /// The lower bound.
        min: i64,

        /// The upper bound.
        max: i64,
    },
}
