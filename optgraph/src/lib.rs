//! optgraph, a declarative command line parser driven by an option constraint graph.
//!
//! Options are declared once, related by requirements and incompatibilities, grouped into
//! mutually exclusive sets, and gated by sub-commands. A configured [`Parser`] then turns a
//! command line into [`ParsedArgs`], or into the first constraint it violates.
#![deny(missing_docs)]

pub use optgraph_parser as parser;
pub use optgraph_validators as validators;

pub use parser::{
    ArgumentBuilder, Command, ExclusiveGroupBuilder, OptionBuilder, OptionId, ParsedArgs, Parser,
    ParserBuilder,
};

/// Defines the possible errors that may occur during usage of the crate.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// An error comes from the parsing of arguments.
    #[error(transparent)]
    Parser(#[from] parser::Error),

    /// The parser configuration is invalid.
    #[error(transparent)]
    Config(#[from] parser::ConfigError),

    /// A stock validator could not be built.
    #[error(transparent)]
    Validator(#[from] validators::BuildError),
}

/// Parse the arguments of the current process, without the program name.
pub fn parse_env(parser: &Parser) -> Result<ParsedArgs, Error> {
    Ok(parser.parse(std::env::args().skip(1))?)
}
