//! Sub-commands dispatching the rest of the command line to a nested parser.

use core::fmt;

use tracing::debug;

use crate::error::Error;
use crate::lexer::TokenStream;
use crate::matches::ParsedArgs;
use crate::parser::Parser;

/// A positional sub-command (e.g. `git checkout`).
///
/// A command only matches the leading token. Everything after it belongs to its own parser.
#[derive(Debug)]
pub struct Command {
    short: String,
    long: String,
    description: String,
    parser: Parser,
}

impl Command {
    /// Create a command with a short and a long name, parsing its options with `parser`.
    pub fn new(short: impl Into<String>, long: impl Into<String>, parser: Parser) -> Self {
        Command {
            short: short.into(),
            long: long.into(),
            description: String::new(),
            parser,
        }
    }

    /// Create a command with a single name.
    pub fn single(name: impl Into<String>, parser: Parser) -> Self {
        let name = name.into();
        Self::new(name.clone(), name, parser)
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// The short name.
    pub fn short(&self) -> &str {
        &self.short
    }

    /// The long name.
    pub fn long(&self) -> &str {
        &self.long
    }

    /// The description, for help.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The parser of the command options.
    pub fn parser(&self) -> &Parser {
        &self.parser
    }

    /// Check if the command name is the leading token.
    pub fn is_present(&self, tokens: &TokenStream) -> bool {
        self.matches(tokens.first())
    }

    pub(crate) fn matches(&self, name: Option<&str>) -> bool {
        name.is_some_and(|name| name == self.short || name == self.long)
    }

    /// Remove the command name and hand every remaining token to the nested parser.
    pub(crate) fn consume(
        &self,
        tokens: &mut TokenStream,
        out: &mut ParsedArgs,
    ) -> Result<(), Error> {
        if !self.is_present(tokens) {
            return Ok(());
        }

        tokens.remove(0);
        out.select_command(&self.short, &self.long);

        let rest = tokens.take();
        debug!(command = %self.long, remaining = rest.len(), "dispatching to command");

        self.parser.parse_stream(rest, out)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.short == self.long {
            write!(f, "{}", self.long)
        } else {
            write!(f, "{} ({})", self.long, self.short)
        }
    }
}
