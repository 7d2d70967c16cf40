//! The core of optgraph: resolves a command line against options, mutually exclusive groups,
//! requirement and incompatibility constraints, and sub-commands.
//!
//! ```
//! use optgraph_parser::{ArgumentBuilder, OptionBuilder, ParserBuilder};
//!
//! let mut builder = ParserBuilder::new();
//! let conf = builder.option(
//!     OptionBuilder::new("-c", "--conf").argument(ArgumentBuilder::new("file")),
//! );
//! builder.option(OptionBuilder::new("-l", "--list").requires(conf));
//! builder.option(OptionBuilder::property("-D"));
//!
//! let parser = builder.build().unwrap();
//! let args = parser.parse(["-l", "--conf", "app.ini", "-Dmode=fast"]).unwrap();
//!
//! assert_eq!(args.get_value("-c"), Some("app.ini"));
//! assert_eq!(args.get_property("-D", "mode"), Some("fast"));
//! ```

pub mod argument;
pub mod command;
pub mod error;
pub mod graph;
pub mod group;
pub mod lexer;
pub mod matches;
pub mod option;
pub mod parser;
pub mod utils;
pub mod validator;

pub use argument::{Argument, ArgumentBuilder, ValueStyle};
pub use command::Command;
pub use error::{ConfigError, Error, ErrorKind};
pub use graph::ConstraintGraph;
pub use group::{ExclusiveGroup, ExclusiveGroupBuilder};
pub use lexer::{Token, TokenStream, normalize};
pub use matches::ParsedArgs;
pub use option::{OptionBuilder, OptionId, OptionSpec};
pub use parser::{Entry, Parser, ParserBuilder};
pub use validator::{ValidationError, Validator};
