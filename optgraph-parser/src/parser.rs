//! A parser resolving a command line against configured options, groups and commands.

use core::fmt;
use std::collections::HashSet;

use tracing::debug;

use crate::command::Command;
use crate::error::{ConfigError, Error};
use crate::graph::ConstraintGraph;
use crate::group::ExclusiveGroup;
use crate::lexer::TokenStream;
use crate::matches::ParsedArgs;
use crate::option::{Consume, OptionBuilder, OptionId, OptionSpec, Scope};

/// Something consumed at the top level of a parser.
#[derive(Debug)]
enum Item {
    Option(OptionId),
    Group(ExclusiveGroup),
}

impl Consume for Item {
    fn is_present(&self, scope: Scope<'_>, tokens: &TokenStream) -> bool {
        match self {
            Item::Option(id) => id.is_present(scope, tokens),
            Item::Group(group) => group.is_present(scope, tokens),
        }
    }

    fn consume(
        &self,
        scope: Scope<'_>,
        tokens: &mut TokenStream,
        out: &mut ParsedArgs,
    ) -> Result<(), Error> {
        match self {
            Item::Option(id) => id.consume(scope, tokens, out),
            Item::Group(group) => group.consume(scope, tokens, out),
        }
    }
}

/// A top-level entry of a parser, for help and usage collaborators.
#[derive(Clone, Debug)]
pub enum Entry<'a> {
    /// A plain option.
    Option(&'a OptionSpec),

    /// A mutually exclusive group and its options.
    Group {
        /// The group.
        group: &'a ExclusiveGroup,

        /// The options of the group, in the order they were added.
        options: Vec<&'a OptionSpec>,
    },
}

impl fmt::Display for Entry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::Option(option) => write!(f, "{option}"),
            Entry::Group { options, .. } => {
                write!(f, "[")?;
                for (i, option) in options.iter().enumerate() {
                    if i > 0 {
                        write!(f, " | ")?;
                    }
                    write!(f, "{option}")?;
                }
                write!(f, "]")
            }
        }
    }
}

/// A configured parser. It holds no per-parse state and can be reused.
#[derive(Debug)]
pub struct Parser {
    options: Vec<OptionSpec>,
    graph: ConstraintGraph,
    items: Vec<Item>,
    commands: Vec<Command>,
}

impl Parser {
    /// Parse the command line, without the program name.
    pub fn parse<I, S>(&self, argv: I) -> Result<ParsedArgs, Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tokens = TokenStream::from_argv(argv);
        debug!(tokens = tokens.len(), "parsing command line");

        let mut out = ParsedArgs::default();
        self.parse_stream(tokens, &mut out)?;

        debug!(command = ?out.command(), "parsed command line");
        Ok(out)
    }

    /// Resolve a normalized stream, recording into `out`.
    pub(crate) fn parse_stream(
        &self,
        mut tokens: TokenStream,
        out: &mut ParsedArgs,
    ) -> Result<(), Error> {
        if !self.commands.is_empty() {
            let Some(first) = tokens.first() else {
                return Err(Error::NoCommandSpecified);
            };

            let Some(command) = self.commands.iter().find(|c| c.matches(Some(first))) else {
                return Err(Error::UnknownCommand {
                    token: first.to_string(),
                });
            };

            command.consume(&mut tokens, out)?;
        }

        let scope = self.scope();
        for item in &self.items {
            item.consume(scope, &mut tokens, out)?;
        }

        if !tokens.is_empty() {
            return Err(Error::UnexpectedTokens {
                tokens: tokens.into_vec(),
            });
        }

        Ok(())
    }

    /// The declared option behind a handle.
    pub fn option(&self, id: OptionId) -> Option<&OptionSpec> {
        self.options.get(id.0)
    }

    /// Every declared option, in declaration order.
    pub fn options(&self) -> &[OptionSpec] {
        &self.options
    }

    /// The relations between the declared options.
    pub fn graph(&self) -> &ConstraintGraph {
        &self.graph
    }

    /// The top-level options and groups, in registration order.
    pub fn entries(&self) -> impl Iterator<Item = Entry<'_>> {
        self.items.iter().map(|item| match item {
            Item::Option(id) => Entry::Option(&self.options[id.0]),
            Item::Group(group) => Entry::Group {
                group,
                options: group.options().iter().map(|id| &self.options[id.0]).collect(),
            },
        })
    }

    /// The commands, in registration order.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    fn scope(&self) -> Scope<'_> {
        Scope {
            options: &self.options,
            graph: &self.graph,
        }
    }
}

/// Builder of a [`Parser`].
///
/// Options are declared first and addressed by their [`OptionId`]. Declaring an option does not
/// make the parser look for it: it must be registered at the top level or in a group.
#[derive(Debug, Default)]
pub struct ParserBuilder {
    options: Vec<OptionSpec>,
    requires: Vec<(OptionId, OptionId)>,
    incompatible: Vec<(OptionId, OptionId)>,
    stray_separators: Vec<OptionId>,
    items: Vec<Item>,
    commands: Vec<Command>,
}

impl ParserBuilder {
    /// Start building an empty parser.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an option without registering it.
    pub fn declare(&mut self, option: OptionBuilder) -> OptionId {
        let id = OptionId(self.options.len());

        let OptionBuilder {
            spec,
            requires,
            incompatible,
            stray_separator,
        } = option;

        if stray_separator {
            self.stray_separators.push(id);
        }

        self.options.push(spec);
        self.requires.extend(requires.into_iter().map(|other| (id, other)));
        self.incompatible
            .extend(incompatible.into_iter().map(|other| (id, other)));

        id
    }

    /// Declare an option and register it at the top level.
    pub fn option(&mut self, option: OptionBuilder) -> OptionId {
        let id = self.declare(option);
        self.items.push(Item::Option(id));
        id
    }

    /// Register a declared option at the top level.
    pub fn with_option(&mut self, id: OptionId) -> &mut Self {
        self.items.push(Item::Option(id));
        self
    }

    /// Register a mutually exclusive group at the top level.
    pub fn group(&mut self, group: impl Into<ExclusiveGroup>) -> &mut Self {
        self.items.push(Item::Group(group.into()));
        self
    }

    /// Require `required` whenever `option` is given.
    pub fn requires(&mut self, option: OptionId, required: OptionId) -> &mut Self {
        self.requires.push((option, required));
        self
    }

    /// Forbid `a` and `b` together.
    pub fn incompatible(&mut self, a: OptionId, b: OptionId) -> &mut Self {
        self.incompatible.push((a, b));
        self
    }

    /// Add a command.
    pub fn command(&mut self, command: Command) -> &mut Self {
        self.commands.push(command);
        self
    }

    /// Validate the configuration and build the parser.
    pub fn build(self) -> Result<Parser, ConfigError> {
        let ParserBuilder {
            options,
            requires,
            incompatible,
            stray_separators,
            items,
            commands,
        } = self;

        check_names(&options)?;
        if let Some(id) = stray_separators.first() {
            let name = options[id.0].long().to_string();
            return Err(ConfigError::SeparatorWithoutProperty(name));
        }
        for option in &options {
            if let Some(argument) = option.argument() {
                argument.check(option.long())?;
            }
        }

        let mut graph = ConstraintGraph::default();
        for _ in &options {
            graph.add_node();
        }

        let known = |id: OptionId| {
            if graph.contains(id) {
                Ok(id)
            } else {
                Err(ConfigError::UnknownOption(id.0))
            }
        };

        for &(option, required) in &requires {
            known(option)?;
            known(required)?;
        }
        for &(a, b) in &incompatible {
            known(a)?;
            known(b)?;
        }
        for item in &items {
            match item {
                Item::Option(id) => {
                    known(*id)?;
                }
                Item::Group(group) if group.options().is_empty() => {
                    return Err(ConfigError::EmptyGroup);
                }
                Item::Group(group) => {
                    for &id in group.options() {
                        known(id)?;
                    }
                }
            }
        }

        for (option, required) in requires {
            graph.add_requirement(option, required);
        }
        for (a, b) in incompatible {
            graph.add_incompatibility(a, b);
        }
        graph.check(&options)?;

        let mut names = HashSet::new();
        for command in &commands {
            insert_names(&mut names, command.short(), command.long())
                .map_err(|name| ConfigError::DuplicateCommand(name.to_string()))?;
        }

        Ok(Parser {
            options,
            graph,
            items,
            commands,
        })
    }
}

fn check_names(options: &[OptionSpec]) -> Result<(), ConfigError> {
    let mut names = HashSet::new();

    for option in options {
        insert_names(&mut names, option.short(), option.long())
            .map_err(|name| ConfigError::DuplicateName(name.to_string()))?;
    }

    Ok(())
}

/// Insert both spellings, returning the first one already taken.
fn insert_names<'a>(
    names: &mut HashSet<&'a str>,
    short: &'a str,
    long: &'a str,
) -> Result<(), &'a str> {
    if !names.insert(short) {
        return Err(short);
    }
    if long != short && !names.insert(long) {
        return Err(long);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use core::result::Result;

    use googletest::prelude::*;

    use crate::argument::ArgumentBuilder;
    use crate::error::ErrorKind;
    use crate::group::ExclusiveGroupBuilder;
    use crate::validator::ValidationError;

    use super::*;

    fn conf_and_list() -> Parser {
        let mut builder = ParserBuilder::new();
        let conf = builder.option(
            OptionBuilder::new("-c", "--conf")
                .mandatory(true)
                .argument(ArgumentBuilder::new("file")),
        );
        builder.option(OptionBuilder::new("-l", "--list").requires(conf));
        builder.build().expect("valid parser")
    }

    #[test]
    fn it_should_parse_options_in_any_order() {
        let parser = conf_and_list();

        let args = parser.parse(["--list", "--conf", "a.ini"]).unwrap();
        assert_that!(args.has_option("-l"), eq(true));
        assert_that!(args.get_value("-c"), eq(Some("a.ini")));

        let args = parser.parse(["-c", "a.ini", "-l"]).unwrap();
        assert_that!(args.has_option("--list"), eq(true));
    }

    #[test]
    fn it_should_report_leftover_tokens() {
        let parser = conf_and_list();
        let err = parser.parse(["stray", "-c", "a.ini", "-x"]).unwrap_err();

        assert_that!(
            err,
            eq(&Error::UnexpectedTokens {
                tokens: vec!["stray".into(), "-x".into()]
            })
        );

        // A second value right after the option is one too many, not a leftover.
        let err = parser.parse(["-c", "a.ini", "b.ini"]).unwrap_err();
        assert_that!(err.kind(), eq(ErrorKind::TooManyArgumentRepetitions));
    }

    #[test]
    fn it_should_accept_mandatory_option_consumed_by_dependent() {
        let mut builder = ParserBuilder::new();
        let conf = builder.declare(OptionBuilder::new("-c", "--conf").mandatory(true));
        builder.option(OptionBuilder::new("-l", "--list").requires(conf));
        builder.with_option(conf);
        let parser = builder.build().unwrap();

        let args = parser.parse(["-l", "-c"]).unwrap();
        assert_that!(args.has_option("--list"), eq(true));
        assert_that!(args.has_option("--conf"), eq(true));

        let err = parser.parse(Vec::<String>::new()).unwrap_err();
        assert_that!(err.kind(), eq(ErrorKind::MissingMandatoryOption));
    }

    #[test]
    fn it_should_keep_property_validators_with_custom_separator() {
        let mut builder = ParserBuilder::new();
        builder.option(
            OptionBuilder::property("-P")
                .argument(ArgumentBuilder::property().validator(
                    |_: &str| -> Result<(), ValidationError> {
                        Err(ValidationError::new("rejected"))
                    },
                ))
                .separator(":"),
        );
        let parser = builder.build().unwrap();

        let err = parser.parse(["-Phost:anything"]).unwrap_err();
        assert_that!(err.kind(), eq(ErrorKind::ValidationFailure));

        let err = parser.parse(["-Phost=anything"]).unwrap_err();
        assert_that!(err.kind(), eq(ErrorKind::MalformedPropertyValue));
    }

    #[test]
    fn it_should_reject_separator_without_property() {
        let mut builder = ParserBuilder::new();
        builder.option(
            OptionBuilder::new("-c", "--conf")
                .argument(ArgumentBuilder::new("file"))
                .separator(":"),
        );

        assert_that!(
            builder.build().unwrap_err(),
            eq(&ConfigError::SeparatorWithoutProperty("--conf".into()))
        );

        let mut builder = ParserBuilder::new();
        builder.option(OptionBuilder::new("-v", "--verbose").separator(":"));

        assert_that!(
            builder.build().unwrap_err(),
            eq(&ConfigError::SeparatorWithoutProperty("--verbose".into()))
        );
    }

    #[test]
    fn it_should_parse_bundled_values() {
        let mut builder = ParserBuilder::new();
        builder.option(OptionBuilder::single("-n").argument(ArgumentBuilder::new("count")));
        let parser = builder.build().unwrap();

        let args = parser.parse(["-n42"]).unwrap();

        assert_that!(args.get_value("-n"), eq(Some("42")));
    }

    #[test]
    fn it_should_consume_groups_in_registration_order() {
        let mut builder = ParserBuilder::new();
        let help = builder.declare(OptionBuilder::new("-h", "--help"));
        let version = builder.declare(OptionBuilder::new("-v", "--version"));
        builder.group(
            ExclusiveGroupBuilder::new()
                .option(help)
                .option(version)
                .mandatory(true),
        );
        let parser = builder.build().unwrap();

        let args = parser.parse(["-v"]).unwrap();
        assert_that!(args.has_option("--version"), eq(true));
        assert_that!(args.has_option("--help"), eq(false));

        let err = parser.parse(["-v", "-h"]).unwrap_err();
        assert_that!(err.kind(), eq(ErrorKind::IncompatibleOptionsPresent));

        let err = parser.parse(Vec::<String>::new()).unwrap_err();
        assert_that!(err.kind(), eq(ErrorKind::MissingMandatoryOption));
    }

    #[test]
    fn it_should_require_a_command() {
        let mut builder = ParserBuilder::new();
        builder.command(Command::single("status", ParserBuilder::new().build().unwrap()));
        let parser = builder.build().unwrap();

        let err = parser.parse(Vec::<String>::new()).unwrap_err();
        assert_that!(err.kind(), eq(ErrorKind::NoCommandSpecified));

        let err = parser.parse(["push"]).unwrap_err();
        assert_that!(err, eq(&Error::UnknownCommand { token: "push".into() }));

        let err = parser.parse(["-v", "status"]).unwrap_err();
        assert_that!(err.kind(), eq(ErrorKind::UnknownCommand));

        let args = parser.parse(["status"]).unwrap();
        assert_that!(args.command(), eq(Some("status")));
    }

    #[test]
    fn it_should_reject_unknown_handles() {
        let mut other = ParserBuilder::new();
        other.declare(OptionBuilder::single("-a"));
        let foreign = other.declare(OptionBuilder::single("-b"));

        let mut builder = ParserBuilder::new();
        builder.option(OptionBuilder::single("-a").requires(foreign));

        assert_that!(
            builder.build().unwrap_err(),
            eq(&ConfigError::UnknownOption(1))
        );
    }

    #[test]
    fn it_should_reject_contradictory_configuration() {
        let mut builder = ParserBuilder::new();
        let a = builder.option(OptionBuilder::new("-a", "--all"));
        let b = builder.option(OptionBuilder::new("-b", "--brief"));
        builder.requires(a, b).incompatible(b, a);

        assert_that!(
            builder.build().unwrap_err(),
            eq(&ConfigError::ContradictoryConstraint("--all".into(), "--brief".into()))
        );
    }

    #[test]
    fn it_should_reject_duplicate_names() {
        let mut builder = ParserBuilder::new();
        builder.option(OptionBuilder::new("-v", "--verbose"));
        builder.option(OptionBuilder::new("-V", "--verbose"));

        assert_that!(
            builder.build().unwrap_err(),
            eq(&ConfigError::DuplicateName("--verbose".into()))
        );

        let mut builder = ParserBuilder::new();
        builder.command(Command::new("co", "checkout", ParserBuilder::new().build().unwrap()));
        builder.command(Command::new("co", "commit", ParserBuilder::new().build().unwrap()));

        assert_that!(
            builder.build().unwrap_err(),
            eq(&ConfigError::DuplicateCommand("co".into()))
        );
    }

    #[test]
    fn it_should_reject_empty_group() {
        let mut builder = ParserBuilder::new();
        builder.group(ExclusiveGroupBuilder::new());

        assert_that!(builder.build().unwrap_err(), eq(&ConfigError::EmptyGroup));
    }

    #[test]
    fn it_should_reject_invalid_argument_configuration() {
        let mut builder = ParserBuilder::new();
        builder.option(
            OptionBuilder::single("-n").argument(
                ArgumentBuilder::new("count")
                    .min_repetitions(2)
                    .max_repetitions(1),
            ),
        );
        assert_that!(
            builder.build().unwrap_err(),
            eq(&ConfigError::InvalidRepetitions {
                argument: "count".into(),
                min: 2,
                max: 1
            })
        );

        let mut builder = ParserBuilder::new();
        builder.option(OptionBuilder::property("-D").separator(""));
        assert_that!(
            builder.build().unwrap_err(),
            eq(&ConfigError::EmptySeparator("-D".into()))
        );
    }

    #[test]
    fn it_should_list_entries_for_help() {
        let mut builder = ParserBuilder::new();
        builder.option(
            OptionBuilder::new("-c", "--conf")
                .description("Configuration file")
                .argument(ArgumentBuilder::new("file")),
        );
        let quiet = builder.declare(OptionBuilder::new("-q", "--quiet"));
        let verbose = builder.declare(OptionBuilder::new("-v", "--verbose"));
        builder.group(ExclusiveGroupBuilder::new().option(quiet).option(verbose));
        let parser = builder.build().unwrap();

        let entries: Vec<String> = parser.entries().map(|e| e.to_string()).collect();

        assert_that!(entries.len(), eq(2));
        assert_that!(entries[0].as_str(), eq("--conf (-c) <file>"));
        assert_that!(entries[1].as_str(), eq("[--quiet (-q) | --verbose (-v)]"));
        assert_that!(
            parser.option(OptionId(0)).map(OptionSpec::description),
            eq(Some("Configuration file"))
        );
    }

    #[test]
    fn it_should_reuse_parser_across_parses() {
        let parser = conf_and_list();

        let first = parser.parse(["-c", "a.ini", "-l"]).unwrap();
        let second = parser.parse(["-c", "b.ini"]).unwrap();

        assert_that!(first.get_value("-c"), eq(Some("a.ini")));
        assert_that!(second.get_value("-c"), eq(Some("b.ini")));
        assert_that!(second.has_option("-l"), eq(false));
    }

    #[test]
    fn it_should_be_shareable_between_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Parser>();
    }
}
