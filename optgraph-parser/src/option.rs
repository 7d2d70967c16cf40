//! Options, and the checks run before consuming them.

use core::fmt;

use tracing::trace;

use crate::argument::{Argument, ArgumentBuilder};
use crate::error::Error;
use crate::graph::ConstraintGraph;
use crate::lexer::TokenStream;
use crate::matches::ParsedArgs;

/// A handle to an option declared in a [`ParserBuilder`](crate::ParserBuilder).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OptionId(pub(crate) usize);

impl OptionId {
    /// The position of the option in its parser, in declaration order.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A configured option.
#[derive(Debug)]
pub struct OptionSpec {
    short: String,
    long: String,
    description: String,
    mandatory: bool,
    repeatable: bool,
    argument: Option<Argument>,
}

impl OptionSpec {
    /// The short name (e.g. `-c`).
    pub fn short(&self) -> &str {
        &self.short
    }

    /// The long name (e.g. `--conf`).
    pub fn long(&self) -> &str {
        &self.long
    }

    /// The description, for help.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Whether the option must be given.
    pub fn is_mandatory(&self) -> bool {
        self.mandatory
    }

    /// Whether the option may be given more than once.
    pub fn is_repeatable(&self) -> bool {
        self.repeatable
    }

    /// The argument of the option, if it takes values.
    pub fn argument(&self) -> Option<&Argument> {
        self.argument.as_ref()
    }

    #[inline(always)]
    fn names(&self) -> [&str; 2] {
        [&self.short, &self.long]
    }

    /// Check if the short or long name occurs anywhere in the stream.
    #[inline(always)]
    pub fn is_present(&self, tokens: &TokenStream) -> bool {
        tokens.contains_any(&self.names())
    }

    /// Check if the option has already been recorded.
    #[inline(always)]
    pub fn is_recorded(&self, out: &ParsedArgs) -> bool {
        out.has_option(&self.short)
    }
}

impl fmt::Display for OptionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.short == self.long {
            write!(f, "{}", self.long)?;
        } else {
            write!(f, "{} ({})", self.long, self.short)?;
        }

        match &self.argument {
            Some(arg) => write!(f, " <{}>", arg.name()),
            None => Ok(()),
        }
    }
}

/// Builder of an option.
///
/// Relations given here refer to options declared earlier in the same parser builder.
#[derive(Debug)]
pub struct OptionBuilder {
    pub(crate) spec: OptionSpec,
    pub(crate) requires: Vec<OptionId>,
    pub(crate) incompatible: Vec<OptionId>,
    pub(crate) stray_separator: bool,
}

impl OptionBuilder {
    /// Start building an option with a short and a long name.
    pub fn new(short: impl Into<String>, long: impl Into<String>) -> Self {
        OptionBuilder {
            spec: OptionSpec {
                short: short.into(),
                long: long.into(),
                description: String::new(),
                mandatory: false,
                repeatable: false,
                argument: None,
            },
            requires: Vec::new(),
            incompatible: Vec::new(),
            stray_separator: false,
        }
    }

    /// Start building an option with a single name (e.g. `-b`).
    pub fn single(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::new(name.clone(), name)
    }

    /// Start building a repeatable property option collecting `key=value` pairs (e.g. `-D`).
    pub fn property(name: impl Into<String>) -> Self {
        Self::single(name)
            .repeatable(true)
            .argument(ArgumentBuilder::property())
    }

    /// Set whether the option must be given.
    pub fn mandatory(mut self, mandatory: bool) -> Self {
        self.spec.mandatory = mandatory;
        self
    }

    /// Set whether the option may be given more than once.
    pub fn repeatable(mut self, repeatable: bool) -> Self {
        self.spec.repeatable = repeatable;
        self
    }

    /// Set the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.spec.description = description.into();
        self
    }

    /// Attach an argument.
    pub fn argument(mut self, argument: impl Into<Argument>) -> Self {
        self.spec.argument = Some(argument.into());
        self
    }

    /// Change the key/value separator of the property argument, keeping its validators.
    ///
    /// The parser builder rejects an option without property argument at build time.
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        let separator = separator.into();
        let changed = self
            .spec
            .argument
            .as_mut()
            .is_some_and(|argument| argument.set_separator(separator));

        self.stray_separator |= !changed;
        self
    }

    /// Require another option whenever this one is given.
    pub fn requires(mut self, option: OptionId) -> Self {
        self.requires.push(option);
        self
    }

    /// Forbid another option together with this one. The relation is symmetric.
    pub fn incompatible_with(mut self, option: OptionId) -> Self {
        self.incompatible.push(option);
        self
    }

    /// Build the option, dropping its relations.
    pub fn build(self) -> OptionSpec {
        self.spec
    }
}

/// The options of a parser and the relations between them.
#[derive(Clone, Copy)]
pub(crate) struct Scope<'a> {
    pub(crate) options: &'a [OptionSpec],
    pub(crate) graph: &'a ConstraintGraph,
}

impl<'a> Scope<'a> {
    #[inline(always)]
    pub(crate) fn option(&self, id: OptionId) -> &'a OptionSpec {
        &self.options[id.0]
    }
}

/// Something the parser looks for in the stream and consumes from it.
pub(crate) trait Consume {
    /// Check if the item occurs in the stream.
    fn is_present(&self, scope: Scope<'_>, tokens: &TokenStream) -> bool;

    /// Run the checks and remove every occurrence of the item from the stream.
    fn consume(
        &self,
        scope: Scope<'_>,
        tokens: &mut TokenStream,
        out: &mut ParsedArgs,
    ) -> Result<(), Error>;
}

impl Consume for OptionId {
    fn is_present(&self, scope: Scope<'_>, tokens: &TokenStream) -> bool {
        scope.option(*self).is_present(tokens)
    }

    fn consume(
        &self,
        scope: Scope<'_>,
        tokens: &mut TokenStream,
        out: &mut ParsedArgs,
    ) -> Result<(), Error> {
        let option = scope.option(*self);
        let names = option.names();
        let mut resume = 0;

        // Every occurrence is checked again, so a second occurrence of a non repeatable option
        // fails even though the first one succeeded.
        while sanity_check(scope, *self, tokens, out)? {
            // Satisfying a requirement may have shifted the stream to the left of `resume`.
            let Some(pos) = tokens
                .position_from(resume, &names)
                .or_else(|| tokens.position_from(0, &names))
            else {
                break;
            };

            tokens.remove(pos);
            out.record_presence(option.short(), option.long());
            trace!(option = %option.long(), position = pos, "consumed option");

            if let Some(argument) = option.argument() {
                argument.consume(option, tokens, pos, out)?;
            }

            resume = pos;
        }

        Ok(())
    }
}

/// Check that the option can be consumed. Required options found in the stream are consumed
/// first.
///
/// Returns `false` if the option is absent and nothing has to be consumed.
pub(crate) fn sanity_check(
    scope: Scope<'_>,
    id: OptionId,
    tokens: &mut TokenStream,
    out: &mut ParsedArgs,
) -> Result<bool, Error> {
    let option = scope.option(id);

    if !option.is_present(tokens) {
        if option.is_mandatory() && !option.is_recorded(out) {
            return Err(Error::MissingMandatoryOption {
                names: vec![option.long().to_string()],
            });
        }
        return Ok(false);
    }

    if option.is_recorded(out) && !option.is_repeatable() {
        return Err(Error::OptionRepeated {
            option: option.long().to_string(),
        });
    }

    for &other in scope.graph.incompatible(id) {
        let other = scope.option(other);

        if other.is_recorded(out) || other.is_present(tokens) {
            return Err(Error::IncompatibleOptions {
                names: vec![option.long().to_string(), other.long().to_string()],
            });
        }
    }

    for &required in scope.graph.requires(id) {
        if required.is_present(scope, tokens) {
            required.consume(scope, tokens, out)?;
        } else if !scope.option(required).is_recorded(out) {
            return Err(Error::MissingRequiredDependency {
                option: option.long().to_string(),
                required: scope.option(required).long().to_string(),
            });
        }
    }

    Ok(true)
}
