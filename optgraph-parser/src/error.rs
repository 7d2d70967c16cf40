//! Errors raised while configuring a parser or parsing a command line.

use crate::validator::ValidationError;

/// Defines the possible errors that may occur during parsing of a command line.
///
/// Every error is fatal to the parse that raised it: the partial result is dropped together with
/// the token stream.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A mandatory option, or every alternative of a mandatory group, is absent.
    #[error("{}", missing_message(.names))]
    MissingMandatoryOption {
        /// The missing option, or all the alternatives of the group.
        names: Vec<String>,
    },

    /// A non repeatable option has been given more than once.
    #[error("option [{option}] can be specified only one time")]
    OptionRepeated {
        /// The repeated option.
        option: String,
    },

    /// Options that cannot be used together are all present.
    #[error("options [{}] can not be specified together", .names.join(", "))]
    IncompatibleOptions {
        /// The conflicting options.
        names: Vec<String>,
    },

    /// An option has been given without one of the options it requires.
    #[error("option [{option}] requires [{required}]")]
    MissingRequiredDependency {
        /// The dependent option.
        option: String,

        /// The missing dependency.
        required: String,
    },

    /// The option has been given without its mandatory argument.
    #[error("mandatory argument <{argument}> for option [{option}] is not present")]
    MissingMandatoryArgument {
        /// The option owning the argument.
        option: String,

        /// The argument name.
        argument: String,
    },

    /// The argument has fewer values than its minimum repetitions.
    #[error("argument <{argument}> for option [{option}] needs at least {min} values, got {found}")]
    TooFewArgumentRepetitions {
        /// The option owning the argument.
        option: String,

        /// The argument name.
        argument: String,

        /// The configured minimum.
        min: usize,

        /// The number of values found.
        found: usize,
    },

    /// The argument has more values than its maximum repetitions.
    #[error("argument <{argument}> for option [{option}] accepts at most {max} values")]
    TooManyArgumentRepetitions {
        /// The option owning the argument.
        option: String,

        /// The argument name.
        argument: String,

        /// The configured maximum.
        max: usize,
    },

    /// A validator rejected an argument value.
    #[error("invalid value '{value}' for argument <{argument}> of option [{option}]: {source}")]
    ValidationFailure {
        /// The option owning the argument.
        option: String,

        /// The argument name.
        argument: String,

        /// The rejected value.
        value: String,

        /// The validator error.
        #[source]
        source: ValidationError,
    },

    /// A property argument is not in the `key<separator>value` form.
    #[error("argument <{argument}> for option [{option}] must be in format key{separator}value")]
    MalformedPropertyValue {
        /// The option owning the argument.
        option: String,

        /// The argument name.
        argument: String,

        /// The configured separator.
        separator: String,
    },

    /// Tokens are left once every configured option and command ran.
    #[error("unexpected tokens: [{}]", .tokens.join(", "))]
    UnexpectedTokens {
        /// The leftover tokens, in command line order.
        tokens: Vec<String>,
    },

    /// The leading token does not name a configured command.
    #[error("unknown command <{token}>")]
    UnknownCommand {
        /// The leading token.
        token: String,
    },

    /// Commands are configured but the command line is empty.
    #[error("no command specified")]
    NoCommandSpecified,

    /// A recorded value cannot be converted to the requested type.
    #[error("value '{value}' of option [{option}] is not a valid {target}")]
    InvalidValue {
        /// The option holding the value.
        option: String,

        /// The value.
        value: String,

        /// The requested type name.
        target: &'static str,
    },
}

/// The kind of an [`Error`], without its details.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[non_exhaustive]
pub enum ErrorKind {
    /// See [`Error::MissingMandatoryOption`].
    MissingMandatoryOption,
    /// See [`Error::OptionRepeated`].
    OptionRepeatedWhenNotRepeatable,
    /// See [`Error::IncompatibleOptions`].
    IncompatibleOptionsPresent,
    /// See [`Error::MissingRequiredDependency`].
    MissingRequiredDependency,
    /// See [`Error::MissingMandatoryArgument`].
    MissingMandatoryArgument,
    /// See [`Error::TooFewArgumentRepetitions`].
    TooFewArgumentRepetitions,
    /// See [`Error::TooManyArgumentRepetitions`].
    TooManyArgumentRepetitions,
    /// See [`Error::ValidationFailure`].
    ValidationFailure,
    /// See [`Error::MalformedPropertyValue`].
    MalformedPropertyValue,
    /// See [`Error::UnexpectedTokens`].
    UnexpectedTokens,
    /// See [`Error::UnknownCommand`].
    UnknownCommand,
    /// See [`Error::NoCommandSpecified`].
    NoCommandSpecified,
    /// See [`Error::InvalidValue`].
    InvalidValue,
}

impl Error {
    /// The kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MissingMandatoryOption { .. } => ErrorKind::MissingMandatoryOption,
            Error::OptionRepeated { .. } => ErrorKind::OptionRepeatedWhenNotRepeatable,
            Error::IncompatibleOptions { .. } => ErrorKind::IncompatibleOptionsPresent,
            Error::MissingRequiredDependency { .. } => ErrorKind::MissingRequiredDependency,
            Error::MissingMandatoryArgument { .. } => ErrorKind::MissingMandatoryArgument,
            Error::TooFewArgumentRepetitions { .. } => ErrorKind::TooFewArgumentRepetitions,
            Error::TooManyArgumentRepetitions { .. } => ErrorKind::TooManyArgumentRepetitions,
            Error::ValidationFailure { .. } => ErrorKind::ValidationFailure,
            Error::MalformedPropertyValue { .. } => ErrorKind::MalformedPropertyValue,
            Error::UnexpectedTokens { .. } => ErrorKind::UnexpectedTokens,
            Error::UnknownCommand { .. } => ErrorKind::UnknownCommand,
            Error::NoCommandSpecified => ErrorKind::NoCommandSpecified,
            Error::InvalidValue { .. } => ErrorKind::InvalidValue,
        }
    }
}

fn missing_message(names: &[String]) -> String {
    match names {
        [name] => format!("mandatory option [{name}] is missing"),
        _ => format!(
            "mandatory option missing: one of [{}] must be passed",
            names.join(", ")
        ),
    }
}

/// Defines the configuration mistakes detected when building a parser.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// An option handle was not issued by this parser builder.
    #[error("unknown option handle #{0}")]
    UnknownOption(usize),

    /// Two options share a name.
    #[error("option name [{0}] is declared more than once")]
    DuplicateName(String),

    /// An option requires itself.
    #[error("option [{0}] requires itself")]
    SelfRequirement(String),

    /// An option is incompatible with itself.
    #[error("option [{0}] is incompatible with itself")]
    SelfIncompatibility(String),

    /// The same pair of options is linked by a requirement and an incompatibility.
    #[error("options [{0}] and [{1}] are both required and incompatible")]
    ContradictoryConstraint(String, String),

    /// The requirements form a cycle.
    #[error("options form a requirement cycle: [{}]", .0.join(" -> "))]
    RequirementCycle(Vec<String>),

    /// A mutually exclusive group has no option.
    #[error("mutually exclusive group has no option")]
    EmptyGroup,

    /// The argument repetition bounds cannot be satisfied.
    #[error("argument <{argument}> has invalid repetitions (min {min}, max {max})")]
    InvalidRepetitions {
        /// The argument name.
        argument: String,

        /// The configured minimum.
        min: usize,

        /// The configured maximum.
        max: usize,
    },

    /// A property option has an empty key/value separator.
    #[error("property option [{0}] has an empty separator")]
    EmptySeparator(String),

    /// A separator is set on an option whose argument does not take properties.
    #[error("option [{0}] sets a separator but takes no property argument")]
    SeparatorWithoutProperty(String),

    /// Two commands share a name.
    #[error("command name <{0}> is declared more than once")]
    DuplicateCommand(String),
}
