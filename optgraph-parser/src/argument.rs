//! Values following a matched option.

use core::fmt;

use tracing::trace;

use crate::error::{ConfigError, Error};
use crate::lexer::TokenStream;
use crate::matches::ParsedArgs;
use crate::option::OptionSpec;
use crate::utils::split_property;
use crate::validator::{Validator, validate_all};

/// How consumed values are recorded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValueStyle {
    /// Each value is appended to the option value list.
    Plain,

    /// Each value is a `key<separator>value` pair recorded into the option properties.
    Property {
        /// The key/value separator.
        separator: String,
    },
}

/// The argument of an option.
pub struct Argument {
    name: String,
    mandatory: bool,
    min: usize,
    max: usize,
    style: ValueStyle,
    validators: Vec<Box<dyn Validator>>,
}

impl Argument {
    /// The argument name, used in diagnostics and help.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether at least one value must follow the option.
    pub fn is_mandatory(&self) -> bool {
        self.mandatory
    }

    /// Minimum number of consecutive values.
    pub fn min_repetitions(&self) -> usize {
        self.min
    }

    /// Maximum number of consecutive values.
    pub fn max_repetitions(&self) -> usize {
        self.max
    }

    /// How the values are recorded.
    pub fn style(&self) -> &ValueStyle {
        &self.style
    }

    pub(crate) fn check(&self, option: &str) -> Result<(), ConfigError> {
        if self.max == 0 || self.min > self.max {
            return Err(ConfigError::InvalidRepetitions {
                argument: self.name.clone(),
                min: self.min,
                max: self.max,
            });
        }

        if let ValueStyle::Property { separator } = &self.style {
            if separator.is_empty() {
                return Err(ConfigError::EmptySeparator(option.to_string()));
            }
        }

        Ok(())
    }

    /// Consume the values starting at `pos`, the position right after the removed option token.
    pub(crate) fn consume(
        &self,
        option: &OptionSpec,
        tokens: &mut TokenStream,
        pos: usize,
        out: &mut ParsedArgs,
    ) -> Result<(), Error> {
        let mut found = 0;
        // A property takes one pair per occurrence, the option repeatability bounds the rest.
        let property = matches!(self.style, ValueStyle::Property { .. });

        while !(property && found == 1) {
            let Some(value) = tokens.remove_value(pos) else {
                break;
            };
            self.save(option, value, out)?;

            found += 1;
            if found > self.max {
                return Err(Error::TooManyArgumentRepetitions {
                    option: option.long().to_string(),
                    argument: self.name.clone(),
                    max: self.max,
                });
            }
        }

        if found == 0 && self.mandatory {
            return Err(Error::MissingMandatoryArgument {
                option: option.long().to_string(),
                argument: self.name.clone(),
            });
        }

        if found < self.min {
            return Err(Error::TooFewArgumentRepetitions {
                option: option.long().to_string(),
                argument: self.name.clone(),
                min: self.min,
                found,
            });
        }

        Ok(())
    }

    /// Change the separator of a property argument. Plain arguments are left untouched.
    pub(crate) fn set_separator(&mut self, separator: String) -> bool {
        match &mut self.style {
            ValueStyle::Property { separator: current } => {
                *current = separator;
                true
            }
            ValueStyle::Plain => false,
        }
    }

    fn save(&self, option: &OptionSpec, value: String, out: &mut ParsedArgs) -> Result<(), Error> {
        match &self.style {
            ValueStyle::Plain => {
                self.validate(option, &value)?;

                trace!(option = %option.long(), %value, "recorded value");
                out.record_value(option.short(), option.long(), value);
            }
            ValueStyle::Property { separator } => {
                let Some((key, prop)) = split_property(&value, separator) else {
                    return Err(Error::MalformedPropertyValue {
                        option: option.long().to_string(),
                        argument: self.name.clone(),
                        separator: separator.clone(),
                    });
                };

                // Only the value part of the pair is validated.
                self.validate(option, prop)?;

                trace!(option = %option.long(), %key, value = %prop, "recorded property");
                out.record_property(option.short(), option.long(), key, prop);
            }
        }

        Ok(())
    }

    fn validate(&self, option: &OptionSpec, value: &str) -> Result<(), Error> {
        validate_all(&self.validators, value).map_err(|source| Error::ValidationFailure {
            option: option.long().to_string(),
            argument: self.name.clone(),
            value: value.to_string(),
            source,
        })
    }
}

impl fmt::Debug for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Argument")
            .field("name", &self.name)
            .field("mandatory", &self.mandatory)
            .field("min", &self.min)
            .field("max", &self.max)
            .field("style", &self.style)
            .field("validators", &self.validators.len())
            .finish()
    }
}

/// Builder of an [`Argument`].
///
/// An argument is mandatory and takes a single value unless told otherwise.
pub struct ArgumentBuilder {
    argument: Argument,
}

impl ArgumentBuilder {
    /// Start building an argument with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        ArgumentBuilder {
            argument: Argument {
                name: name.into(),
                mandatory: true,
                min: 0,
                max: 1,
                style: ValueStyle::Plain,
                validators: Vec::new(),
            },
        }
    }

    /// Start building a `key=value` property argument.
    pub fn property() -> Self {
        Self::new("key=value").separator("=")
    }

    /// Set whether at least one value must follow the option.
    pub fn mandatory(mut self, mandatory: bool) -> Self {
        self.argument.mandatory = mandatory;
        self
    }

    /// Set the minimum number of consecutive values.
    pub fn min_repetitions(mut self, min: usize) -> Self {
        self.argument.min = min;
        self
    }

    /// Set the maximum number of consecutive values.
    pub fn max_repetitions(mut self, max: usize) -> Self {
        self.argument.max = max;
        self
    }

    /// Record the values as `key<separator>value` properties.
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.argument.style = ValueStyle::Property {
            separator: separator.into(),
        };
        self
    }

    /// Append a validator. Validators run in the order they are added.
    pub fn validator(mut self, validator: impl Validator + 'static) -> Self {
        self.argument.validators.push(Box::new(validator));
        self
    }

    /// Build the argument.
    pub fn build(self) -> Argument {
        self.argument
    }
}

impl From<ArgumentBuilder> for Argument {
    fn from(builder: ArgumentBuilder) -> Self {
        builder.build()
    }
}
