//! Mutually exclusive groups of options.

use crate::error::Error;
use crate::lexer::TokenStream;
use crate::matches::ParsedArgs;
use crate::option::{Consume, OptionId, Scope};

/// A set of options of which at most one may be given.
///
/// The group has no name of its own: the selected option is recorded under its own names.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExclusiveGroup {
    options: Vec<OptionId>,
    mandatory: bool,
    description: String,
}

impl ExclusiveGroup {
    /// The options of the group, in the order they were added.
    pub fn options(&self) -> &[OptionId] {
        &self.options
    }

    /// Whether one of the options must be given.
    pub fn is_mandatory(&self) -> bool {
        self.mandatory
    }

    /// The description, for help.
    pub fn description(&self) -> &str {
        &self.description
    }

    fn names(&self, scope: Scope<'_>) -> Vec<String> {
        self.options
            .iter()
            .map(|&id| scope.option(id).long().to_string())
            .collect()
    }
}

impl Consume for ExclusiveGroup {
    fn is_present(&self, scope: Scope<'_>, tokens: &TokenStream) -> bool {
        self.options.iter().any(|id| id.is_present(scope, tokens))
    }

    fn consume(
        &self,
        scope: Scope<'_>,
        tokens: &mut TokenStream,
        out: &mut ParsedArgs,
    ) -> Result<(), Error> {
        let present: Vec<OptionId> = self
            .options
            .iter()
            .copied()
            .filter(|id| id.is_present(scope, tokens))
            .collect();

        match present.as_slice() {
            [selected] => selected.consume(scope, tokens, out),
            [] if self.mandatory => Err(Error::MissingMandatoryOption {
                names: self.names(scope),
            }),
            [] => Ok(()),
            _ => Err(Error::IncompatibleOptions {
                names: self.names(scope),
            }),
        }
    }
}

/// Builder of an [`ExclusiveGroup`].
#[derive(Debug, Default)]
pub struct ExclusiveGroupBuilder {
    group: ExclusiveGroup,
}

impl ExclusiveGroupBuilder {
    /// Start building an empty, optional group.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an option to the group.
    pub fn option(mut self, option: OptionId) -> Self {
        self.group.options.push(option);
        self
    }

    /// Set whether one of the options must be given.
    pub fn mandatory(mut self, mandatory: bool) -> Self {
        self.group.mandatory = mandatory;
        self
    }

    /// Set the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.group.description = description.into();
        self
    }

    /// Build the group.
    pub fn build(self) -> ExclusiveGroup {
        self.group
    }
}

impl From<ExclusiveGroupBuilder> for ExclusiveGroup {
    fn from(builder: ExclusiveGroupBuilder) -> Self {
        builder.build()
    }
}
