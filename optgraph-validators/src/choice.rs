//! Values from a fixed set.

use optgraph_parser::{ValidationError, Validator};

use crate::BuildError;

/// Accept one of a non-empty set of values. Comparison is case-insensitive unless configured
/// otherwise.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChoiceValidator {
    choices: Vec<String>,
    case_sensitive: bool,
}

impl ChoiceValidator {
    /// Create a validator accepting `choices`.
    pub fn new<I, S>(choices: I) -> Result<Self, BuildError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let choices: Vec<String> = choices.into_iter().map(Into::into).collect();
        if choices.is_empty() {
            return Err(BuildError::EmptyChoices);
        }

        Ok(ChoiceValidator {
            choices,
            case_sensitive: false,
        })
    }

    /// Set whether the case must match.
    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// The accepted values, as given.
    pub fn choices(&self) -> &[String] {
        &self.choices
    }
}

impl Validator for ChoiceValidator {
    fn validate(&self, value: &str) -> Result<(), ValidationError> {
        let accepted = self.choices.iter().any(|choice| {
            if self.case_sensitive {
                choice == value
            } else {
                choice.to_lowercase() == value.to_lowercase()
            }
        });

        if accepted {
            Ok(())
        } else {
            Err(ValidationError::new(format!(
                "value must be one of [{}]",
                self.choices.join(", ")
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;

    use super::*;

    #[test]
    fn it_should_ignore_case_by_default() {
        let validator = ChoiceValidator::new(["fast", "Safe"]).unwrap();

        assert_that!(validator.validate("FAST").is_ok(), eq(true));
        assert_that!(validator.validate("safe").is_ok(), eq(true));
        assert_that!(
            validator.validate("slow").unwrap_err().message(),
            eq("value must be one of [fast, Safe]")
        );
    }

    #[test]
    fn it_should_match_case_when_sensitive() {
        let validator = ChoiceValidator::new(["fast"]).unwrap().case_sensitive(true);

        assert_that!(validator.validate("fast").is_ok(), eq(true));
        assert_that!(validator.validate("Fast").is_err(), eq(true));
    }

    #[test]
    fn it_should_reject_empty_choices() {
        let res = ChoiceValidator::new(Vec::<String>::new());

        assert_that!(matches!(res, Err(BuildError::EmptyChoices)), eq(true));
    }
}
