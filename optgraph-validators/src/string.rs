//! Free text, bounded in length and optionally matching a pattern.

use optgraph_parser::{ValidationError, Validator};
use regex::Regex;

use crate::BuildError;

/// Accept strings whose length in characters is within bounds, and that match a pattern as a
/// whole.
#[derive(Clone, Debug, Default)]
pub struct StringValidator {
    min_len: Option<usize>,
    max_len: Option<usize>,
    pattern: Option<Regex>,
}

impl StringValidator {
    /// Start building a validator accepting any string.
    pub fn builder() -> StringValidatorBuilder {
        StringValidatorBuilder::default()
    }
}

impl Validator for StringValidator {
    fn validate(&self, value: &str) -> Result<(), ValidationError> {
        let len = value.chars().count();

        if let Some(min) = self.min_len.filter(|&min| len < min) {
            return Err(ValidationError::new(format!(
                "value is too short (minimum length: {min})"
            )));
        }

        if let Some(max) = self.max_len.filter(|&max| len > max) {
            return Err(ValidationError::new(format!(
                "value is too long (maximum length: {max})"
            )));
        }

        match &self.pattern {
            Some(pattern) if !pattern.is_match(value) => Err(ValidationError::new(format!(
                "value [{value}] does not match [{}]",
                pattern.as_str()
            ))),
            _ => Ok(()),
        }
    }
}

/// Builder of a [`StringValidator`].
#[derive(Debug, Default)]
pub struct StringValidatorBuilder {
    min_len: Option<usize>,
    max_len: Option<usize>,
    pattern: Option<String>,
}

impl StringValidatorBuilder {
    /// Set the minimum length, in characters.
    pub fn min_len(mut self, min: usize) -> Self {
        self.min_len = Some(min);
        self
    }

    /// Set the maximum length, in characters.
    pub fn max_len(mut self, max: usize) -> Self {
        self.max_len = Some(max);
        self
    }

    /// Set a regular expression the whole value must match.
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Compile the pattern and build the validator.
    pub fn build(self) -> Result<StringValidator, BuildError> {
        if let (Some(min), Some(max)) = (self.min_len, self.max_len) {
            if min > max {
                return Err(BuildError::EmptyRange {
                    min: i64::try_from(min).unwrap_or(i64::MAX),
                    max: i64::try_from(max).unwrap_or(i64::MAX),
                });
            }
        }

        let pattern = self
            .pattern
            .map(|pattern| Regex::new(&format!("^(?:{pattern})$")))
            .transpose()?;

        Ok(StringValidator {
            min_len: self.min_len,
            max_len: self.max_len,
            pattern,
        })
    }
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;

    use super::*;

    #[test]
    fn it_should_count_characters_not_bytes() {
        let validator = StringValidator::builder()
            .min_len(2)
            .max_len(3)
            .build()
            .unwrap();

        assert_that!(validator.validate("éé").is_ok(), eq(true));
        assert_that!(
            validator.validate("é").unwrap_err().message(),
            eq("value is too short (minimum length: 2)")
        );
        assert_that!(
            validator.validate("éééé").unwrap_err().message(),
            eq("value is too long (maximum length: 3)")
        );
    }

    #[test]
    fn it_should_match_whole_value() {
        let validator = StringValidator::builder()
            .pattern("[a-z]+|[0-9]+")
            .build()
            .unwrap();

        assert_that!(validator.validate("abc").is_ok(), eq(true));
        assert_that!(validator.validate("123").is_ok(), eq(true));
        assert_that!(validator.validate("abc123").is_err(), eq(true));
        assert_that!(validator.validate("xabc!").is_err(), eq(true));
    }

    #[test]
    fn it_should_reject_invalid_pattern() {
        let res = StringValidator::builder().pattern("(unclosed").build();

        assert_that!(matches!(res, Err(BuildError::InvalidPattern(_))), eq(true));
    }
}
