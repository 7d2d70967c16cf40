//! Integer values, in any radix, optionally bounded.

use optgraph_parser::{ValidationError, Validator};

use crate::BuildError;

/// Accept integers written in a given radix, within optional inclusive bounds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntegerValidator {
    radix: u32,
    min: Option<i64>,
    max: Option<i64>,
}

impl IntegerValidator {
    /// Start building an unbounded, decimal validator.
    pub fn builder() -> IntegerValidatorBuilder {
        IntegerValidatorBuilder::default()
    }

    /// The radix the values are written in.
    pub fn radix(&self) -> u32 {
        self.radix
    }
}

impl Default for IntegerValidator {
    fn default() -> Self {
        IntegerValidator {
            radix: 10,
            min: None,
            max: None,
        }
    }
}

impl Validator for IntegerValidator {
    fn validate(&self, value: &str) -> Result<(), ValidationError> {
        let parsed = i64::from_str_radix(value, self.radix).map_err(|_| {
            ValidationError::new(format!(
                "value [{value}] is not a correct number with radix [{}]",
                self.radix
            ))
        })?;

        if let Some(min) = self.min.filter(|&min| parsed < min) {
            return Err(ValidationError::new(format!(
                "value must be at least {min} (current value: {value})"
            )));
        }

        if let Some(max) = self.max.filter(|&max| parsed > max) {
            return Err(ValidationError::new(format!(
                "value must be at most {max} (current value: {value})"
            )));
        }

        Ok(())
    }
}

/// Builder of an [`IntegerValidator`].
#[derive(Debug, Default)]
pub struct IntegerValidatorBuilder {
    validator: IntegerValidator,
}

impl IntegerValidatorBuilder {
    /// Set the radix, from 2 to 36.
    pub fn radix(mut self, radix: u32) -> Self {
        self.validator.radix = radix;
        self
    }

    /// Set the inclusive lower bound.
    pub fn min(mut self, min: i64) -> Self {
        self.validator.min = Some(min);
        self
    }

    /// Set the inclusive upper bound.
    pub fn max(mut self, max: i64) -> Self {
        self.validator.max = Some(max);
        self
    }

    /// Build the validator.
    pub fn build(self) -> Result<IntegerValidator, BuildError> {
        let validator = self.validator;

        if !(2..=36).contains(&validator.radix) {
            return Err(BuildError::InvalidRadix(validator.radix));
        }

        if let (Some(min), Some(max)) = (validator.min, validator.max) {
            if min > max {
                return Err(BuildError::EmptyRange { min, max });
            }
        }

        Ok(validator)
    }
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;

    use super::*;

    #[test]
    fn it_should_accept_decimal_by_default() {
        let validator = IntegerValidator::default();

        assert_that!(validator.validate("42").is_ok(), eq(true));
        assert_that!(validator.validate("-7").is_ok(), eq(true));
        assert_that!(validator.validate("4x2").is_err(), eq(true));
        assert_that!(validator.validate("").is_err(), eq(true));
    }

    #[test]
    fn it_should_parse_with_radix() {
        let validator = IntegerValidator::builder().radix(16).build().unwrap();

        assert_that!(validator.validate("ff").is_ok(), eq(true));

        let err = validator.validate("fg").unwrap_err();
        assert_that!(
            err.message(),
            eq("value [fg] is not a correct number with radix [16]")
        );
    }

    #[test]
    fn it_should_enforce_inclusive_bounds() {
        let validator = IntegerValidator::builder().min(1).max(10).build().unwrap();

        assert_that!(validator.validate("1").is_ok(), eq(true));
        assert_that!(validator.validate("10").is_ok(), eq(true));
        assert_that!(
            validator.validate("0").unwrap_err().message(),
            eq("value must be at least 1 (current value: 0)")
        );
        assert_that!(
            validator.validate("11").unwrap_err().message(),
            eq("value must be at most 10 (current value: 11)")
        );
    }

    #[test]
    fn it_should_reject_invalid_configuration() {
        let res = IntegerValidator::builder().radix(1).build();
        assert_that!(res, matches_pattern!(&Err(ref matches_pattern!(&BuildError::InvalidRadix(eq(1))))));

        let err = IntegerValidator::builder().min(5).max(4).build().unwrap_err();
        assert_that!(
            err.to_string().as_str(),
            eq("empty range, minimum 5 is greater than maximum 4")
        );
    }
}
