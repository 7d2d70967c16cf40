//! Pluggable checks applied to argument values before they are recorded.

/// The error returned by a [`Validator`] rejecting a value.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    /// Create a validation error with a human readable message.
    pub fn new(message: impl Into<String>) -> Self {
        ValidationError {
            message: message.into(),
        }
    }

    /// The message describing why the value was rejected.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A predicate over a single argument value.
///
/// Validators attached to an argument run in registration order and the first rejection aborts
/// the parse. Any `Fn(&str) -> Result<(), ValidationError>` is a validator.
pub trait Validator: Send + Sync {
    /// Check the value, returning an error describing why it is rejected.
    fn validate(&self, value: &str) -> Result<(), ValidationError>;
}

impl<F> Validator for F
where
    F: Fn(&str) -> Result<(), ValidationError> + Send + Sync,
{
    fn validate(&self, value: &str) -> Result<(), ValidationError> {
        self(value)
    }
}

/// Run the validators in order, stopping at the first rejection.
pub(crate) fn validate_all(
    validators: &[Box<dyn Validator>],
    value: &str,
) -> Result<(), ValidationError> {
    validators.iter().try_for_each(|v| v.validate(value))
}

#[cfg(test)]
mod tests {
    use core::result::Result;

    use googletest::prelude::*;

    use super::*;

    fn not_empty(value: &str) -> Result<(), ValidationError> {
        if value.is_empty() {
            return Err(ValidationError::new("value is empty"));
        }
        Ok(())
    }

    #[test]
    fn it_should_accept_closures_as_validators() {
        let validators: Vec<Box<dyn Validator>> = vec![
            Box::new(not_empty),
            Box::new(|v: &str| {
                if v.len() > 3 {
                    Err(ValidationError::new("value is too long"))
                } else {
                    Ok(())
                }
            }),
        ];

        assert_that!(validate_all(&validators, "abc").is_ok(), eq(true));
        assert_that!(validate_all(&validators, "abcd").is_err(), eq(true));
    }

    #[test]
    fn it_should_stop_at_first_rejection() {
        let validators: Vec<Box<dyn Validator>> = vec![
            Box::new(|_: &str| -> Result<(), ValidationError> {
                Err(ValidationError::new("first"))
            }),
            Box::new(|_: &str| -> Result<(), ValidationError> {
                Err(ValidationError::new("second"))
            }),
        ];

        let err = validate_all(&validators, "x").unwrap_err();

        assert_that!(err.message(), eq("first"));
    }
}
