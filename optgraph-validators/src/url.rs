//! URLs, optionally restricted to some schemes.

use optgraph_parser::{ValidationError, Validator};
use url::Url;

/// Accept absolute URLs, with a scheme from the allowed set when one is given.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UrlValidator {
    schemes: Vec<String>,
}

impl UrlValidator {
    /// A validator accepting any scheme.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allow a scheme (e.g. `https`). Schemes compare case-insensitively.
    pub fn scheme(mut self, scheme: impl Into<String>) -> Self {
        self.schemes.push(scheme.into().to_ascii_lowercase());
        self
    }

    /// The allowed schemes. Empty means any.
    pub fn schemes(&self) -> &[String] {
        &self.schemes
    }
}

impl Validator for UrlValidator {
    fn validate(&self, value: &str) -> Result<(), ValidationError> {
        let url = Url::parse(value).map_err(|err| {
            ValidationError::new(format!("value [{value}] is not a valid URL: {err}"))
        })?;

        if !self.schemes.is_empty() && !self.schemes.iter().any(|s| s == url.scheme()) {
            return Err(ValidationError::new(format!(
                "scheme can only be one of [{}], received [{}]",
                self.schemes.join(", "),
                url.scheme()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;

    use super::*;

    #[test]
    fn it_should_accept_any_scheme_by_default() {
        let validator = UrlValidator::new();

        assert_that!(validator.validate("ftp://example.org/file").is_ok(), eq(true));
        assert_that!(validator.validate("not a url").is_err(), eq(true));
        assert_that!(validator.validate("/relative/path").is_err(), eq(true));
    }

    #[test]
    fn it_should_restrict_schemes() {
        let validator = UrlValidator::new().scheme("HTTPS").scheme("ssh");

        assert_that!(validator.validate("https://example.org").is_ok(), eq(true));
        assert_that!(validator.validate("ssh://git@example.org/repo").is_ok(), eq(true));
        assert_that!(
            validator.validate("http://example.org").unwrap_err().message(),
            eq("scheme can only be one of [https, ssh], received [http]")
        );
    }
}
