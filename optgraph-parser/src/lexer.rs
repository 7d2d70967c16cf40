//! A lexer for normalizing the command line into a token stream.

use core::mem;

/// Defines how a raw token from the command line is read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Token<'a> {
    /// A short flag (e.g. -v).
    Short(&'a str),

    /// A long flag (e.g. --verbose).
    Long(&'a str),

    /// A short flag with its value attached (e.g. -Dkey=value).
    Bundled {
        /// The two characters flag (e.g. -D).
        flag: &'a str,

        /// Everything after the flag (e.g. key=value).
        rest: &'a str,
    },

    /// Value (i.e. everything that does not start with a hyphen, or a lone hyphen).
    Value(&'a str),
}

impl<'a> Token<'a> {
    /// Classify a raw token string.
    pub fn classify(input: &'a str) -> Self {
        if input.starts_with("--") {
            return Token::Long(input);
        }

        if !input.starts_with('-') || input.chars().count() == 1 {
            return Token::Value(input);
        }

        // The flag is the hyphen and the first character after it.
        match input.char_indices().nth(2) {
            None => Token::Short(input),
            Some((split, _)) => {
                let (flag, rest) = input.split_at(split);
                Token::Bundled { flag, rest }
            }
        }
    }

    /// Evaluate if the token string can be taken as an argument value.
    #[inline(always)]
    pub fn is_value(input: &str) -> bool {
        !input.starts_with('-')
    }
}

/// Split bundled short flags from their inline value, leaving every other token untouched.
///
/// `["-Dkey=value", "--conf", "x"]` becomes `["-D", "key=value", "--conf", "x"]`.
pub fn normalize<I, S>(argv: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut out = Vec::new();

    for arg in argv {
        let arg: String = arg.into();

        if let Token::Bundled { flag, rest } = Token::classify(&arg) {
            out.push(flag.to_string());
            out.push(rest.to_string());
            continue;
        }

        out.push(arg);
    }

    out
}

/// The unconsumed part of the command line.
///
/// A stream is owned by exactly one parse at a time. Consumers remove the tokens they claim, and
/// whatever is left once every configured item ran is reported as unexpected.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenStream {
    tokens: Vec<String>,
}

impl TokenStream {
    /// Create a stream from tokens that are already normalized.
    pub fn new(tokens: Vec<String>) -> Self {
        TokenStream { tokens }
    }

    /// Create a stream from the raw command line, normalizing it first.
    pub fn from_argv<I, S>(argv: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(normalize(argv))
    }

    /// Number of remaining tokens.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether every token has been consumed.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Retrieve the token at the given position.
    #[inline(always)]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.tokens.get(index).map(String::as_str)
    }

    /// Retrieve the leading token.
    #[inline(always)]
    pub fn first(&self) -> Option<&str> {
        self.get(0)
    }

    /// Check if any of the given names occurs anywhere in the stream.
    pub fn contains_any(&self, names: &[&str]) -> bool {
        self.tokens.iter().any(|t| names.contains(&t.as_str()))
    }

    /// Find the first position at or after `start` whose token is one of the given names.
    pub fn position_from(&self, start: usize, names: &[&str]) -> Option<usize> {
        self.tokens
            .iter()
            .enumerate()
            .skip(start)
            .find(|(_, t)| names.contains(&t.as_str()))
            .map(|(i, _)| i)
    }

    /// Remove the token at the given position, shifting the following ones to the left.
    pub fn remove(&mut self, index: usize) -> Option<String> {
        if index < self.tokens.len() {
            Some(self.tokens.remove(index))
        } else {
            None
        }
    }

    /// Remove the value token at the given position, if there is one.
    pub fn remove_value(&mut self, index: usize) -> Option<String> {
        match self.get(index) {
            Some(token) if Token::is_value(token) => self.remove(index),
            _ => None,
        }
    }

    /// Move every remaining token into a new stream, leaving this one empty.
    pub fn take(&mut self) -> TokenStream {
        TokenStream::new(mem::take(&mut self.tokens))
    }

    /// Retrieve the remaining tokens.
    #[inline(always)]
    pub fn as_slice(&self) -> &[String] {
        &self.tokens
    }

    /// Consume the stream and return the remaining tokens.
    pub fn into_vec(self) -> Vec<String> {
        self.tokens
    }
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;

    use super::*;

    #[test]
    fn it_should_classify_tokens() {
        assert_that!(Token::classify("-f"), eq(Token::Short("-f")));
        assert_that!(Token::classify("--flag"), eq(Token::Long("--flag")));
        assert_that!(Token::classify("--"), eq(Token::Long("--")));
        assert_that!(Token::classify("-"), eq(Token::Value("-")));
        assert_that!(Token::classify("value"), eq(Token::Value("value")));
        assert_that!(
            Token::classify("-Dkey=value"),
            eq(Token::Bundled {
                flag: "-D",
                rest: "key=value"
            })
        );
    }

    #[test]
    fn it_should_split_bundled_flag_on_char_boundary() {
        assert_that!(
            Token::classify("-éx"),
            eq(Token::Bundled {
                flag: "-é",
                rest: "x"
            })
        );
        assert_that!(Token::classify("-é"), eq(Token::Short("-é")));
    }

    #[test]
    fn it_should_normalize_bundled_flags_only() {
        let tokens = normalize(["-Dkey=value", "--conf", "file", "-v", "x", "-"]);

        assert_that!(
            tokens.join(" ").as_str(),
            eq("-D key=value --conf file -v x -")
        );
    }

    #[test]
    fn it_should_keep_long_flags_with_inline_values() {
        let tokens = normalize(["--conf=file"]);

        assert_that!(tokens.len(), eq(1));
        assert_that!(tokens[0].as_str(), eq("--conf=file"));
    }

    #[test]
    fn it_should_find_names_from_position() {
        let tokens = TokenStream::from_argv(["-a", "x", "--all", "-a"]);

        assert_that!(tokens.contains_any(&["-a", "--all"]), eq(true));
        assert_that!(tokens.contains_any(&["-b"]), eq(false));
        assert_that!(tokens.position_from(0, &["-a", "--all"]), eq(Some(0)));
        assert_that!(tokens.position_from(1, &["-a", "--all"]), eq(Some(2)));
        assert_that!(tokens.position_from(3, &["--all"]), eq(None));
    }

    #[test]
    fn it_should_only_remove_value_tokens() {
        let mut tokens = TokenStream::from_argv(["-a", "x", "-b"]);

        assert_that!(tokens.remove_value(0).is_none(), eq(true));
        assert_that!(tokens.remove_value(1).as_deref(), eq(Some("x")));
        assert_that!(tokens.remove_value(1).is_none(), eq(true));
        assert_that!(tokens.remove_value(5).is_none(), eq(true));
        assert_that!(tokens.len(), eq(2));
    }

    #[test]
    fn it_should_move_remaining_tokens() {
        let mut tokens = TokenStream::from_argv(["checkout", "-b", "main"]);
        tokens.remove(0);

        let rest = tokens.take();

        assert_that!(tokens.is_empty(), eq(true));
        assert_that!(rest.len(), eq(2));
        assert_that!(rest.first(), eq(Some("-b")));
    }
}
