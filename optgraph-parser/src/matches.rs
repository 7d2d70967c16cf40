//! The structured result of a successful parse.

use core::any::type_name;
use core::str::FromStr;

use indexmap::IndexMap;

use crate::error::Error;

/// Defines the result of argument parsing. This is a key-value store that offers a look-up over
/// parsed options, under either their short or long name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedArgs {
    values: IndexMap<String, Vec<String>>,
    properties: IndexMap<String, IndexMap<String, String>>,
    command: Option<(String, String)>,
}

impl ParsedArgs {
    /// Check if the option has been given, using its short or long name.
    #[inline(always)]
    pub fn has_option(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Get the first value of the option.
    pub fn get_value(&self, name: &str) -> Option<&str> {
        self.values
            .get(name)
            .and_then(|v| v.first())
            .map(String::as_str)
    }

    /// Get the first value of the option, or the given default.
    pub fn get_value_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.get_value(name).unwrap_or(default)
    }

    /// Get all the values of the option, in command line order.
    ///
    /// An option given without value yields an empty slice.
    pub fn get_values(&self, name: &str) -> Option<&[String]> {
        self.values.get(name).map(Vec::as_slice)
    }

    /// Get the `key=value` pairs collected by a property option.
    pub fn get_properties(&self, name: &str) -> Option<&IndexMap<String, String>> {
        self.properties.get(name)
    }

    /// Get a single property collected by a property option.
    pub fn get_property(&self, name: &str, key: &str) -> Option<&str> {
        self.get_properties(name)
            .and_then(|p| p.get(key))
            .map(String::as_str)
    }

    /// The long name of the selected command, if any.
    pub fn command(&self) -> Option<&str> {
        self.command.as_ref().map(|(_, long)| long.as_str())
    }

    /// Check if the given command has been selected, using its short or long name.
    pub fn has_command(&self, name: &str) -> bool {
        self.command
            .as_ref()
            .is_some_and(|(short, long)| short == name || long == name)
    }

    /// Try to get and parse the first value of the option.
    ///
    /// Returns `Ok(None)` if the option has no value.
    pub fn try_get_one<T>(&self, name: &str) -> Result<Option<T>, Error>
    where
        T: FromStr,
    {
        match self.get_value(name) {
            Some(value) => convert(name, value).map(Some),
            None => Ok(None),
        }
    }

    /// Get and parse the first value of the option, or return the default if it has no value.
    ///
    /// A value that cannot be parsed is an error, not a reason to fall back on the default.
    pub fn get_one_or<T>(&self, name: &str, default: T) -> Result<T, Error>
    where
        T: FromStr,
    {
        Ok(self.try_get_one(name)?.unwrap_or(default))
    }

    /// Try to get and parse all the values of the option. The result can be constructed from an
    /// iterator.
    pub fn try_get_many<B, T>(&self, name: &str) -> Result<Option<B>, Error>
    where
        B: FromIterator<T>,
        T: FromStr,
    {
        match self.get_values(name) {
            // Collect on Seq<Result<T, _>> can be coerced to Result<Seq<T>, _>.
            Some(values) => values
                .iter()
                .map(|v| convert(name, v))
                .collect::<Result<B, _>>()
                .map(Some),
            None => Ok(None),
        }
    }
}

impl ParsedArgs {
    pub(crate) fn record_presence(&mut self, short: &str, long: &str) {
        for name in spellings(short, long) {
            self.values.entry(name.to_string()).or_default();
        }
    }

    pub(crate) fn record_value(&mut self, short: &str, long: &str, value: String) {
        for name in spellings(short, long) {
            self.values
                .entry(name.to_string())
                .or_default()
                .push(value.clone());
        }
    }

    pub(crate) fn record_property(&mut self, short: &str, long: &str, key: &str, value: &str) {
        for name in spellings(short, long) {
            self.properties
                .entry(name.to_string())
                .or_default()
                .insert(key.to_string(), value.to_string());
        }
    }

    pub(crate) fn select_command(&mut self, short: &str, long: &str) {
        self.command = Some((short.to_string(), long.to_string()));
    }
}

/// Both spellings of an option, once if they are the same.
fn spellings<'a>(short: &'a str, long: &'a str) -> impl Iterator<Item = &'a str> {
    let long = (short != long).then_some(long);
    core::iter::once(short).chain(long)
}

fn convert<T: FromStr>(name: &str, value: &str) -> Result<T, Error> {
    value.parse::<T>().map_err(|_| Error::InvalidValue {
        option: name.to_string(),
        value: value.to_string(),
        target: type_name::<T>(),
    })
}
