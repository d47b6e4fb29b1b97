//! The argument bundle handed to a wrapped function.

use std::collections::BTreeMap;
use std::collections::btree_map;

use super::{FromValue, Value};
use crate::error::SoupError;

/// Keyword options supplied alongside the positional arguments.
///
/// Options stand in for open-ended keyword arguments: a wrapped function
/// takes the keys it understands and either rejects the rest with
/// [`Options::finish`] or interprets them itself (the find family turns them
/// into attribute filters).
///
/// # Examples
///
/// ```rust
/// use composable_soup::compose::Options;
///
/// let mut options = Options::new().with("separator", " ").with("strip", true);
///
/// assert_eq!(options.take::<String>("separator").unwrap().as_deref(), Some(" "));
/// assert_eq!(options.take::<bool>("strip").unwrap(), Some(true));
/// assert!(options.finish().is_ok());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Options {
    function: &'static str,
    entries: BTreeMap<String, Value>,
}

impl Options {
    /// No options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an option.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Adds or replaces an option.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Merges another set of options into this one; its entries win.
    pub fn merge(&mut self, other: Self) {
        self.entries.extend(other.entries);
    }

    /// Whether no option is set.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The number of options set.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// The raw value of an option.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// The name of the function these options were handed to.
    ///
    /// Empty until the options reach a function.
    pub const fn function(&self) -> &'static str {
        self.function
    }

    /// Removes an option and decodes it.
    ///
    /// # Errors
    ///
    /// Returns [`SoupError::ArgumentType`] when the value does not decode.
    pub fn take<T: FromValue>(&mut self, key: &str) -> Result<Option<T>, SoupError> {
        self.entries
            .remove(key)
            .map(|value| {
                T::from_value(value)
                    .map_err(|mismatch| SoupError::argument_type(self.function, key, mismatch))
            })
            .transpose()
    }

    /// Removes an option and decodes it, falling back to `default`.
    ///
    /// # Errors
    ///
    /// Returns [`SoupError::ArgumentType`] when the value does not decode.
    pub fn take_or<T: FromValue>(&mut self, key: &str, default: T) -> Result<T, SoupError> {
        Ok(self.take(key)?.unwrap_or(default))
    }

    /// Removes and returns every remaining option.
    pub fn drain(&mut self) -> btree_map::IntoIter<String, Value> {
        std::mem::take(&mut self.entries).into_iter()
    }

    /// Rejects options that nobody took.
    ///
    /// # Errors
    ///
    /// Returns [`SoupError::UnexpectedOption`] naming the first leftover key.
    pub fn finish(self) -> Result<(), SoupError> {
        match self.entries.into_keys().next() {
            Some(option) => Err(SoupError::UnexpectedOption {
                function: self.function,
                option,
            }),
            None => Ok(()),
        }
    }

    pub(crate) fn for_function(mut self, function: &'static str) -> Self {
        self.function = function;
        self
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Options {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(entries: I) -> Self {
        Self {
            function: "",
            entries: entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

/// Everything a wrapped function receives when it finally runs.
///
/// Positional slots are decoded one by one with
/// [`Arguments::positional`]; each slot can be taken once.
#[derive(Debug)]
pub struct Arguments {
    function: &'static str,
    positional: Vec<Option<Value>>,
    options: Options,
}

impl Arguments {
    pub(crate) fn new(
        function: &'static str,
        positional: Vec<Option<Value>>,
        options: Options,
    ) -> Self {
        Self {
            function,
            positional,
            options: options.for_function(function),
        }
    }

    /// The name of the function being run.
    pub const fn function(&self) -> &'static str {
        self.function
    }

    /// The number of positional slots.
    pub fn len(&self) -> usize {
        self.positional.len()
    }

    /// Whether no positional slot was supplied.
    pub fn is_empty(&self) -> bool {
        self.positional.is_empty()
    }

    /// Takes and decodes the positional argument at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`SoupError::MissingArgument`] when the slot is empty (or was
    /// already taken) and [`SoupError::ArgumentType`] when it does not
    /// decode.
    pub fn positional<T: FromValue>(&mut self, index: usize) -> Result<T, SoupError> {
        let value = self
            .positional
            .get_mut(index)
            .and_then(Option::take)
            .ok_or(SoupError::MissingArgument {
                function: self.function,
                position: index,
            })?;

        T::from_value(value)
            .map_err(|mismatch| SoupError::argument_type(self.function, format!("#{index}"), mismatch))
    }

    /// Takes the keyword options, leaving none behind.
    pub fn options(&mut self) -> Options {
        let function = self.function;
        std::mem::take(&mut self.options).for_function(function)
    }

    /// Takes every positional argument in order.
    ///
    /// # Errors
    ///
    /// Returns [`SoupError::MissingArgument`] for the first empty slot.
    pub fn into_positional(self) -> Result<Vec<Value>, SoupError> {
        let function = self.function;
        self.positional
            .into_iter()
            .enumerate()
            .map(|(position, slot)| slot.ok_or(SoupError::MissingArgument { function, position }))
            .collect()
    }
}
