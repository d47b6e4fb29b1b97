//! Error types.
//!
//! Two categories exist. [`ArityError`] is a usage error raised by the
//! pipeable adapter itself. Every other [`SoupError`] variant is raised by an
//! operation on the document tree and travels through a pipeline unchanged.

use thiserror::Error;

/// A wrapped function received more positional arguments than it declares.
///
/// # Examples
///
/// ```rust
/// use composable_soup::error::ArityError;
///
/// let error = ArityError {
///     function: "has_attr",
///     arity: 2,
///     supplied: 3,
/// };
/// assert_eq!(
///     error.to_string(),
///     "has_attr() takes 2 positional argument(s) but 3 were given"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{function}() takes {arity} positional argument(s) but {supplied} were given")]
pub struct ArityError {
    /// The name of the wrapped function.
    pub function: &'static str,
    /// The declared number of positional parameters.
    pub arity: usize,
    /// The number of positional arguments (including placeholders) supplied.
    pub supplied: usize,
}

/// A value that could not be decoded into the type a parameter expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mismatch {
    /// What the parameter accepts.
    pub expected: &'static str,
    /// The kind of value that was supplied.
    pub found: &'static str,
}

/// Errors produced while building or running a pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SoupError {
    /// Too many positional arguments.
    #[error(transparent)]
    Arity(#[from] ArityError),

    /// An argument had the wrong kind of value.
    #[error("{function}(): argument `{argument}` expected {expected}, found {found}")]
    ArgumentType {
        /// The name of the wrapped function.
        function: &'static str,
        /// Positional index (`#0`, `#1`, ...) or option key.
        argument: String,
        /// What the parameter accepts.
        expected: &'static str,
        /// The kind of value that was supplied.
        found: &'static str,
    },

    /// A positional slot was still empty when the function ran.
    #[error("{function}(): missing positional argument #{position}")]
    MissingArgument {
        /// The name of the wrapped function.
        function: &'static str,
        /// Zero-based index of the missing argument.
        position: usize,
    },

    /// A keyword option is not understood by the function.
    #[error("{function}(): unexpected option `{option}`")]
    UnexpectedOption {
        /// The name of the wrapped function.
        function: &'static str,
        /// The rejected option key.
        option: String,
    },

    /// The selector backend rejected a CSS selector.
    #[error("invalid CSS selector `{selector}`: {message}")]
    Selector {
        /// The selector as written.
        selector: String,
        /// The parser's description of the problem.
        message: String,
    },

    /// No encoding is registered under the given label.
    #[error("unknown encoding `{0}`")]
    UnknownEncoding(String),

    /// A character has no representation in the target encoding.
    #[error("'{encoding}' codec can't encode character {character:?}")]
    Encoding {
        /// Canonical name of the target encoding.
        encoding: &'static str,
        /// The character that could not be encoded.
        character: char,
    },
}

impl SoupError {
    pub(crate) fn argument_type(
        function: &'static str,
        argument: impl Into<String>,
        mismatch: Mismatch,
    ) -> Self {
        Self::ArgumentType {
            function,
            argument: argument.into(),
            expected: mismatch.expected,
            found: mismatch.found,
        }
    }
}
