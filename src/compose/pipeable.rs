//! Curried, pipe-composable functions.

use std::fmt;
use std::ops::BitOr;
use std::rc::Rc;

use tracing::{debug, trace};

use super::{Arguments, Options, Value};
use crate::error::{ArityError, SoupError};
use crate::tree::Node;

type Function = Rc<dyn Fn(Arguments) -> Result<Value, SoupError>>;

/// A function with a declared arity that can be applied piecemeal.
///
/// A `Pipeable` is a `(function, arity, accumulated arguments)` triple.
/// Supplying arguments never mutates the original: every application works
/// on a clone, so a partially applied `Pipeable` can be reused as often as
/// needed.
///
/// # Applying arguments
///
/// - [`Pipeable::call`] appends arguments and runs the function as soon as
///   every slot is filled; otherwise it returns [`Value::Partial`].
/// - [`Pipeable::arg`] and [`Pipeable::placeholder`] bind arguments (or
///   holes) without running anything; they are what [`partial!`](crate::partial!)
///   expands to.
/// - Arguments passed to `call` fill holes left by `placeholder` first, in
///   order, and are appended after that.
///
/// Supplying more positional arguments than the arity is an
/// [`ArityError`]. Binding with `arg` defers the check to the next call.
///
/// # Examples
///
/// ```rust
/// use composable_soup::compose::{Pipeable, Value};
///
/// let concat = Pipeable::new("concat", 2, |mut arguments| {
///     let left: String = arguments.positional(0)?;
///     let right: String = arguments.positional(1)?;
///     Ok(Value::from(left + &right))
/// });
///
/// let greet = concat.call(["Hello, "]).unwrap().into_partial().unwrap();
/// assert_eq!(greet.call(["world"]).unwrap(), Value::from("Hello, world"));
/// assert!(concat.call(["a", "b", "c"]).is_err());
/// ```
#[derive(Clone)]
pub struct Pipeable {
    name: &'static str,
    arity: usize,
    function: Function,
    slots: Vec<Option<Value>>,
    options: Options,
}

impl Pipeable {
    /// Wraps `function`, recording its name and arity.
    pub fn new(
        name: &'static str,
        arity: usize,
        function: impl Fn(Arguments) -> Result<Value, SoupError> + 'static,
    ) -> Self {
        Self {
            name,
            arity,
            function: Rc::new(function),
            slots: Vec::new(),
            options: Options::new(),
        }
    }

    /// The name used in error messages.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The declared number of positional parameters.
    pub const fn arity(&self) -> usize {
        self.arity
    }

    /// How many positional arguments have been supplied.
    pub fn supplied(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// How many positional arguments are still needed.
    pub fn remaining(&self) -> usize {
        let holes = self.slots.iter().filter(|slot| slot.is_none()).count();
        holes + self.arity.saturating_sub(self.slots.len())
    }

    /// The keyword options bound so far.
    pub const fn options(&self) -> &Options {
        &self.options
    }

    /// Binds the next positional argument without running the function.
    #[must_use]
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.slots.push(Some(value.into()));
        self
    }

    /// Leaves a positional hole for a later [`Pipeable::call`] to fill.
    #[must_use]
    pub fn placeholder(mut self) -> Self {
        self.slots.push(None);
        self
    }

    /// Binds a keyword option.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key, value);
        self
    }

    /// Binds several keyword options; later bindings win.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options.merge(options);
        self
    }

    /// Supplies positional arguments and runs the function if it is now
    /// fully applied.
    ///
    /// # Errors
    ///
    /// Returns [`SoupError::Arity`] when the arguments overflow the arity,
    /// and whatever the wrapped function returns otherwise.
    pub fn call<I, V>(&self, arguments: I) -> Result<Value, SoupError>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let mut applied = self.clone();
        for argument in arguments {
            applied.fill(argument.into());
        }
        applied.resolve()
    }

    /// Runs the function with the arguments bound so far.
    ///
    /// # Errors
    ///
    /// Returns [`SoupError::Arity`] on overflow,
    /// [`SoupError::MissingArgument`] when a slot is still empty, and
    /// whatever the wrapped function returns otherwise.
    pub fn invoke(&self) -> Result<Value, SoupError> {
        self.check_arity()?;
        self.clone().run()
    }

    fn fill(&mut self, value: Value) {
        match self.slots.iter_mut().find(|slot| slot.is_none()) {
            Some(hole) => *hole = Some(value),
            None => self.slots.push(Some(value)),
        }
    }

    fn check_arity(&self) -> Result<(), ArityError> {
        if self.slots.len() > self.arity {
            debug!(
                function = self.name,
                arity = self.arity,
                supplied = self.slots.len(),
                "too many positional arguments"
            );
            return Err(ArityError {
                function: self.name,
                arity: self.arity,
                supplied: self.slots.len(),
            });
        }
        Ok(())
    }

    fn resolve(self) -> Result<Value, SoupError> {
        self.check_arity()?;
        if self.remaining() == 0 {
            self.run()
        } else {
            trace!(
                function = self.name,
                supplied = self.supplied(),
                remaining = self.remaining(),
                "partially applied"
            );
            Ok(Value::Partial(Box::new(self)))
        }
    }

    fn run(self) -> Result<Value, SoupError> {
        trace!(function = self.name, arity = self.arity, "invoking");
        let arguments = Arguments::new(self.name, self.slots, self.options);
        (self.function)(arguments)
    }
}

impl fmt::Debug for Pipeable {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Pipeable")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .field("slots", &self.slots)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl PartialEq for Pipeable {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.arity == other.arity
            && Rc::ptr_eq(&self.function, &other.function)
            && self.slots == other.slots
            && self.options == other.options
    }
}

/// Feeds `left` to `right` as its next positional argument.
///
/// # Errors
///
/// See [`Pipeable::call`].
///
/// # Examples
///
/// ```rust
/// use composable_soup::compose::{Pipeable, Value, pipe};
///
/// let length = Pipeable::new("length", 1, |mut arguments| {
///     let text: String = arguments.positional(0)?;
///     Ok(Value::from(text.len()))
/// });
///
/// assert_eq!(pipe("soup", &length).unwrap(), Value::Int(4));
/// ```
pub fn pipe(left: impl Into<Value>, right: &Pipeable) -> Result<Value, SoupError> {
    right.call([left.into()])
}

/// A left-to-right chain of pipeable stages.
///
/// Each stage runs as soon as it is added. A failed stage short-circuits
/// the rest of the chain and its error is returned by
/// [`Pipeline::into_result`].
#[derive(Clone, Debug, PartialEq)]
pub struct Pipeline(Result<Value, SoupError>);

impl Pipeline {
    /// Starts a chain from a value.
    pub fn new(value: impl Into<Value>) -> Self {
        Self(Ok(value.into()))
    }

    /// Feeds the current value to the next stage.
    #[must_use]
    pub fn then(self, function: &Pipeable) -> Self {
        Self(self.0.and_then(|value| pipe(value, function)))
    }

    /// The value at the end of the chain.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by a stage.
    pub fn into_result(self) -> Result<Value, SoupError> {
        self.0
    }
}

impl From<Pipeline> for Result<Value, SoupError> {
    fn from(pipeline: Pipeline) -> Self {
        pipeline.0
    }
}

impl BitOr<Pipeable> for Pipeline {
    type Output = Self;

    fn bitor(self, function: Pipeable) -> Self {
        self.then(&function)
    }
}

impl BitOr<&Pipeable> for Pipeline {
    type Output = Self;

    fn bitor(self, function: &Pipeable) -> Self {
        self.then(function)
    }
}

macro_rules! impl_pipe_operator {
    ($($source:ty),* $(,)?) => {
        $(
            impl BitOr<Pipeable> for $source {
                type Output = Pipeline;

                fn bitor(self, function: Pipeable) -> Pipeline {
                    Pipeline::new(self).then(&function)
                }
            }
        )*
    };
}

impl_pipe_operator!(Value, Node, &str, String);

/// `first | second` composes two pipeables into one that awaits whatever
/// `first` still needs, runs it, and pipes the result into `second`.
///
/// Options bound on the composed pipeable go to `first`.
///
/// The composed pipeable keeps `first`'s name, since its positional
/// parameters are the ones `first` still awaits. Supplying too many of them
/// is reported against `first`. Errors raised while `second` runs name
/// `second`, because it is applied under its own name.
impl BitOr for Pipeable {
    type Output = Self;

    fn bitor(self, second: Self) -> Self {
        let name = self.name;
        let arity = self.remaining();
        let first = self;

        Self::new(name, arity, move |mut arguments| {
            let options = arguments.options();
            let positional = arguments.into_positional()?;
            let intermediate = first.clone().with_options(options).call(positional)?;
            pipe(intermediate, &second)
        })
    }
}
