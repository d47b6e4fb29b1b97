//! The pipeable adapter.
//!
//! This module turns functions with a fixed number of positional parameters
//! into values that can be partially applied and chained left to right.
//!
//! # Overview
//!
//! - [`Pipeable`]: a function, its declared arity, and the arguments bound
//!   so far
//! - [`Value`]: the dynamic value passed between stages
//! - [`Arguments`] / [`Options`]: what a wrapped function receives
//! - [`pipe`], [`Pipeline`] and the `|` operator: left-to-right application
//! - [`pipe!`]: a whole pipeline in one expression
//! - [`partial!`]: argument binding with `__` placeholders
//!
//! # Examples
//!
//! ## Partial application
//!
//! ```
//! use composable_soup::compose::{Pipeable, Value};
//!
//! let repeat = Pipeable::new("repeat", 2, |mut arguments| {
//!     let count: usize = arguments.positional(0)?;
//!     let text: String = arguments.positional(1)?;
//!     Ok(Value::from(text.repeat(count)))
//! });
//!
//! // One of two arguments: a partial application comes back
//! let twice = repeat.call([2_usize]).unwrap().into_partial().unwrap();
//! assert_eq!(twice.call(["ab"]).unwrap(), Value::from("abab"));
//! ```
//!
//! ## Pipeline
//!
//! ```
//! use composable_soup::compose::{Pipeable, Value};
//!
//! let length = Pipeable::new("length", 1, |mut arguments| {
//!     let text: String = arguments.positional(0)?;
//!     Ok(Value::from(text.len()))
//! });
//! let is_even = Pipeable::new("is_even", 1, |mut arguments| {
//!     let number: i64 = arguments.positional(0)?;
//!     Ok(Value::from(number % 2 == 0))
//! });
//!
//! let result = ("soup" | length | is_even).into_result();
//! assert_eq!(result.unwrap(), Value::Bool(true));
//! ```
//!
//! # Laws
//!
//! - **Partial-application equivalence**: for a pipeable of arity `n` and
//!   any split `k < n`, `f.call(first_k)` followed by a call with the other
//!   `n - k` arguments equals `f.call(all_n)`.
//! - **Pipe associativity**: `x | f | g` equals `pipe(pipe(x, f)?, g)` and
//!   `x | (f | g)`.
//! - **Arity**: `n + 1` positional arguments fail with
//!   [`ArityError`](crate::error::ArityError); exactly `n` run the function.

mod arguments;
mod partial_macro;
mod pipe_macro;
mod pipeable;
mod value;

pub use arguments::{Arguments, Options};
pub use pipeable::{Pipeable, Pipeline, pipe};
pub use value::{FromValue, Value};

// Re-export macros (they are already at crate root via #[macro_export])
pub use crate::partial;
pub use crate::pipe;
