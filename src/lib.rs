//! # composable-soup
//!
//! Curried, pipe-composable wrappers around an HTML document tree.
//!
//! ## Overview
//!
//! Scraping code tends to nest method calls or pile up temporaries. This
//! library lets the same steps read left to right:
//!
//! - **Pipeable adapter** ([`compose`]): functions with a declared arity that
//!   can be partially applied and chained with `|`, [`pipe!`] or
//!   [`compose::pipe`]
//! - **Document tree** ([`tree`]): a [`Node`](tree::Node) handle over a
//!   document parsed by `scraper`, with search, navigation, CSS selection,
//!   text extraction and serialization
//! - **Wrappers** ([`soup`]): every tree operation as a pipeable function
//!
//! ## Feature Flags
//!
//! - `soup` (default): the pipeable wrappers and the `#[pipeable]` attribute
//!
//! ## Example
//!
//! ```rust
//! use composable_soup::prelude::*;
//!
//! let markup = r#"<div class="a"><p>Hello</p></div>"#;
//!
//! let text = pipe!(markup, parse(), find().arg("p"), get_text()).unwrap();
//! assert_eq!(text, Value::from("Hello"));
//!
//! // "No match" is a value, not an error
//! let missing = pipe!(markup, parse(), find().arg("table")).unwrap();
//! assert!(missing.is_none());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
// Note: Disabling redundant_closure_for_method_calls due to clippy 0.1.92 panic bug
#![allow(clippy::redundant_closure_for_method_calls)]

// Code generated by `#[pipeable]` names this crate by its external path.
extern crate self as composable_soup;

/// Prelude module for convenient imports.
///
/// Re-exports the adapter, the tree handle and, with the `soup` feature,
/// every wrapper.
///
/// # Usage
///
/// ```rust
/// use composable_soup::prelude::*;
/// ```
pub mod prelude {
    // `pipe` brings both the function and the macro
    pub use crate::compose::{
        Arguments, FromValue, Options, Pipeable, Pipeline, Value, partial, pipe,
    };
    pub use crate::error::{ArityError, SoupError};
    pub use crate::tree::{Attrs, Filter, Node, SearchCriteria};

    #[cfg(feature = "soup")]
    pub use crate::soup::*;
}

pub mod compose;
pub mod error;
pub mod tree;

#[cfg(feature = "soup")]
pub mod soup;

#[cfg(feature = "soup")]
pub use composable_soup_derive::pipeable;
