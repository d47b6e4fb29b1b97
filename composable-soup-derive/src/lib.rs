//! Procedural macros for composable-soup.
//!
//! # Available Attribute Macros
//!
//! - [`macro@pipeable`]: Turns a plain function into a constructor of a
//!   curried, pipe-composable `Pipeable`
//!
//! # Example
//!
//! ```rust,ignore
//! use composable_soup::compose::{Options, pipe};
//! use composable_soup::pipeable;
//! use composable_soup::tree::Node;
//!
//! #[pipeable]
//! fn has_attr(name: String, node: Node) -> bool {
//!     node.has_attr(&name)
//! }
//!
//! let document = Node::parse_document(r#"<a href="/">home</a>"#);
//! let anchor = document.find_all(&Default::default()).into_iter().last().unwrap();
//!
//! // Arity 2: supplying the name leaves a callable awaiting the node
//! let has_href = has_attr().arg("href");
//! assert_eq!(pipe(anchor, &has_href)?.as_bool(), Some(true));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod pipeable;

use proc_macro::TokenStream;

/// Wraps a function so it can be partially applied and piped.
///
/// The annotated function is replaced by a zero-argument constructor with
/// the same name and visibility that returns a `Pipeable`. The arity of the
/// `Pipeable` is the number of positional parameters of the original
/// function; a single parameter marked `#[options]` receives the keyword
/// options instead.
///
/// # Requirements
///
/// - No generic parameters, no `self` receiver, not `async`
/// - Positional parameter types must implement `FromValue`
/// - The return type must convert into `Value`, or be
///   `Result<T, SoupError>` where `T` converts into `Value`
///
/// # Example
///
/// ```rust,ignore
/// #[pipeable]
/// pub fn get_text(node: Node, #[options] mut options: Options) -> Result<String, SoupError> {
///     let separator: String = options.take("separator")?.unwrap_or_default();
///     options.finish()?;
///     Ok(node.get_text(&TextOptions { separator, ..TextOptions::default() }))
/// }
///
/// // get_text() is now a Pipeable of arity 1
/// let text = pipe(node, &get_text().with("separator", " "))?;
/// ```
#[proc_macro_attribute]
pub fn pipeable(attribute: TokenStream, item: TokenStream) -> TokenStream {
    pipeable::pipeable_impl(attribute, item)
}
