//! Serialization.
//!
//! Shared options: `pretty_print` (defaults to whether `indent_level` was
//! given), `indent_level`, `indent` (spaces per level, default 1) and
//! `formatter` (`"minimal"`, `"html5"`, or none for verbatim output). The
//! `encode` variants add `encoding` (default `"utf-8"`) and `errors`
//! (default `"xmlcharrefreplace"`).

use composable_soup_derive::pipeable;

use crate::compose::{Options, Value};
use crate::error::SoupError;
use crate::tree::{EncodeErrors, Formatter, Node, RenderOptions, encode_text};

const DEFAULT_ENCODING: &str = "utf-8";

fn render_options(options: &mut Options) -> Result<RenderOptions, SoupError> {
    let defaults = RenderOptions::default();
    let indent_level = options.take::<usize>("indent_level")?;

    Ok(RenderOptions {
        formatter: options.take_or("formatter", defaults.formatter)?,
        pretty_print: options.take_or("pretty_print", indent_level.is_some())?,
        indent_level: indent_level.unwrap_or(defaults.indent_level),
        indent: options.take_or("indent", defaults.indent)?,
    })
}

fn encoding_options(options: &mut Options) -> Result<(String, EncodeErrors), SoupError> {
    Ok((
        options.take_or("encoding", DEFAULT_ENCODING.to_owned())?,
        options.take_or("errors", EncodeErrors::default())?,
    ))
}

/// `node` and everything below it as markup.
#[pipeable]
pub fn decode(node: Node, #[options] mut options: Options) -> Result<String, SoupError> {
    let render = render_options(&mut options)?;
    options.finish()?;
    Ok(node.decode(&render))
}

/// Everything below `node` as markup.
#[pipeable]
pub fn decode_contents(node: Node, #[options] mut options: Options) -> Result<String, SoupError> {
    let render = render_options(&mut options)?;
    options.finish()?;
    Ok(node.decode_contents(&render))
}

/// [`decode`] followed by encoding to bytes.
#[pipeable]
pub fn encode(node: Node, #[options] mut options: Options) -> Result<Vec<u8>, SoupError> {
    let render = render_options(&mut options)?;
    let (encoding, errors) = encoding_options(&mut options)?;
    options.finish()?;
    node.encode(&render, &encoding, errors)
}

/// [`decode_contents`] followed by encoding to bytes.
#[pipeable]
pub fn encode_contents(node: Node, #[options] mut options: Options) -> Result<Vec<u8>, SoupError> {
    let render = render_options(&mut options)?;
    let (encoding, errors) = encoding_options(&mut options)?;
    options.finish()?;
    node.encode_contents(&render, &encoding, errors)
}

/// `node` pretty-printed: text, or bytes when `encoding` is given.
#[pipeable]
pub fn prettify(node: Node, #[options] mut options: Options) -> Result<Value, SoupError> {
    let formatter = options.take_or("formatter", Formatter::default())?;
    let encoding = options.take::<String>("encoding")?;
    let errors = options.take_or("errors", EncodeErrors::default())?;
    options.finish()?;

    let pretty = node.prettify(formatter);
    match encoding {
        Some(encoding) => encode_text(&pretty, &encoding, errors).map(Value::Bytes),
        None => Ok(Value::Text(pretty)),
    }
}
