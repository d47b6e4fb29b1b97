//! Text extraction and attribute access.

use composable_soup_derive::pipeable;

use crate::compose::Options;
use crate::error::SoupError;
use crate::tree::{Node, TextKind, TextOptions};

/// The strings below `node` joined with `separator`.
///
/// Options: `separator` (default empty), `strip` (default `false`) and
/// `types`, a text-kind label or list of labels (default `"text"`, which
/// leaves out scripts, stylesheets, templates and comments).
#[pipeable]
pub fn get_text(node: Node, #[options] mut options: Options) -> Result<String, SoupError> {
    let defaults = TextOptions::default();
    let text_options = TextOptions {
        separator: options.take_or("separator", defaults.separator)?,
        strip: options.take_or("strip", defaults.strip)?,
        types: options.take_or("types", defaults.types)?,
    };
    options.finish()?;

    Ok(node.get_text(&text_options))
}

/// Every string below `node`, optionally stripped.
#[pipeable]
pub fn strings(node: Node, #[options] mut options: Options) -> Result<Vec<String>, SoupError> {
    let strip = options.take_or("strip", false)?;
    let types: Vec<TextKind> = options.take_or("types", TextKind::DEFAULT.to_vec())?;
    options.finish()?;

    Ok(node.strings(strip, &types))
}

/// Ordinary strings below `node`, trimmed, with empty ones dropped.
#[pipeable]
pub fn stripped_strings(node: Node) -> Vec<String> {
    node.stripped_strings()
}

/// Whether `node` carries the attribute `name`. Never fails for a node
/// lacking it, and is `false` for anything that is not a tag.
#[pipeable]
pub fn has_attr(name: String, node: Node) -> bool {
    node.has_attr(&name)
}

/// The value of attribute `name`, or none.
#[pipeable]
pub fn get(name: String, node: Node) -> Option<String> {
    node.attr(&name).map(str::to_owned)
}
