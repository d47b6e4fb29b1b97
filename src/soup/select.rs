//! CSS selection.

use std::collections::BTreeMap;

use composable_soup_derive::pipeable;

use crate::compose::Options;
use crate::error::SoupError;
use crate::tree::Node;

/// Namespace prefixes are not supported by the selector backend; an empty
/// mapping is accepted so callers can pass one unconditionally.
fn reject_namespaces(options: &mut Options) -> Result<(), SoupError> {
    let namespaces: Option<BTreeMap<String, String>> = options.take("namespaces")?;
    match namespaces {
        Some(mapping) if !mapping.is_empty() => Err(SoupError::UnexpectedOption {
            function: options.function(),
            option: "namespaces".to_owned(),
        }),
        _ => Ok(()),
    }
}

/// The first descendant tag of `node` matching `selector`, or none.
///
/// # Errors
///
/// Fails with [`SoupError::Selector`] for a malformed selector and with
/// [`SoupError::UnexpectedOption`] for a non-empty `namespaces` mapping or
/// any other option.
#[pipeable]
pub fn select_one(
    node: Node,
    selector: String,
    #[options] mut options: Options,
) -> Result<Option<Node>, SoupError> {
    reject_namespaces(&mut options)?;
    options.finish()?;
    node.select_one(&selector)
}

/// Every descendant tag of `node` matching `selector`.
///
/// Options: `limit` (zero or absent means no limit) and `namespaces`.
#[pipeable]
pub fn select(
    selector: String,
    node: Node,
    #[options] mut options: Options,
) -> Result<Vec<Node>, SoupError> {
    reject_namespaces(&mut options)?;
    let limit = options.take::<usize>("limit")?;
    options.finish()?;
    node.select(&selector, limit)
}
