//! Pipeable wrappers around the document tree.
//!
//! Every function here is a constructor: `find()` returns a
//! [`Pipeable`](crate::compose::Pipeable) that delegates to
//! [`Node::find`] once its positional arguments are supplied. Optional
//! parameters are keyword [`Options`] bound with `.with(key, value)`.
//!
//! # Parameter order
//!
//! The node comes last where a pipeline naturally supplies the other
//! argument first (`find`, `find_all`, `has_attr`, `get`, `select`), and
//! first (as the only positional argument) everywhere else.
//!
//! | Function | Positional | Options |
//! |---|---|---|
//! | [`parse`] | markup | `fragment`, `from_encoding` |
//! | [`find`], [`find_all`] | name, node | `attrs`, `recursive`, `string`, `limit` (`find_all`), attribute filters |
//! | [`find_next`] and the other directional searches | node | `name`, `attrs`, `string`, `limit` (plural forms), attribute filters |
//! | [`children`] and the other traversals | node | none |
//! | [`get_text`], [`strings`] | node | `separator` (`get_text`), `strip`, `types` |
//! | [`stripped_strings`] | node | none |
//! | [`has_attr`], [`get`] | name, node | none |
//! | [`select_one`] | node, selector | `namespaces` |
//! | [`select`] | selector, node | `namespaces`, `limit` |
//! | [`decode`], [`decode_contents`] | node | `pretty_print`, `indent_level`, `indent`, `formatter` |
//! | [`encode`], [`encode_contents`] | node | as `decode`, plus `encoding`, `errors` |
//! | [`prettify`] | node | `formatter`, `encoding`, `errors` |
//!
//! # Examples
//!
//! ```rust
//! use composable_soup::compose::Value;
//! use composable_soup::soup::{find, get_text, has_attr, parse};
//!
//! let text = (Value::from(r#"<div class="a"><p>Hello</p></div>"#)
//!     | parse()
//!     | find().arg("p")
//!     | get_text())
//! .into_result()
//! .unwrap();
//! assert_eq!(text, Value::from("Hello"));
//!
//! let missing = ("<p>x</p>" | parse() | find().arg("table")).into_result().unwrap();
//! assert!(missing.is_none());
//! ```

mod navigate;
mod render;
mod search;
mod select;
mod text;

pub use navigate::{
    children, descendants, next_elements, next_siblings, parents, previous_elements,
    previous_siblings,
};
pub use render::{decode, decode_contents, encode, encode_contents, prettify};
pub use search::{
    find, find_all, find_all_next, find_all_previous, find_next, find_next_sibling,
    find_next_siblings, find_parent, find_parents, find_previous, find_previous_sibling,
    find_previous_siblings,
};
pub use select::{select, select_one};
pub use text::{get, get_text, has_attr, stripped_strings, strings};

use composable_soup_derive::pipeable;

use crate::compose::{FromValue, Options, Value};
use crate::error::{Mismatch, SoupError};
use crate::tree::{Attrs, Filter, Node, SearchCriteria, decode_markup};

/// Which criteria keys a search understands besides attribute filters.
#[derive(Clone, Copy)]
struct Accepts {
    name: bool,
    recursive: bool,
    limit: bool,
}

/// Builds search criteria from keyword options.
///
/// Known keys are consumed; every other key becomes an attribute filter,
/// with `class_` standing for `class`.
fn criteria(
    name: Filter,
    options: &mut Options,
    accepts: Accepts,
) -> Result<SearchCriteria, SoupError> {
    let function = options.function();
    let name = if accepts.name {
        options.take::<Filter>("name")?.unwrap_or(name)
    } else {
        name
    };

    let mut criteria = SearchCriteria {
        name,
        attrs: options.take::<Attrs>("attrs")?.unwrap_or_default(),
        ..SearchCriteria::default()
    };

    if let Some(string) = options.take::<Filter>("string")? {
        criteria.string = string;
    } else if let Some(text) = options.take::<Filter>("text")? {
        criteria.string = text;
    }
    if accepts.recursive {
        criteria.recursive = options.take_or("recursive", true)?;
    }
    if accepts.limit {
        criteria.limit = options.take::<usize>("limit")?;
    }

    for (key, value) in options.drain() {
        let filter = Filter::from_value(value)
            .map_err(|mismatch: Mismatch| SoupError::argument_type(function, key.as_str(), mismatch))?;
        let attribute = if key == "class_" { "class".to_owned() } else { key };
        criteria.attrs.insert(attribute, filter);
    }

    Ok(criteria)
}

/// Parses markup into a document and returns its root.
///
/// Text is parsed as is. Bytes are decoded first, using the
/// `from_encoding` label when given. With `fragment: true` the markup is
/// parsed as a body fragment instead of a whole document.
#[pipeable]
pub fn parse(markup: Value, #[options] mut options: Options) -> Result<Node, SoupError> {
    let fragment = options.take_or("fragment", false)?;
    let from_encoding = options.take::<String>("from_encoding")?;
    let function = options.function();
    options.finish()?;

    let markup = match markup {
        Value::Text(text) => text,
        Value::Bytes(bytes) => decode_markup(&bytes, from_encoding.as_deref())?,
        other => {
            return Err(SoupError::argument_type(
                function,
                "#0",
                Mismatch {
                    expected: "markup text or bytes",
                    found: other.kind(),
                },
            ));
        }
    };

    Ok(if fragment {
        Node::parse_fragment(&markup)
    } else {
        Node::parse_document(&markup)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn accepts_all() -> Accepts {
        Accepts {
            name: true,
            recursive: true,
            limit: true,
        }
    }

    #[rstest]
    fn leftover_keys_become_attribute_filters() {
        let mut options = Options::new()
            .with("id", "main")
            .with("class_", "wide")
            .with("limit", 3_usize);

        let criteria = criteria(Filter::from("div"), &mut options, accepts_all())
            .expect("options decode");

        assert_eq!(criteria.limit, Some(3));
        assert_eq!(
            criteria.attrs,
            Attrs::new().with("id", "main").with("class", "wide")
        );
        assert!(options.is_empty());
    }

    #[rstest]
    fn unaccepted_keys_are_read_as_attribute_filters() {
        let accepts = Accepts {
            recursive: false,
            limit: false,
            ..accepts_all()
        };

        let mut flag = Options::new().with("recursive", false);
        let criteria = criteria(Filter::Any, &mut flag, accepts).expect("bools are filters");
        assert_eq!(criteria.attrs, Attrs::new().with("recursive", Filter::Absent));

        let mut number = Options::new().with("limit", 3_usize);
        let error = super::criteria(Filter::Any, &mut number, accepts)
            .expect_err("integers are not filters");
        assert!(matches!(error, SoupError::ArgumentType { ref argument, .. } if argument == "limit"));
    }

    #[rstest]
    fn text_is_an_alias_for_string() {
        let mut options = Options::new().with("text", "Hello");

        let criteria = criteria(Filter::Any, &mut options, accepts_all()).expect("options decode");

        assert_eq!(criteria.string, Filter::from("Hello"));
    }

    #[rstest]
    fn parse_accepts_text_and_bytes() {
        let from_text = parse().call(["<p>x</p>"]).expect("text parses");
        let from_bytes = parse()
            .with("from_encoding", "latin1")
            .call([Value::Bytes(vec![b'<', b'p', b'>', 0xE9])])
            .expect("bytes parse");

        let paragraph = Node::from_value(from_bytes)
            .expect("a node")
            .find(&SearchCriteria::new().name("p"))
            .expect("p exists");
        assert_eq!(paragraph.string().as_deref(), Some("é"));
        assert!(from_text.as_node().is_some());
    }

    #[rstest]
    fn parse_rejects_other_values() {
        let error = parse().call([true]).expect_err("a bool is not markup");

        assert!(matches!(error, SoupError::ArgumentType { function: "parse", .. }));
    }
}
