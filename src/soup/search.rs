//! Criteria-based searches.
//!
//! `find` and `find_all` take the name filter first and the node last, so a
//! pipeline can bind the name and feed the node. The directional searches
//! take the node as their only positional argument and read the name filter
//! from the `name` option.

use composable_soup_derive::pipeable;

use super::{Accepts, criteria};
use crate::compose::Options;
use crate::error::SoupError;
use crate::tree::{Filter, Node};

const DOWNWARD_ONE: Accepts = Accepts {
    name: false,
    recursive: true,
    limit: false,
};

const DOWNWARD_ALL: Accepts = Accepts {
    name: false,
    recursive: true,
    limit: true,
};

const DIRECTIONAL_ONE: Accepts = Accepts {
    name: true,
    recursive: false,
    limit: false,
};

const DIRECTIONAL_ALL: Accepts = Accepts {
    name: true,
    recursive: false,
    limit: true,
};

/// The first descendant matching `name` and the options, or none.
#[pipeable]
pub fn find(
    name: Filter,
    node: Node,
    #[options] mut options: Options,
) -> Result<Option<Node>, SoupError> {
    let criteria = criteria(name, &mut options, DOWNWARD_ONE)?;
    Ok(node.find(&criteria))
}

/// Every descendant matching `name` and the options.
#[pipeable]
pub fn find_all(
    name: Filter,
    node: Node,
    #[options] mut options: Options,
) -> Result<Vec<Node>, SoupError> {
    let criteria = criteria(name, &mut options, DOWNWARD_ALL)?;
    Ok(node.find_all(&criteria))
}

macro_rules! directional {
    ($(#[$meta:meta])* $name:ident, one) => {
        $(#[$meta])*
        #[pipeable]
        pub fn $name(node: Node, #[options] mut options: Options) -> Result<Option<Node>, SoupError> {
            let criteria = criteria(Filter::Any, &mut options, DIRECTIONAL_ONE)?;
            Ok(node.$name(&criteria))
        }
    };
    ($(#[$meta:meta])* $name:ident, all) => {
        $(#[$meta])*
        #[pipeable]
        pub fn $name(node: Node, #[options] mut options: Options) -> Result<Vec<Node>, SoupError> {
            let criteria = criteria(Filter::Any, &mut options, DIRECTIONAL_ALL)?;
            Ok(node.$name(&criteria))
        }
    };
}

directional!(
    /// The first matching node parsed after `node`.
    find_next, one
);
directional!(
    /// Every matching node parsed after `node`.
    find_all_next, all
);
directional!(
    /// The nearest matching node parsed before `node`.
    find_previous, one
);
directional!(
    /// Every matching node parsed before `node`, nearest first.
    find_all_previous, all
);
directional!(
    /// The nearest matching following sibling.
    find_next_sibling, one
);
directional!(
    /// Every matching following sibling.
    find_next_siblings, all
);
directional!(
    /// The nearest matching preceding sibling.
    find_previous_sibling, one
);
directional!(
    /// Every matching preceding sibling, nearest first.
    find_previous_siblings, all
);
directional!(
    /// The nearest matching ancestor.
    find_parent, one
);
directional!(
    /// Every matching ancestor, nearest first.
    find_parents, all
);
