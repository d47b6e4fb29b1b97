//! CSS selection through the `selectors` engine bundled with scraper.

use scraper::{ElementRef, Selector};

use super::Node;
use crate::error::SoupError;

fn parse(selector: &str) -> Result<Selector, SoupError> {
    Selector::parse(selector).map_err(|error| SoupError::Selector {
        selector: selector.to_owned(),
        message: error.to_string(),
    })
}

impl Node {
    /// Descendant tags matching a CSS selector, in document order.
    ///
    /// # Errors
    ///
    /// Returns [`SoupError::Selector`] when the selector does not parse.
    pub fn select(&self, selector: &str, limit: Option<usize>) -> Result<Vec<Self>, SoupError> {
        let selector = parse(selector)?;
        let matching = self.matching(&selector);

        Ok(match limit.filter(|limit| *limit > 0) {
            Some(limit) => matching.take(limit).collect(),
            None => matching.collect(),
        })
    }

    /// The first descendant tag matching a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`SoupError::Selector`] when the selector does not parse.
    pub fn select_one(&self, selector: &str) -> Result<Option<Self>, SoupError> {
        let selector = parse(selector)?;
        let first = self.matching(&selector).next();
        Ok(first)
    }

    fn matching<'a>(&'a self, selector: &'a Selector) -> impl Iterator<Item = Self> + 'a {
        self.node_ref()
            .descendants()
            .skip(1)
            .filter(move |descendant| {
                ElementRef::wrap(*descendant).is_some_and(|element| selector.matches(&element))
            })
            .map(move |descendant| self.at(descendant.id()))
    }
}
