//! Criteria-based search in every direction the tree can be walked.
//!
//! Each `find_*` method returns the first match or `None`; each
//! `find_all_*` / plural method returns every match up to the criteria's
//! limit. "No match" is never an error.

use super::{Node, SearchCriteria};

fn first(mut candidates: impl Iterator<Item = Node>, criteria: &SearchCriteria) -> Option<Node> {
    candidates.find(|candidate| criteria.matches(candidate))
}

fn all(candidates: impl Iterator<Item = Node>, criteria: &SearchCriteria) -> Vec<Node> {
    let matching = candidates.filter(|candidate| criteria.matches(candidate));
    match criteria.effective_limit() {
        Some(limit) => matching.take(limit).collect(),
        None => matching.collect(),
    }
}

impl Node {
    /// The first descendant (or child, when not recursive) that matches.
    pub fn find(&self, criteria: &SearchCriteria) -> Option<Self> {
        if criteria.recursive {
            first(self.descendants(), criteria)
        } else {
            first(self.children(), criteria)
        }
    }

    /// Every descendant (or child, when not recursive) that matches.
    pub fn find_all(&self, criteria: &SearchCriteria) -> Vec<Self> {
        if criteria.recursive {
            all(self.descendants(), criteria)
        } else {
            all(self.children(), criteria)
        }
    }

    /// The first match among the nodes parsed after this one.
    pub fn find_next(&self, criteria: &SearchCriteria) -> Option<Self> {
        first(self.next_elements(), criteria)
    }

    /// Every match among the nodes parsed after this one.
    pub fn find_all_next(&self, criteria: &SearchCriteria) -> Vec<Self> {
        all(self.next_elements(), criteria)
    }

    /// The nearest match among the nodes parsed before this one.
    pub fn find_previous(&self, criteria: &SearchCriteria) -> Option<Self> {
        first(self.previous_elements(), criteria)
    }

    /// Every match among the nodes parsed before this one, nearest first.
    pub fn find_all_previous(&self, criteria: &SearchCriteria) -> Vec<Self> {
        all(self.previous_elements(), criteria)
    }

    /// The nearest following sibling that matches.
    pub fn find_next_sibling(&self, criteria: &SearchCriteria) -> Option<Self> {
        first(self.next_siblings(), criteria)
    }

    /// Every following sibling that matches.
    pub fn find_next_siblings(&self, criteria: &SearchCriteria) -> Vec<Self> {
        all(self.next_siblings(), criteria)
    }

    /// The nearest preceding sibling that matches.
    pub fn find_previous_sibling(&self, criteria: &SearchCriteria) -> Option<Self> {
        first(self.previous_siblings(), criteria)
    }

    /// Every preceding sibling that matches, nearest first.
    pub fn find_previous_siblings(&self, criteria: &SearchCriteria) -> Vec<Self> {
        all(self.previous_siblings(), criteria)
    }

    /// The nearest ancestor that matches.
    pub fn find_parent(&self, criteria: &SearchCriteria) -> Option<Self> {
        first(self.parents(), criteria)
    }

    /// Every ancestor that matches, nearest first.
    pub fn find_parents(&self, criteria: &SearchCriteria) -> Vec<Self> {
        all(self.parents(), criteria)
    }
}
