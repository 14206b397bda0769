//! Cuisine tag sets
//!
//! Catalog cuisine fields hold several tags in one string, joined by any of
//! `/`, `|` or `,` (e.g. `"North Indian, Chinese"` or `"Pizzas/Italian"`).
//! [`CuisineSet`] is the parsed, trimmed, de-duplicated form.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Delimiters that separate cuisine tags inside one field
pub const CUISINE_DELIMITERS: [char; 3] = ['/', '|', ','];

/// An ordered set of cuisine tags
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CuisineSet(BTreeSet<String>);

impl CuisineSet {
    /// Parse a raw cuisine field. Empty input gives an empty set.
    pub fn parse(raw: &str) -> Self {
        Self(split_tags(raw).collect())
    }

    /// Build a set from tags, splitting each one by the same rule as
    /// [`CuisineSet::parse`]. Already-split tags come back unchanged.
    pub fn from_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = BTreeSet::new();
        for tag in tags {
            set.extend(split_tags(tag.as_ref()));
        }
        Self(set)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains(tag)
    }

    /// Tags in sorted order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Number of tags shared with another set
    pub fn overlap(&self, other: &CuisineSet) -> usize {
        self.0.intersection(&other.0).count()
    }
}

fn split_tags(raw: &str) -> impl Iterator<Item = String> + '_ {
    raw.split(&CUISINE_DELIMITERS[..])
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
}

impl fmt::Display for CuisineSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for tag in &self.0 {
            if !first {
                f.write_str(", ")?;
            }
            f.write_str(tag)?;
            first = false;
        }
        Ok(())
    }
}

impl<S: AsRef<str>> FromIterator<S> for CuisineSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_tags(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_delimiters() {
        let set = CuisineSet::parse("North Indian, Chinese/Pizzas | Desserts");
        let tags: Vec<&str> = set.iter().collect();
        assert_eq!(tags, vec!["Chinese", "Desserts", "North Indian", "Pizzas"]);
    }

    #[test]
    fn test_parse_empty_and_blank() {
        assert!(CuisineSet::parse("").is_empty());
        assert!(CuisineSet::parse("  , / |").is_empty());
    }

    #[test]
    fn test_duplicates_collapse() {
        let set = CuisineSet::parse("Chinese,Chinese / Chinese");
        assert_eq!(set.len(), 1);
        assert!(set.contains("Chinese"));
    }

    #[test]
    fn test_split_is_idempotent() {
        let once = CuisineSet::parse("Biryani| Kebabs ,Mughlai");
        let twice = CuisineSet::from_tags(once.iter());
        assert_eq!(once, twice);

        let rejoined = CuisineSet::parse(&once.to_string());
        assert_eq!(once, rejoined);
    }

    #[test]
    fn test_overlap() {
        let query = CuisineSet::parse("North Indian/Chinese");
        assert_eq!(query.overlap(&CuisineSet::parse("Chinese")), 1);
        assert_eq!(query.overlap(&CuisineSet::parse("Italian")), 0);
    }
}
