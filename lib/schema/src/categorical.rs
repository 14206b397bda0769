//! Categorical encoders
//!
//! [`OneHotEncoder`] maps a single category (the city) to one slot;
//! [`MultiHotEncoder`] maps a tag set (the cuisines) to one slot per tag.
//! Both are fitted on a sorted vocabulary and silently ignore values they
//! have not seen.

use ahash::AHashMap;
use dishx_core::CuisineSet;
use std::collections::BTreeSet;

/// Sorted list of distinct terms with O(1) position lookup
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    terms: Vec<String>,
    positions: AHashMap<String, usize>,
}

impl Vocabulary {
    pub fn fit<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let terms: Vec<String> = terms
            .into_iter()
            .map(Into::into)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let positions = terms
            .iter()
            .enumerate()
            .map(|(i, t)| (t.clone(), i))
            .collect();
        Self { terms, positions }
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    #[inline]
    pub fn position(&self, term: &str) -> Option<usize> {
        self.positions.get(term).copied()
    }
}

/// One-hot encoder for a single categorical value
#[derive(Debug, Clone, Default)]
pub struct OneHotEncoder {
    vocabulary: Vocabulary,
}

impl OneHotEncoder {
    pub fn fit<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            vocabulary: Vocabulary::fit(values),
        }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn width(&self) -> usize {
        self.vocabulary.len()
    }

    /// Set the slot of `value` in `out` (which must be zeroed and `width()`
    /// long). Returns false, leaving `out` untouched, for unseen values.
    pub fn encode_into(&self, value: &str, out: &mut [f32]) -> bool {
        match self.vocabulary.position(value) {
            Some(i) => {
                out[i] = 1.0;
                true
            }
            None => false,
        }
    }
}

/// Multi-hot encoder for tag sets
#[derive(Debug, Clone, Default)]
pub struct MultiHotEncoder {
    vocabulary: Vocabulary,
}

impl MultiHotEncoder {
    pub fn fit<'a, I>(sets: I) -> Self
    where
        I: IntoIterator<Item = &'a CuisineSet>,
    {
        let tags = sets.into_iter().flat_map(|s| s.iter().map(str::to_string));
        Self {
            vocabulary: Vocabulary::fit(tags),
        }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn width(&self) -> usize {
        self.vocabulary.len()
    }

    /// Set one slot per known tag in `out` (zeroed, `width()` long).
    /// Returns the tags that were not in the vocabulary.
    pub fn encode_into<'a>(&self, tags: &'a CuisineSet, out: &mut [f32]) -> Vec<&'a str> {
        let mut unknown = Vec::new();
        for tag in tags.iter() {
            match self.vocabulary.position(tag) {
                Some(i) => out[i] = 1.0,
                None => unknown.push(tag),
            }
        }
        unknown
    }
}
