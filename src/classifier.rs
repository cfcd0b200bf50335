//! Pluggable equivalence for grouping and set operators.
//!
//! A [`Classifier`] maps an element to a canonical key. Two elements are
//! equivalent exactly when their keys are equal, and the hash of an element is
//! the hash of its key, so `equivalent(a, b)` always implies
//! `hash_of(a) == hash_of(b)`. Because equivalence is key equality it is
//! reflexive, symmetric and transitive for every classifier.
//!
//! Built-ins:
//! - [`Natural`] -- the element's own `Eq + Hash`.
//! - [`KeyOf`] (via [`key_of`]) -- a caller-selected sub-key.
//! - [`AnagramClassifier`] -- words made of the same letters and digits.
//! - [`CaseInsensitive`] -- strings equal up to case.
//!
//! ```
//! use ironquery::{AnagramClassifier, Classifier};
//!
//! let c = AnagramClassifier;
//! assert!(c.equivalent("listen", "silent").unwrap());
//! assert!(!c.equivalent("apple", "apply").unwrap());
//! ```

use crate::error::{QueryError, Result};
use std::collections::hash_map::DefaultHasher;
use std::fmt::Debug;
use std::hash::{Hash, Hasher};

/// Equality-and-hash strategy used instead of an element's own equality.
pub trait Classifier<T: ?Sized>: Send + Sync {
    /// Canonical form two equivalent elements share.
    type Key: Eq + Hash + Debug + Send + Sync + 'static;

    /// Derive the canonical key of `element`.
    ///
    /// # Errors
    /// [`QueryError::InvalidArgument`] when `element` carries no value the
    /// classifier can work with.
    fn canonicalize(&self, element: &T) -> Result<Self::Key>;

    /// `true` when both elements share a canonical key.
    fn equivalent(&self, a: &T, b: &T) -> Result<bool> {
        Ok(self.canonicalize(a)? == self.canonicalize(b)?)
    }

    /// Hash of the canonical key.
    fn hash_of(&self, element: &T) -> Result<u64> {
        let key = self.canonicalize(element)?;
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        Ok(hasher.finish())
    }
}

/* ===================== Natural ===================== */

/// Identity classifier: the element is its own key.
#[derive(Clone, Copy, Debug, Default)]
pub struct Natural;

impl<T> Classifier<T> for Natural
where
    T: Eq + Hash + Debug + Clone + Send + Sync + 'static,
{
    type Key = T;

    fn canonicalize(&self, element: &T) -> Result<T> {
        Ok(element.clone())
    }
}

/* ===================== KeyOf ===================== */

/// Classifier comparing elements by a projected sub-key.
#[derive(Clone, Copy, Debug)]
pub struct KeyOf<F>(F);

/// Build a [`KeyOf`] classifier from a key selector.
///
/// ```
/// use ironquery::{key_of, Classifier};
///
/// let by_len = key_of(|s: &String| s.len());
/// assert!(by_len.equivalent(&"abc".to_string(), &"xyz".to_string()).unwrap());
/// ```
pub fn key_of<F>(f: F) -> KeyOf<F> {
    KeyOf(f)
}

impl<T, K, F> Classifier<T> for KeyOf<F>
where
    T: ?Sized,
    K: Eq + Hash + Debug + Send + Sync + 'static,
    F: Fn(&T) -> K + Send + Sync,
{
    type Key = K;

    fn canonicalize(&self, element: &T) -> Result<K> {
        Ok((self.0)(element))
    }
}

/* ===================== AnagramClassifier ===================== */

/// Words are equivalent when they use the same letters and digits, ignoring
/// case, punctuation and whitespace.
///
/// The key is the word upper-cased, stripped to letters and digits, and sorted.
/// `Option` inputs are accepted so that a missing word is reported as
/// [`QueryError::InvalidArgument`] instead of being silently classified.
#[derive(Clone, Copy, Debug, Default)]
pub struct AnagramClassifier;

impl AnagramClassifier {
    fn key(word: &str) -> String {
        let mut chars: Vec<char> = word
            .chars()
            .flat_map(char::to_uppercase)
            .filter(|c| c.is_alphanumeric())
            .collect();
        chars.sort_unstable();
        chars.into_iter().collect()
    }
}

impl Classifier<str> for AnagramClassifier {
    type Key = String;

    fn canonicalize(&self, element: &str) -> Result<String> {
        Ok(Self::key(element))
    }
}

impl Classifier<String> for AnagramClassifier {
    type Key = String;

    fn canonicalize(&self, element: &String) -> Result<String> {
        Ok(Self::key(element))
    }
}

impl<'a> Classifier<&'a str> for AnagramClassifier {
    type Key = String;

    fn canonicalize(&self, element: &&'a str) -> Result<String> {
        Ok(Self::key(element))
    }
}

impl<S: AsRef<str>> Classifier<Option<S>> for AnagramClassifier {
    type Key = String;

    fn canonicalize(&self, element: &Option<S>) -> Result<String> {
        match element {
            Some(word) => Ok(Self::key(word.as_ref())),
            None => Err(QueryError::invalid_argument(
                "anagram classifier requires a word, got none",
            )),
        }
    }
}

/* ===================== CaseInsensitive ===================== */

/// Strings (or characters) equal up to letter case.
#[derive(Clone, Copy, Debug, Default)]
pub struct CaseInsensitive;

impl Classifier<str> for CaseInsensitive {
    type Key = String;

    fn canonicalize(&self, element: &str) -> Result<String> {
        Ok(element.to_lowercase())
    }
}

impl Classifier<String> for CaseInsensitive {
    type Key = String;

    fn canonicalize(&self, element: &String) -> Result<String> {
        Ok(element.to_lowercase())
    }
}

impl<'a> Classifier<&'a str> for CaseInsensitive {
    type Key = String;

    fn canonicalize(&self, element: &&'a str) -> Result<String> {
        Ok(element.to_lowercase())
    }
}

impl Classifier<char> for CaseInsensitive {
    type Key = String;

    fn canonicalize(&self, element: &char) -> Result<String> {
        Ok(element.to_lowercase().collect())
    }
}
