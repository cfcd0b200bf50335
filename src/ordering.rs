//! Stable multi-key ordering.
//!
//! An [`OrderSpec`] is a list of levels. Each level projects a key from the
//! element, compares keys with natural ordering or an injected comparator, and
//! applies its own [`Direction`]. Levels are consulted left to right and the
//! first non-equal level decides. Elements equal on every level keep their
//! input order.
//!
//! ```
//! use ironquery::*;
//!
//! let p = Pipeline::default();
//! let words = vec!["cherry", "kiwi", "apple", "plum", "blueberry", "pear", "fig"];
//! let sorted = from_vec(&p, words)
//!     .order_by(OrderSpec::by(|w: &&str| w.len()).then_by_descending(|w: &&str| w.to_string()))
//!     .collect_seq()
//!     .unwrap();
//! assert_eq!(sorted, vec!["fig", "plum", "pear", "kiwi", "apple", "cherry", "blueberry"]);
//! ```

use crate::collection::{QBound, Query};
use crate::error::{QueryError, Result};
use crate::node::StageKind;
use std::cmp::Ordering;
use std::fmt::{Debug, Formatter, Result as FormatResult};
use std::sync::Arc;

/// Sort direction of one ordering level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

impl Direction {
    /// Orient a comparison result.
    pub fn apply(self, ord: Ordering) -> Ordering {
        match self {
            Direction::Ascending => ord,
            Direction::Descending => ord.reverse(),
        }
    }
}

type LevelCmp<T> = Arc<dyn Fn(&T, &T) -> Ordering + Send + Sync>;

struct Level<T> {
    cmp: LevelCmp<T>,
    direction: Direction,
}

impl<T> Clone for Level<T> {
    fn clone(&self) -> Self {
        Self {
            cmp: Arc::clone(&self.cmp),
            direction: self.direction,
        }
    }
}

/// Composite sort key: ordered `(key, comparator, direction)` levels.
pub struct OrderSpec<T> {
    levels: Vec<Level<T>>,
}

impl<T> Clone for OrderSpec<T> {
    fn clone(&self) -> Self {
        Self {
            levels: self.levels.clone(),
        }
    }
}

impl<T> Debug for OrderSpec<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FormatResult {
        let dirs: Vec<Direction> = self.levels.iter().map(|l| l.direction).collect();
        f.debug_struct("OrderSpec").field("levels", &dirs).finish()
    }
}

impl<T: 'static> Default for OrderSpec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> OrderSpec<T> {
    /// A spec with no levels. Sorting with it fails until a level is added.
    pub fn new() -> Self {
        Self { levels: Vec::new() }
    }

    /// Primary key, ascending.
    pub fn by<K, F>(key: F) -> Self
    where
        K: 'static + Ord,
        F: 'static + Send + Sync + Fn(&T) -> K,
    {
        Self::new().then_by(key)
    }

    /// Primary key, descending.
    pub fn by_descending<K, F>(key: F) -> Self
    where
        K: 'static + Ord,
        F: 'static + Send + Sync + Fn(&T) -> K,
    {
        Self::new().then_by_descending(key)
    }

    /// Primary key, ascending, compared with `cmp` instead of `Ord`.
    pub fn by_with<K, F, C>(key: F, cmp: C) -> Self
    where
        K: 'static,
        F: 'static + Send + Sync + Fn(&T) -> K,
        C: 'static + Send + Sync + Fn(&K, &K) -> Ordering,
    {
        Self::new().then_by_with(key, Direction::Ascending, cmp)
    }

    /// Next key, ascending.
    #[must_use]
    pub fn then_by<K, F>(self, key: F) -> Self
    where
        K: 'static + Ord,
        F: 'static + Send + Sync + Fn(&T) -> K,
    {
        self.then_by_with(key, Direction::Ascending, K::cmp)
    }

    /// Next key, descending.
    #[must_use]
    pub fn then_by_descending<K, F>(self, key: F) -> Self
    where
        K: 'static + Ord,
        F: 'static + Send + Sync + Fn(&T) -> K,
    {
        self.then_by_with(key, Direction::Descending, K::cmp)
    }

    /// Next key with an explicit direction and comparator.
    #[must_use]
    pub fn then_by_with<K, F, C>(mut self, key: F, direction: Direction, cmp: C) -> Self
    where
        K: 'static,
        F: 'static + Send + Sync + Fn(&T) -> K,
        C: 'static + Send + Sync + Fn(&K, &K) -> Ordering,
    {
        self.levels.push(Level {
            cmp: Arc::new(move |a: &T, b: &T| cmp(&key(a), &key(b))),
            direction,
        });
        self
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Composite comparison; the first non-equal level wins.
    pub fn compare(&self, a: &T, b: &T) -> Ordering {
        for level in &self.levels {
            let ord = level.direction.apply((level.cmp)(a, b));
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    }
}

/// Stable sort of a materialized input.
///
/// # Errors
/// [`QueryError::InvalidArgument`] when `spec` has no levels.
pub fn order_by<T: 'static>(mut source: Vec<T>, spec: &OrderSpec<T>) -> Result<Vec<T>> {
    if spec.is_empty() {
        return Err(QueryError::invalid_argument(
            "order_by requires at least one sort key",
        ));
    }
    source.sort_by(|a, b| spec.compare(a, b));
    Ok(source)
}

/// Ready-made comparators for [`OrderSpec::by_with`] and
/// [`OrderSpec::then_by_with`].
pub mod compare {
    use std::cmp::Ordering;

    /// Compare strings ignoring letter case.
    pub fn case_insensitive<S: AsRef<str>>(a: &S, b: &S) -> Ordering {
        let a = a.as_ref().chars().flat_map(char::to_lowercase);
        let b = b.as_ref().chars().flat_map(char::to_lowercase);
        a.cmp(b)
    }
}

impl<T: QBound> Query<T> {
    /// Sort by `spec`. Drains the upstream on the first pull.
    pub fn order_by(self, spec: OrderSpec<T>) -> Query<T> {
        self.blocking(StageKind::Order, move |input: Vec<T>| order_by(input, &spec))
    }

    /// Sort ascending by a single key.
    pub fn sort_by_key<K, F>(self, key: F) -> Query<T>
    where
        K: 'static + Ord,
        F: 'static + Send + Sync + Fn(&T) -> K,
    {
        self.order_by(OrderSpec::by(key))
    }

    /// Sort descending by a single key.
    pub fn sort_by_key_descending<K, F>(self, key: F) -> Query<T>
    where
        K: 'static + Ord,
        F: 'static + Send + Sync + Fn(&T) -> K,
    {
        self.order_by(OrderSpec::by_descending(key))
    }

    /// Emit the upstream back to front.
    pub fn reverse(self) -> Query<T> {
        self.blocking(StageKind::Reverse, |mut input: Vec<T>| {
            input.reverse();
            Ok(input)
        })
    }
}
