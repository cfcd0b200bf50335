//! Classifier-aware set operators.
//!
//! Every operator emits elements in first-occurrence order and emits each
//! canonical key at most once. The element emitted for a key is the first one
//! that produced it. `intersect(a, b)` and `except(a, b)` split `distinct(a)`
//! into two disjoint parts.
//!
//! ```
//! use ironquery::*;
//!
//! let p = Pipeline::default();
//! let a = from_vec(&p, vec![0, 2, 4, 5, 6, 8, 9]);
//! let b = from_vec(&p, vec![1, 3, 5, 7, 8]);
//! assert_eq!(a.clone().intersect(&b).collect_seq().unwrap(), vec![5, 8]);
//! assert_eq!(a.except(&b).collect_seq().unwrap(), vec![0, 2, 4, 6, 9]);
//! ```

use crate::classifier::{Classifier, Natural};
use crate::collection::{QBound, Query};
use crate::error::Result;
use crate::node::StageKind;
use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;

/// Keep the first element of every canonical key.
pub fn distinct<T, C>(source: impl IntoIterator<Item = T>, classifier: &C) -> Result<Vec<T>>
where
    C: Classifier<T> + ?Sized,
{
    let mut seen: HashSet<C::Key> = HashSet::new();
    let mut out = Vec::new();
    for element in source {
        if seen.insert(classifier.canonicalize(&element)?) {
            out.push(element);
        }
    }
    Ok(out)
}

/// `distinct(a)` followed by the elements of `b` whose key is still unseen.
pub fn union<T, C>(
    a: impl IntoIterator<Item = T>,
    b: impl IntoIterator<Item = T>,
    classifier: &C,
) -> Result<Vec<T>>
where
    C: Classifier<T> + ?Sized,
{
    distinct(a.into_iter().chain(b), classifier)
}

/// Elements of `a` whose key also occurs in `b`, once each, in `a`'s order.
pub fn intersect<T, C>(
    a: impl IntoIterator<Item = T>,
    b: impl IntoIterator<Item = T>,
    classifier: &C,
) -> Result<Vec<T>>
where
    C: Classifier<T> + ?Sized,
{
    let mut wanted = keys(b, classifier)?;
    let mut out = Vec::new();
    for element in a {
        // removing the key makes later duplicates in `a` miss
        if wanted.remove(&classifier.canonicalize(&element)?) {
            out.push(element);
        }
    }
    Ok(out)
}

/// Elements of `a` whose key does not occur in `b`, once each, in `a`'s order.
pub fn except<T, C>(
    a: impl IntoIterator<Item = T>,
    b: impl IntoIterator<Item = T>,
    classifier: &C,
) -> Result<Vec<T>>
where
    C: Classifier<T> + ?Sized,
{
    let mut excluded = keys(b, classifier)?;
    let mut out = Vec::new();
    for element in a {
        if excluded.insert(classifier.canonicalize(&element)?) {
            out.push(element);
        }
    }
    Ok(out)
}

fn keys<T, C>(source: impl IntoIterator<Item = T>, classifier: &C) -> Result<HashSet<C::Key>>
where
    C: Classifier<T> + ?Sized,
{
    source
        .into_iter()
        .map(|element| classifier.canonicalize(&element))
        .collect()
}

impl<T: QBound> Query<T> {
    /// Drop repeated elements under natural equality.
    pub fn distinct(self) -> Query<T>
    where
        T: Eq + Hash + Debug,
    {
        self.distinct_by(Natural)
    }

    /// Drop elements whose canonical key was already seen.
    pub fn distinct_by<C>(self, classifier: C) -> Query<T>
    where
        C: 'static + Classifier<T>,
    {
        self.blocking(StageKind::Distinct, move |input: Vec<T>| {
            distinct(input, &classifier)
        })
    }

    pub fn union(self, other: &Query<T>) -> Query<T>
    where
        T: Eq + Hash + Debug,
    {
        self.union_by(other, Natural)
    }

    pub fn union_by<C>(self, other: &Query<T>, classifier: C) -> Query<T>
    where
        C: 'static + Classifier<T>,
    {
        self.blocking_with(other, StageKind::Union, move |a: Vec<T>, b: Vec<T>| {
            union(a, b, &classifier)
        })
    }

    pub fn intersect(self, other: &Query<T>) -> Query<T>
    where
        T: Eq + Hash + Debug,
    {
        self.intersect_by(other, Natural)
    }

    pub fn intersect_by<C>(self, other: &Query<T>, classifier: C) -> Query<T>
    where
        C: 'static + Classifier<T>,
    {
        self.blocking_with(other, StageKind::Intersect, move |a: Vec<T>, b: Vec<T>| {
            intersect(a, b, &classifier)
        })
    }

    pub fn except(self, other: &Query<T>) -> Query<T>
    where
        T: Eq + Hash + Debug,
    {
        self.except_by(other, Natural)
    }

    pub fn except_by<C>(self, other: &Query<T>, classifier: C) -> Query<T>
    where
        C: 'static + Classifier<T>,
    {
        self.blocking_with(other, StageKind::Except, move |a: Vec<T>, b: Vec<T>| {
            except(a, b, &classifier)
        })
    }
}
