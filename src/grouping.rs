//! Classifier-driven partitioning of a sequence into ordered groups.
//!
//! # Overview
//! - [`group_by`] -- the engine: one left-to-right pass over a materialized input.
//! - [`Query::group_by`] -- natural equality on the projected key.
//! - [`Query::group_by_with`] -- custom [`Classifier`] on the projected key.
//! - [`Query::group_by_map`] -- custom classifier plus a separate member projection.
//! - [`Query::combine_groups`] -- run a [`CombineFn`] over each group's members.
//! - [`Query::flatten_groups`] -- re-emit every member, group by group.
//!
//! Groups come out in the order their key was first seen. Members keep
//! source order. The key stored on a group is the projected key that first
//! produced its canonical form, so `" Form "` may head a group that also holds
//! `"from"` under an anagram classifier.
//!
//! Filtering groups (for example by size) is an ordinary
//! [`filter`](Query::filter) applied after grouping.

use crate::classifier::{Classifier, Natural};
use crate::collection::{Producer, QBound, Query, Stream};
use crate::combiners::CombineFn;
use crate::error::Result;
use crate::node::StageKind;
use indexmap::IndexMap;
use indexmap::map::Entry;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;

/// A key together with the members that classified under it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group<K, V> {
    key: K,
    members: Vec<V>,
}

impl<K, V> Group<K, V> {
    pub fn new(key: K, members: Vec<V>) -> Self {
        Self { key, members }
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn members(&self) -> &[V] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, V> {
        self.members.iter()
    }

    pub fn into_parts(self) -> (K, Vec<V>) {
        (self.key, self.members)
    }
}

/// Result of aggregating one group.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupResult<K, O> {
    pub key: K,
    pub value: O,
}

/// Partition `source` by the canonical form of `key_fn(element)`.
///
/// Each element contributes `element_fn(element)` to its group. Key and member
/// projections are independent: nothing done to the key (trimming, case
/// folding) is applied to the member, and vice versa.
///
/// # Errors
/// The first classifier error aborts the pass.
pub fn group_by<T, K, V, C, KF, EF>(
    source: impl IntoIterator<Item = T>,
    key_fn: KF,
    classifier: &C,
    element_fn: EF,
) -> Result<Vec<Group<K, V>>>
where
    C: Classifier<K> + ?Sized,
    KF: Fn(&T) -> K,
    EF: Fn(&T) -> V,
{
    let mut buckets: IndexMap<C::Key, Group<K, V>> = IndexMap::new();
    for element in source {
        let key = key_fn(&element);
        let canonical = classifier.canonicalize(&key)?;
        let member = element_fn(&element);
        match buckets.entry(canonical) {
            Entry::Occupied(mut e) => e.get_mut().members.push(member),
            Entry::Vacant(e) => {
                e.insert(Group::new(key, vec![member]));
            }
        }
    }
    Ok(buckets.into_values().collect())
}

impl<T: QBound> Query<T> {
    /// Group elements by a projected key using its natural equality.
    ///
    /// ```
    /// use ironquery::*;
    ///
    /// let p = Pipeline::default();
    /// let groups = from_vec(&p, vec![5, 4, 1, 3, 9, 8, 6, 7, 2, 0])
    ///     .group_by(|n: &i32| n % 5)
    ///     .collect_seq()
    ///     .unwrap();
    /// assert_eq!(groups[0].key(), &0);
    /// assert_eq!(groups[0].members(), &[5, 0]);
    /// ```
    pub fn group_by<K, KF>(self, key_fn: KF) -> Query<Group<K, T>>
    where
        K: QBound + Eq + Hash + Debug,
        KF: 'static + Send + Sync + Fn(&T) -> K,
    {
        self.group_by_map(key_fn, Natural, T::clone)
    }

    /// Group elements by a projected key under a custom classifier.
    pub fn group_by_with<K, C, KF>(self, key_fn: KF, classifier: C) -> Query<Group<K, T>>
    where
        K: QBound,
        C: 'static + Classifier<K>,
        KF: 'static + Send + Sync + Fn(&T) -> K,
    {
        self.group_by_map(key_fn, classifier, T::clone)
    }

    /// Group with independent key and member projections.
    ///
    /// ```
    /// use ironquery::*;
    ///
    /// let p = Pipeline::default();
    /// let words = vec!["from   ".to_string(), " form  ".to_string(), " salt".to_string()];
    /// let groups = from_vec(&p, words)
    ///     .group_by_map(|w: &String| w.trim().to_lowercase(), AnagramClassifier, |w: &String| w.to_uppercase())
    ///     .collect_seq()
    ///     .unwrap();
    /// assert_eq!(groups.len(), 2);
    /// assert_eq!(groups[0].key(), "from");
    /// assert_eq!(groups[0].members(), &["FROM   ".to_string(), " FORM  ".to_string()]);
    /// ```
    pub fn group_by_map<K, V, C, KF, EF>(
        self,
        key_fn: KF,
        classifier: C,
        element_fn: EF,
    ) -> Query<Group<K, V>>
    where
        K: QBound,
        V: QBound,
        C: 'static + Classifier<K>,
        KF: 'static + Send + Sync + Fn(&T) -> K,
        EF: 'static + Send + Sync + Fn(&T) -> V,
    {
        self.blocking(StageKind::Group, move |input: Vec<T>| {
            group_by(input, &key_fn, &classifier, &element_fn)
        })
    }
}

impl<K: QBound, V: QBound> Query<Group<K, V>> {
    /// Aggregate each group's members with `comb`, keeping group order.
    ///
    /// ```
    /// use ironquery::*;
    ///
    /// let p = Pipeline::default();
    /// let totals = from_vec(&p, vec![(1u8, 1u32), (2, 10), (1, 2)])
    ///     .group_by(|r: &(u8, u32)| r.0)
    ///     .combine_groups(Sum::<u32>::new().of(|r: &(u8, u32)| r.1))
    ///     .collect_seq()
    ///     .unwrap();
    /// assert_eq!(totals[0], GroupResult { key: 1, value: 3 });
    /// assert_eq!(totals[1], GroupResult { key: 2, value: 10 });
    /// ```
    pub fn combine_groups<C, A, O>(self, comb: C) -> Query<GroupResult<K, O>>
    where
        C: CombineFn<V, A, O>,
        O: QBound,
    {
        let comb = Arc::new(comb);
        self.blocking(StageKind::CombineGroups, move |groups: Vec<Group<K, V>>| {
            groups
                .into_iter()
                .map(|g| -> Result<GroupResult<K, O>> {
                    let (key, members) = g.into_parts();
                    let mut acc = comb.create();
                    for m in members {
                        comb.add_input(&mut acc, m)?;
                    }
                    Ok(GroupResult {
                        key,
                        value: comb.finish(acc)?,
                    })
                })
                .collect()
        })
    }

    /// Re-emit every member, group after group.
    pub fn flatten_groups(self) -> Query<V> {
        let upstream = Arc::clone(&self.producer);
        let producer: Producer<V> = Arc::new(move || -> Stream<V> {
            Box::new(upstream().flat_map(|r| -> Stream<V> {
                match r {
                    Ok(g) => Box::new(g.members.into_iter().map(Ok)),
                    Err(e) => Box::new(std::iter::once(Err(e))),
                }
            }))
        });
        self.chain(StageKind::FlattenGroups, producer)
    }
}
