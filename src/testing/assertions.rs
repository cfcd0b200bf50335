//! Assertion functions for query outputs.
//!
//! Every assertion panics with both the expected and the actual collection so
//! a failing test shows the whole picture.

use crate::grouping::Group;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// Assert that two collections are equal in order and content.
///
/// # Panics
///
/// Panics if the collections differ in length or content.
///
/// # Example
///
/// ```
/// use ironquery::testing::assert_collections_equal;
///
/// assert_collections_equal(&[1, 2, 3], &[1, 2, 3]);
/// ```
pub fn assert_collections_equal<T: Debug + PartialEq>(actual: &[T], expected: &[T]) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "Collection length mismatch:\n  Expected length: {}\n  Actual length: {}\n  Expected: {expected:?}\n  Actual: {actual:?}",
        expected.len(),
        actual.len()
    );

    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        assert_eq!(
            a, e,
            "Collection mismatch at index {i}:\n  Expected: {e:?}\n  Actual: {a:?}\n  Full expected: {expected:?}\n  Full actual: {actual:?}"
        );
    }
}

/// Assert that two collections hold the same elements with the same
/// multiplicities, ignoring order.
///
/// # Panics
///
/// Panics if some element occurs a different number of times in each.
///
/// # Example
///
/// ```
/// use ironquery::testing::assert_collections_unordered_equal;
///
/// assert_collections_unordered_equal(&[3, 1, 2, 1], &[1, 1, 2, 3]);
/// ```
pub fn assert_collections_unordered_equal<T: Debug + Eq + Hash>(actual: &[T], expected: &[T]) {
    let actual_counts = multiset(actual);
    let expected_counts = multiset(expected);

    if actual_counts != expected_counts {
        let mut missing: Vec<&T> = Vec::new();
        let mut extra: Vec<&T> = Vec::new();
        for (item, n) in &expected_counts {
            let have = actual_counts.get(item).copied().unwrap_or(0);
            missing.extend(std::iter::repeat_n(*item, n.saturating_sub(have)));
        }
        for (item, n) in &actual_counts {
            let want = expected_counts.get(item).copied().unwrap_or(0);
            extra.extend(std::iter::repeat_n(*item, n.saturating_sub(want)));
        }
        panic!(
            "Collection content mismatch:\n  Missing elements: {missing:?}\n  Extra elements: {extra:?}\n  Expected: {expected:?}\n  Actual: {actual:?}"
        );
    }
}

fn multiset<T: Eq + Hash>(items: &[T]) -> HashMap<&T, usize> {
    let mut counts = HashMap::new();
    for item in items {
        *counts.entry(item).or_insert(0) += 1;
    }
    counts
}

/// Assert that groups come out in the expected order with the expected keys
/// and members.
///
/// # Panics
///
/// Panics at the first group whose key or members differ.
///
/// # Example
///
/// ```
/// use ironquery::*;
/// use ironquery::testing::assert_groups_equal;
///
/// let p = Pipeline::default();
/// let groups = from_vec(&p, vec![1, 2, 3, 4])
///     .group_by(|n: &i32| n % 2 == 0)
///     .collect_seq()
///     .unwrap();
/// assert_groups_equal(&groups, &[(false, vec![1, 3]), (true, vec![2, 4])]);
/// ```
pub fn assert_groups_equal<K, V>(actual: &[Group<K, V>], expected: &[(K, Vec<V>)])
where
    K: Debug + PartialEq,
    V: Debug + PartialEq,
{
    let keys: Vec<&K> = actual.iter().map(Group::key).collect();
    assert_eq!(
        actual.len(),
        expected.len(),
        "Group count mismatch:\n  Expected: {expected:?}\n  Actual keys: {keys:?}"
    );

    for (i, (group, (ek, ev))) in actual.iter().zip(expected.iter()).enumerate() {
        assert_eq!(
            group.key(),
            ek,
            "Key mismatch at group {i}:\n  Expected: {ek:?}\n  Actual: {:?}",
            group.key()
        );
        assert_eq!(
            group.members(),
            ev.as_slice(),
            "Member mismatch for key {ek:?} at group {i}"
        );
    }
}

/// Assert that the members of `groups`, taken together, are exactly `source`
/// as a multiset: nothing dropped, nothing duplicated.
///
/// # Panics
///
/// Panics if the flattened members and `source` differ as multisets.
pub fn assert_groups_partition<K, V>(groups: &[Group<K, V>], source: &[V])
where
    V: Debug + Eq + Hash + Clone,
{
    let members: Vec<V> = groups.iter().flat_map(|g| g.iter().cloned()).collect();
    assert_collections_unordered_equal(&members, source);
}

/// Assert that all elements in a collection satisfy a predicate.
///
/// # Panics
///
/// Panics if any element does not satisfy the predicate.
///
/// # Example
///
/// ```
/// use ironquery::testing::assert_all;
///
/// assert_all(&[2, 4, 6, 8], |x| x % 2 == 0);
/// ```
pub fn assert_all<T: Debug>(collection: &[T], predicate: impl Fn(&T) -> bool) {
    for (i, item) in collection.iter().enumerate() {
        assert!(
            predicate(item),
            "Predicate failed for element at index {i}:\n  Element: {item:?}\n  Collection: {collection:?}"
        );
    }
}
