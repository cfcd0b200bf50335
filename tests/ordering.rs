mod common;

use anyhow::Result;
use common::{Product, digits, mixed_case_words, products};
use ironquery::testing::*;
use ironquery::*;
use ordered_float::OrderedFloat;
use std::cmp::Ordering;

#[test]
fn order_by_natural_and_by_length() -> Result<()> {
    let p = TestPipeline::new();
    let words = from_vec(&p, vec!["cherry", "apple", "blueberry"]);

    let alpha = words.clone().sort_by_key(|w: &&str| w.to_string()).collect_seq()?;
    assert_collections_equal(&alpha, &["apple", "blueberry", "cherry"]);

    let by_len = words.sort_by_key(|w: &&str| w.len()).collect_seq()?;
    assert_collections_equal(&by_len, &["apple", "cherry", "blueberry"]);
    Ok(())
}

#[test]
fn descending_floats() -> Result<()> {
    let p = TestPipeline::new();
    let out = from_vec(&p, vec![1.7, 2.3, 1.9, 4.1, 2.9])
        .sort_by_key_descending(|x: &f64| OrderedFloat(*x))
        .collect_seq()?;
    assert_eq!(out, vec![4.1, 2.9, 2.3, 1.9, 1.7]);
    Ok(())
}

#[test]
fn injected_case_insensitive_comparator() -> Result<()> {
    let p = TestPipeline::new();
    let out = from_vec(&p, mixed_case_words())
        .order_by(OrderSpec::by_with(|w: &&str| w.to_string(), compare::case_insensitive))
        .collect_seq()?;
    // stored values are untouched
    assert_eq!(
        out,
        vec!["AbAcUs", "aPPLE", "BlUeBeRrY", "bRaNcH", "cHeRry", "ClOvEr"]
    );
    Ok(())
}

#[test]
fn then_by_length_then_name() -> Result<()> {
    let p = TestPipeline::new();
    let out = from_vec(&p, digits())
        .order_by(OrderSpec::by(|d: &&str| d.len()).then_by(|d: &&str| d.to_string()))
        .collect_seq()?;
    assert_eq!(
        out,
        vec![
            "one", "six", "two", "five", "four", "nine", "zero", "eight", "seven", "three"
        ]
    );
    Ok(())
}

#[test]
fn then_by_with_custom_comparator_in_both_directions() -> Result<()> {
    let p = TestPipeline::new();
    let words = from_vec(&p, mixed_case_words());

    let asc = words
        .clone()
        .order_by(OrderSpec::by(|w: &&str| w.len()).then_by_with(
            |w: &&str| w.to_string(),
            Direction::Ascending,
            compare::case_insensitive,
        ))
        .collect_seq()?;
    assert_eq!(
        asc,
        vec!["aPPLE", "AbAcUs", "bRaNcH", "cHeRry", "ClOvEr", "BlUeBeRrY"]
    );

    let desc = words
        .order_by(OrderSpec::by(|w: &&str| w.len()).then_by_with(
            |w: &&str| w.to_string(),
            Direction::Descending,
            compare::case_insensitive,
        ))
        .collect_seq()?;
    assert_eq!(
        desc,
        vec!["aPPLE", "ClOvEr", "cHeRry", "bRaNcH", "AbAcUs", "BlUeBeRrY"]
    );
    Ok(())
}

#[test]
fn mixed_directions_keep_ties_stable() -> Result<()> {
    let p = TestPipeline::new();
    let ids = from_vec(&p, products())
        .order_by(
            OrderSpec::by(|pr: &Product| pr.category)
                .then_by_descending(|pr: &Product| pr.price()),
        )
        .map(|pr: &Product| pr.id)
        .collect_seq()?;
    // Chai (1) and Lakkalikoori (10) share category and price
    assert_eq!(ids, vec![2, 1, 10, 8, 6, 4, 3, 9, 5, 7]);
    Ok(())
}

#[test]
fn equal_keys_keep_input_order() -> Result<()> {
    let p = TestPipeline::new();
    let pairs = vec![(2, 'a'), (1, 'b'), (2, 'c'), (1, 'd'), (2, 'e'), (1, 'f')];
    let asc = from_vec(&p, pairs.clone())
        .sort_by_key(|x: &(i32, char)| x.0)
        .collect_seq()?;
    assert_eq!(
        asc,
        vec![(1, 'b'), (1, 'd'), (1, 'f'), (2, 'a'), (2, 'c'), (2, 'e')]
    );

    let desc = from_vec(&p, pairs)
        .sort_by_key_descending(|x: &(i32, char)| x.0)
        .collect_seq()?;
    assert_eq!(
        desc,
        vec![(2, 'a'), (2, 'c'), (2, 'e'), (1, 'b'), (1, 'd'), (1, 'f')]
    );
    Ok(())
}

#[test]
fn empty_order_spec_is_rejected() {
    let p = TestPipeline::new();
    let q = from_vec(&p, vec![3, 1, 2]).order_by(OrderSpec::new());
    let err = q.collect_seq().unwrap_err();
    assert!(err.is_invalid_argument());

    let spec = OrderSpec::<i32>::default();
    assert!(spec.is_empty());
    assert!(ironquery::ordering::order_by(vec![1], &spec).is_err());
}

#[test]
fn composite_compare_stops_at_first_difference() {
    let spec = OrderSpec::by(|x: &(i32, i32)| x.0).then_by_descending(|x: &(i32, i32)| x.1);
    assert_eq!(spec.len(), 2);
    assert_eq!(spec.compare(&(1, 9), &(2, 0)), Ordering::Less);
    assert_eq!(spec.compare(&(1, 9), &(1, 0)), Ordering::Less);
    assert_eq!(spec.compare(&(1, 5), &(1, 5)), Ordering::Equal);
    assert_eq!(Direction::Descending.apply(Ordering::Less), Ordering::Greater);
}

#[test]
fn reverse_after_filter() -> Result<()> {
    let p = TestPipeline::new();
    let out = from_vec(&p, digits())
        .filter(|d: &&str| d.chars().nth(1) == Some('i'))
        .reverse()
        .collect_seq()?;
    assert_eq!(out, vec!["nine", "eight", "six", "five"]);
    Ok(())
}
