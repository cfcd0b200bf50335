mod common;

use anyhow::Result;
use common::{Product, products, set_a, set_b};
use ironquery::testing::*;
use ironquery::*;
use std::collections::HashSet;

#[test]
fn distinct_keeps_first_occurrences_in_order() -> Result<()> {
    let p = TestPipeline::new();
    let out = from_vec(&p, vec![2, 2, 3, 5, 5]).distinct().collect_seq()?;
    assert_collections_equal(&out, &[2, 3, 5]);

    let categories = from_vec(&p, products())
        .map(|pr: &Product| pr.category)
        .distinct()
        .collect_seq()?;
    assert_eq!(categories, vec!["Beverages", "Condiments", "Seafood"]);
    Ok(())
}

#[test]
fn union_appends_unseen_elements_of_the_right_side() -> Result<()> {
    let p = TestPipeline::new();
    let a = from_vec(&p, set_a());
    let b = from_vec(&p, set_b());
    let out = a.union(&b).collect_seq()?;
    assert_eq!(out, vec![0, 2, 4, 5, 6, 8, 9, 1, 3, 7]);
    Ok(())
}

#[test]
fn union_matches_distinct_of_concatenation() -> Result<()> {
    let p = TestPipeline::new();
    let a = vec!["b", "a", "b", "c"];
    let b = vec!["c", "d", "a", "d", "e"];
    let union = from_vec(&p, a.clone())
        .union(&from_vec(&p, b.clone()))
        .collect_seq()?;
    let mut concat = a;
    concat.extend(b);
    let distinct = from_vec(&p, concat).distinct().collect_seq()?;
    assert_eq!(union, distinct);
    assert_eq!(union, vec!["b", "a", "c", "d", "e"]);
    Ok(())
}

#[test]
fn intersect_and_except() -> Result<()> {
    let p = TestPipeline::new();
    let a = from_vec(&p, set_a());
    let b = from_vec(&p, set_b());
    assert_eq!(a.clone().intersect(&b).collect_seq()?, vec![5, 8]);
    assert_eq!(a.except(&b).collect_seq()?, vec![0, 2, 4, 6, 9]);
    Ok(())
}

#[test]
fn intersect_and_except_partition_distinct() -> Result<()> {
    let p = TestPipeline::new();
    let a = from_vec(&p, vec![4, 1, 4, 2, 9, 1, 7, 2]);
    let b = from_vec(&p, vec![2, 2, 7, 8, 8]);

    let inter = a.clone().intersect(&b).collect_seq()?;
    let rest = a.clone().except(&b).collect_seq()?;
    let all = a.distinct().collect_seq()?;
    assert_eq!(inter, vec![2, 7]);
    assert_eq!(rest, vec![4, 1, 9]);

    let inter_keys: HashSet<i32> = inter.iter().copied().collect();
    let rest_keys: HashSet<i32> = rest.iter().copied().collect();
    let all_keys: HashSet<i32> = all.iter().copied().collect();
    assert!(inter_keys.is_disjoint(&rest_keys));
    assert_eq!(&inter_keys | &rest_keys, all_keys);
    assert_eq!(inter.len() + rest.len(), all.len());
    Ok(())
}

#[test]
fn classifier_driven_set_ops() -> Result<()> {
    let p = TestPipeline::new();
    let left = from_vec(&p, vec!["Listen", "enlist", "google", "Silent", "banana"]);
    let right = from_vec(&p, vec!["tinsel", "elgoog"]);

    let distinct = left.clone().distinct_by(AnagramClassifier).collect_seq()?;
    assert_eq!(distinct, vec!["Listen", "google", "banana"]);

    let shared = left.clone().intersect_by(&right, AnagramClassifier).collect_seq()?;
    assert_eq!(shared, vec!["Listen", "google"]);

    let only_left = left.clone().except_by(&right, AnagramClassifier).collect_seq()?;
    assert_eq!(only_left, vec!["banana"]);

    let upper = from_vec(&p, vec!["APPLE", "Pear"]);
    let merged = from_vec(&p, vec!["apple", "fig"])
        .union_by(&upper, CaseInsensitive)
        .collect_seq()?;
    assert_eq!(merged, vec!["apple", "fig", "Pear"]);
    Ok(())
}

#[test]
fn sub_key_classifier() -> Result<()> {
    let p = TestPipeline::new();
    let first_per_category = from_vec(&p, products())
        .distinct_by(key_of(|pr: &Product| pr.category))
        .map(|pr: &Product| pr.name)
        .collect_seq()?;
    assert_eq!(first_per_category, vec!["Chai", "Aniseed Syrup", "Ikura"]);
    Ok(())
}

#[test]
fn engines_work_on_plain_vectors() -> Result<()> {
    use ironquery::set_ops;

    let out = set_ops::union(vec![1, 1, 2], vec![2, 3, 3], &Natural)?;
    assert_eq!(out, vec![1, 2, 3]);
    assert!(set_ops::intersect(Vec::<i32>::new(), vec![1], &Natural)?.is_empty());
    assert_eq!(set_ops::except(vec![1, 2], Vec::new(), &Natural)?, vec![1, 2]);
    Ok(())
}
