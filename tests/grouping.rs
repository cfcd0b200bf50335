mod common;

use anyhow::Result;
use common::{Product, anagram_words, numbers, products};
use ironquery::testing::*;
use ironquery::*;

#[test]
fn group_by_remainder_keeps_first_seen_order() -> Result<()> {
    let p = TestPipeline::new();
    let groups = from_vec(&p, numbers())
        .group_by(|n: &i32| n % 5)
        .collect_seq()?;
    assert_groups_equal(
        &groups,
        &[
            (0, vec![5, 0]),
            (4, vec![4, 9]),
            (1, vec![1, 6]),
            (3, vec![3, 8]),
            (2, vec![7, 2]),
        ],
    );
    assert_groups_partition(&groups, &numbers());
    Ok(())
}

#[test]
fn group_then_order_by_key() -> Result<()> {
    let p = TestPipeline::new();
    let words = vec!["blueberry", "chimpanzee", "abacus", "banana", "apple", "cheese"];
    let groups = from_vec(&p, words)
        .group_by(|w: &&str| w.chars().next())
        .sort_by_key(|g: &Group<Option<char>, &'static str>| *g.key())
        .collect_seq()?;
    assert_groups_equal(
        &groups,
        &[
            (Some('a'), vec!["abacus", "apple"]),
            (Some('b'), vec!["blueberry", "banana"]),
            (Some('c'), vec!["chimpanzee", "cheese"]),
        ],
    );
    Ok(())
}

#[test]
fn group_then_filter_by_size() -> Result<()> {
    let p = TestPipeline::new();
    let small = from_vec(&p, products())
        .group_by(|pr: &Product| pr.category)
        .filter(|g: &Group<&'static str, Product>| g.len() <= 3)
        .map(|g: &Group<&'static str, Product>| {
            (*g.key(), g.iter().map(|pr| pr.name).collect::<Vec<_>>())
        })
        .collect_seq()?;
    assert_eq!(
        small,
        vec![
            (
                "Condiments",
                vec![
                    "Aniseed Syrup",
                    "Chef Anton's Cajun Seasoning",
                    "Grandma's Boysenberry Spread"
                ]
            ),
            ("Seafood", vec!["Ikura", "Konbu", "Carnarvon Tigers"]),
        ]
    );
    Ok(())
}

#[test]
fn anagram_groups_keep_original_key_text() -> Result<()> {
    let p = TestPipeline::new();
    let groups = from_vec(&p, anagram_words())
        .group_by_with(|w: &String| w.trim().to_string(), AnagramClassifier)
        .collect_seq()?;

    let keys: Vec<&str> = groups.iter().map(|g| g.key().as_str()).collect();
    assert_eq!(keys, vec!["from", "mane", "salt", "earn"]);
    assert_eq!(
        groups[1].members(),
        &["  mane".to_string(), "name   ".to_string(), "mean".to_string()]
    );
    assert_groups_partition(&groups, &anagram_words());
    Ok(())
}

#[test]
fn key_and_member_projections_are_independent() -> Result<()> {
    let p = TestPipeline::new();
    let groups = from_vec(&p, anagram_words())
        .group_by_map(
            |w: &String| w.trim().to_lowercase(),
            AnagramClassifier,
            |w: &String| w.to_uppercase(),
        )
        .collect_seq()?;

    assert_eq!(groups.len(), 4);
    assert_eq!(groups[0].key(), "from");
    // members keep their surrounding whitespace; only the key was trimmed
    assert_eq!(
        groups[0].members(),
        &["FROM   ".to_string(), " FORM  ".to_string()]
    );
    assert_eq!(
        groups[3].members(),
        &[" EARN ".to_string(), " NEAR ".to_string()]
    );
    Ok(())
}

#[test]
fn classifier_error_aborts_grouping() {
    let p = TestPipeline::new();
    let words = vec![Some("salt".to_string()), None, Some("last".to_string())];
    let err = from_vec(&p, words)
        .group_by_with(|w: &Option<String>| w.clone(), AnagramClassifier)
        .collect_seq()
        .unwrap_err();
    assert!(err.is_invalid_argument());
}

#[test]
fn per_group_aggregates() -> Result<()> {
    let p = TestPipeline::new();
    let by_category = from_vec(&p, products()).group_by(|pr: &Product| pr.category);

    let counts = by_category.clone().combine_groups(Count).collect_seq()?;
    assert_eq!(
        counts,
        vec![
            GroupResult { key: "Beverages", value: 4 },
            GroupResult { key: "Condiments", value: 3 },
            GroupResult { key: "Seafood", value: 3 },
        ]
    );

    let stock = by_category
        .clone()
        .combine_groups(Sum::<u32>::new().of(|pr: &Product| pr.units_in_stock))
        .collect_seq()?;
    assert_eq!(stock[0].value, 39 + 17 + 20 + 57);

    let cheapest = by_category
        .clone()
        .combine_groups(Min::new().of(|pr: &Product| pr.price()))
        .collect_seq()?;
    assert_eq!(cheapest[2].value.into_inner(), 6.0);

    let average = by_category
        .combine_groups(Average::<f64>::new().of(|pr: &Product| pr.unit_price))
        .collect_seq()?;
    assert_approx_eq!(average[1].value, 19.0);
    Ok(())
}

#[test]
fn flatten_groups_reemits_members_in_group_order() -> Result<()> {
    let p = TestPipeline::new();
    let flat = from_vec(&p, numbers())
        .group_by(|n: &i32| n % 2)
        .flatten_groups()
        .collect_seq()?;
    assert_eq!(flat, vec![5, 1, 3, 9, 7, 4, 8, 6, 2, 0]);
    Ok(())
}

#[test]
fn empty_source_has_no_groups() -> Result<()> {
    let p = TestPipeline::new();
    let groups = from_vec(&p, Vec::<i32>::new())
        .group_by(|n: &i32| *n)
        .collect_seq()?;
    assert!(groups.is_empty());
    Ok(())
}
