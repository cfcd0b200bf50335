//! A tour of the query operators on small sample datasets.
//!
//! Covers grouping (plain, filtered, anagram), ordering (multi-key, custom
//! comparator, reversal), set operators, aggregates, folds and quantifiers.
//!
//! Run with: `cargo run --example query_tour`
//! Set `RUST_LOG=ironquery=trace` to see the query spans and stage sizes.

use anyhow::Result;
use ironquery::*;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .try_init();
}

#[allow(clippy::too_many_lines)]
fn main() -> Result<()> {
    init_tracing();

    let pipeline = Pipeline::with_options(
        PipelineOptions::default()
            .name("query-tour")
            .trace_stages(true),
    );

    // =============================================================================
    // Grouping
    // =============================================================================
    println!("GROUPING\n");

    let numbers = from_vec(&pipeline, vec![5, 4, 1, 3, 9, 8, 6, 7, 2, 0]);
    for g in numbers.clone().group_by(|n: &i32| n % 5).collect_seq()? {
        println!("  remainder {}: {:?}", g.key(), g.members());
    }

    let anagrams = from_vec(
        &pipeline,
        ["from   ", "  mane", " salt", " earn ", "name   ", "  last   ", " near ", " form  ", "mean"]
            .iter()
            .map(|s| (*s).to_string())
            .collect(),
    );
    let grouped = anagrams.group_by_map(
        |w: &String| w.trim().to_lowercase(),
        AnagramClassifier,
        |w: &String| w.to_uppercase(),
    );
    println!("\n  anagram groups:");
    for g in grouped.collect_seq()? {
        println!("    {:<6} -> {:?}", g.key(), g.members());
    }

    // =============================================================================
    // Ordering
    // =============================================================================
    println!("\nORDERING\n");

    let digits = from_vec(
        &pipeline,
        vec!["zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine"],
    );
    let by_length_then_name = digits
        .clone()
        .order_by(OrderSpec::by(|d: &&str| d.len()).then_by(|d: &&str| d.to_string()))
        .named("digits by length");
    println!("  {:?}", by_length_then_name.collect_seq()?);
    print!("{}", by_length_then_name.explain());

    let words = from_vec(
        &pipeline,
        vec!["aPPLE", "AbAcUs", "bRaNcH", "BlUeBeRrY", "ClOvEr", "cHeRry"],
    );
    let case_blind = words.order_by(
        OrderSpec::by(|w: &&str| w.len()).then_by_with(
            |w: &&str| w.to_string(),
            Direction::Descending,
            compare::case_insensitive,
        ),
    );
    println!("  {:?}", case_blind.collect_seq()?);

    let reversed = digits
        .filter(|d: &&str| d.chars().nth(1) == Some('i'))
        .reverse();
    println!("  {:?}", reversed.collect_seq()?);

    // =============================================================================
    // Set operators
    // =============================================================================
    println!("\nSET OPERATORS\n");

    let a = from_vec(&pipeline, vec![0, 2, 4, 5, 6, 8, 9]);
    let b = from_vec(&pipeline, vec![1, 3, 5, 7, 8]);
    println!("  union:     {:?}", a.clone().union(&b).collect_seq()?);
    println!("  intersect: {:?}", a.clone().intersect(&b).collect_seq()?);
    println!("  except:    {:?}", a.except(&b).collect_seq()?);

    // =============================================================================
    // Aggregation
    // =============================================================================
    println!("\nAGGREGATION\n");

    println!("  count:   {}", numbers.count()?);
    println!("  sum:     {}", numbers.sum()?);
    println!("  min/max: {} / {}", numbers.min()?, numbers.max()?);
    println!("  average: {:.2}", numbers.average()?);

    let doubles = from_vec(&pipeline, vec![1.7, 2.3, 1.9, 4.1, 2.9]);
    println!("  product: {:.4}", doubles.fold(|acc: f64, x: &f64| acc * x)?);

    let withdrawals = from_vec(&pipeline, vec![20, 10, 40, 50, 10, 70, 30]);
    let balance = withdrawals.fold_seeded(100.0, |balance: f64, w: &i32| {
        let next = balance - f64::from(*w);
        if next >= 0.0 { next } else { balance }
    })?;
    println!("  ending balance: {balance}");

    match from_vec(&pipeline, Vec::<i32>::new()).min() {
        Ok(v) => println!("  unexpected min {v}"),
        Err(e) => println!("  min of nothing: {e}"),
    }

    // =============================================================================
    // Quantifiers
    // =============================================================================
    println!("\nQUANTIFIERS\n");

    let words = from_vec(&pipeline, vec!["believe", "relief", "receipt", "field"]);
    println!("  any has \"ei\": {}", words.any(|w: &&str| w.contains("ei"))?);
    println!("  all have \"ie\": {}", words.all(|w: &&str| w.contains("ie"))?);

    Ok(())
}
