//! Tests for query plan introspection.

use anyhow::Result;
use ironquery::testing::*;
use ironquery::*;

#[test]
fn explain_linear_chain() -> Result<()> {
    let p = TestPipeline::new();
    let q = from_vec(&p, vec![1, 2, 3, 4, 5])
        .map(|x: &i32| x * 2)
        .filter(|x: &i32| *x > 5);

    let plan = q.explain();
    assert_eq!(
        plan.kinds(),
        vec![StageKind::Source, StageKind::Map, StageKind::Filter]
    );
    assert!(plan.steps.iter().all(|s| !s.blocking));
    println!("{plan}");
    Ok(())
}

#[test]
fn explain_marks_blocking_stages() -> Result<()> {
    let p = TestPipeline::new();
    let q = from_vec(&p, vec![("a", 1), ("b", 2), ("a", 3)])
        .group_by(|kv: &(&'static str, i32)| kv.0)
        .combine_groups(Count);

    let plan = q.explain();
    assert_eq!(
        plan.kinds(),
        vec![StageKind::Source, StageKind::Group, StageKind::CombineGroups]
    );
    assert!(!plan.steps[0].blocking);
    assert!(plan.steps[1].blocking);
    Ok(())
}

#[test]
fn explain_binary_stage_lists_left_branch_first() -> Result<()> {
    let p = TestPipeline::new();
    let left = from_vec(&p, vec![1, 2, 3]).named("left");
    let right = from_vec(&p, vec![3, 4]).map(|x: &i32| x + 1).named("right");
    let both = left.union(&right);

    let plan = both.explain();
    let labels: Vec<Option<&str>> = plan.steps.iter().map(|s| s.label.as_deref()).collect();
    assert_eq!(labels, vec![Some("left"), None, Some("right"), None]);
    assert_eq!(plan.steps.last().map(|s| s.kind), Some(StageKind::Union));
    assert_eq!(plan.len(), 4);
    Ok(())
}

#[test]
fn explain_ignores_unrelated_branches() -> Result<()> {
    let p = TestPipeline::new();
    let base = from_vec(&p, vec![1, 2, 3]);
    let _other = base.clone().map(|x: &i32| x * 10);
    let kept = base.filter(|x: &i32| *x > 1);

    let plan = kept.explain();
    assert_eq!(plan.kinds(), vec![StageKind::Source, StageKind::Filter]);
    assert_eq!(p.node_count(), 3);
    Ok(())
}

#[test]
fn plan_display_lists_every_step() {
    let p = TestPipeline::new();
    let plan = from_vec(&p, vec![3, 1, 2])
        .named("numbers")
        .sort_by_key(|x: &i32| *x)
        .explain();
    let text = plan.to_string();
    assert!(text.contains("source [numbers]"));
    assert!(text.contains("order (blocking)"));
    assert_eq!(text.lines().count(), 2);
}

#[cfg(feature = "explain-json")]
#[test]
fn plan_renders_as_json() -> Result<()> {
    let p = TestPipeline::new();
    let plan = from_vec(&p, vec!["b", "a"]).distinct().explain();
    let json = plan.to_json()?;
    let value: serde_json::Value = serde_json::from_str(&json)?;
    assert_eq!(value["steps"][0]["kind"], "source");
    assert_eq!(value["steps"][1]["kind"], "distinct");
    assert_eq!(value["steps"][1]["blocking"], true);
    assert!(value["steps"][0].get("label").is_none());
    Ok(())
}
