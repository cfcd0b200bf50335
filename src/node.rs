//! Stage descriptors stored in the pipeline graph.
//!
//! A [`Node`] describes *what* a stage does; the executable part lives in the
//! typed producer held by the [`Query`](crate::Query) handle. Keeping the two
//! apart lets the graph stay type-erased while evaluation stays fully typed.

use serde::Serialize;
use std::fmt::{Display, Formatter, Result as FormatResult};

/// Kind of work performed by a stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
    /// In-memory data or a generator closure.
    Source,
    Filter,
    Map,
    FlatMap,
    /// Fallible projection.
    TryMap,
    Group,
    Order,
    Reverse,
    Distinct,
    Union,
    Intersect,
    Except,
    /// Per-group aggregation.
    CombineGroups,
    /// Group members re-emitted as a flat sequence.
    FlattenGroups,
}

impl StageKind {
    /// Blocking stages drain their whole upstream before yielding anything.
    pub fn is_blocking(&self) -> bool {
        matches!(
            self,
            StageKind::Group
                | StageKind::Order
                | StageKind::Reverse
                | StageKind::Distinct
                | StageKind::Union
                | StageKind::Intersect
                | StageKind::Except
                | StageKind::CombineGroups
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            StageKind::Source => "source",
            StageKind::Filter => "filter",
            StageKind::Map => "map",
            StageKind::FlatMap => "flat_map",
            StageKind::TryMap => "try_map",
            StageKind::Group => "group",
            StageKind::Order => "order",
            StageKind::Reverse => "reverse",
            StageKind::Distinct => "distinct",
            StageKind::Union => "union",
            StageKind::Intersect => "intersect",
            StageKind::Except => "except",
            StageKind::CombineGroups => "combine_groups",
            StageKind::FlattenGroups => "flatten_groups",
        }
    }
}

impl Display for StageKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FormatResult {
        f.write_str(self.name())
    }
}

/// A recorded stage: its kind plus an optional human-readable label.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Node {
    pub kind: StageKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Node {
    pub fn new(kind: StageKind) -> Self {
        Self { kind, label: None }
    }
}
