//! Human- and machine-readable description of a query's stages.

use crate::collection::{QBound, Query};
use crate::node::StageKind;
use crate::node_id::NodeId;
use serde::Serialize;
use std::fmt::{Display, Formatter, Result as FormatResult};

/// One stage in a [`Plan`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PlanStep {
    pub id: NodeId,
    pub kind: StageKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub blocking: bool,
}

/// Stages a query depends on, sources first and the query's own stage last.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Plan {
    pub steps: Vec<PlanStep>,
}

impl Plan {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Stage kinds in plan order.
    pub fn kinds(&self) -> Vec<StageKind> {
        self.steps.iter().map(|s| s.kind).collect()
    }

    /// Render as pretty-printed JSON.
    #[cfg(feature = "explain-json")]
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl Display for Plan {
    fn fmt(&self, f: &mut Formatter<'_>) -> FormatResult {
        for (i, step) in self.steps.iter().enumerate() {
            write!(f, "{i:>3}. {} {}", step.id, step.kind)?;
            if let Some(label) = &step.label {
                write!(f, " [{label}]")?;
            }
            if step.blocking {
                f.write_str(" (blocking)")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl<T: QBound> Query<T> {
    /// Describe the stages this query runs, without running them.
    ///
    /// ```
    /// use ironquery::*;
    ///
    /// let p = Pipeline::default();
    /// let plan = from_vec(&p, vec![3, 1, 2])
    ///     .filter(|n: &i32| *n > 1)
    ///     .sort_by_key(|n: &i32| *n)
    ///     .explain();
    /// assert_eq!(plan.kinds(), vec![StageKind::Source, StageKind::Filter, StageKind::Order]);
    /// assert!(plan.steps[2].blocking);
    /// ```
    pub fn explain(&self) -> Plan {
        let steps = self
            .pipeline
            .lineage(self.id)
            .into_iter()
            .map(|(id, node)| PlanStep {
                id,
                kind: node.kind,
                blocking: node.kind.is_blocking(),
                label: node.label,
            })
            .collect();
        Plan { steps }
    }
}
