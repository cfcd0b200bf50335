//! Identifier for stages recorded in a [`Pipeline`](crate::pipeline::Pipeline).
//!
//! Every [`Node`](crate::node::Node) added to the pipeline graph gets the next
//! sequential `NodeId`. Ids are `Copy` and hashable so snapshots and explain
//! plans can key on them cheaply.

use serde::Serialize;
use std::fmt::{Display, Formatter, Result as FormatResult};

/// Numeric identifier of a stage in a pipeline graph.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize)]
#[serde(transparent)]
pub struct NodeId(u64);

impl NodeId {
    pub(crate) fn new(v: u64) -> Self {
        Self(v)
    }

    /// Return the underlying numeric value.
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FormatResult {
        write!(f, "#{}", self.0)
    }
}
