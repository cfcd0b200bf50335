//! Terminal evaluation.
//!
//! A terminal call (collect, aggregate, quantifier) hands its query to the
//! [`Runner`], which opens the log span, pulls the chain and reports the
//! outcome. Stages themselves never log except through [`StageProbe`].

use crate::collection::{QBound, Query, Stream};
use crate::config::PipelineOptions;
use crate::error::Result;
use crate::node::StageKind;
use crate::node_id::NodeId;
use tracing::{debug, debug_span, trace};

/// Drives one terminal evaluation of a query.
pub struct Runner {
    options: PipelineOptions,
}

impl Runner {
    pub fn new(options: PipelineOptions) -> Self {
        Self { options }
    }

    /// Pull `query` from its source and hand the stream to `terminal`.
    ///
    /// `op` names the terminal in logs.
    pub fn run<T, R, F>(&self, query: &Query<T>, op: &'static str, terminal: F) -> Result<R>
    where
        T: QBound,
        F: FnOnce(Stream<T>) -> Result<R>,
    {
        let span = debug_span!(
            "query",
            pipeline = %self.options.name,
            node = %query.id(),
            op
        );
        let _enter = span.enter();
        debug!("evaluation started");
        let out = terminal(query.iter());
        match &out {
            Ok(_) => debug!("evaluation finished"),
            Err(e) => debug!(error = %e, "evaluation failed"),
        }
        out
    }

    /// Materialize every element of `query` in order.
    pub fn collect<T: QBound>(&self, query: &Query<T>) -> Result<Vec<T>> {
        self.run(query, "collect", |stream| {
            let out = stream.collect::<Result<Vec<T>>>()?;
            debug!(rows = out.len(), "collected");
            Ok(out)
        })
    }
}

/// Size reporting for blocking stages, enabled by
/// [`PipelineOptions::trace_stages`].
#[derive(Clone, Debug)]
pub(crate) struct StageProbe {
    pipeline: String,
    node: NodeId,
    kind: StageKind,
    enabled: bool,
}

impl StageProbe {
    pub(crate) fn new(options: &PipelineOptions, node: NodeId, kind: StageKind) -> Self {
        Self {
            pipeline: options.name.clone(),
            node,
            kind,
            enabled: options.trace_stages,
        }
    }

    pub(crate) fn materialized(&self, rows_in: usize, rows_out: usize) {
        if self.enabled {
            trace!(
                pipeline = %self.pipeline,
                node = %self.node,
                stage = %self.kind,
                rows_in,
                rows_out,
                "stage materialized"
            );
        }
    }
}
