//! Testing utilities for ironquery queries.
//!
//! - **Assertions**: compare query outputs with expected results, in order,
//!   ignoring order, or group by group.
//! - [`TestPipeline`]: a [`Pipeline`] wrapper with graph inspection helpers.
//! - [`assert_approx_eq!`](crate::assert_approx_eq): float comparison with a
//!   tolerance.
//!
//! # Quick Start
//!
//! ```
//! use ironquery::*;
//! use ironquery::testing::*;
//!
//! # fn main() -> anyhow::Result<()> {
//! let p = TestPipeline::new();
//!
//! let doubled = from_vec(&p, vec![1, 2, 3]).map(|x: &i32| x * 2);
//! assert_eq!(p.node_count(), 2);
//!
//! assert_collections_equal(&doubled.collect_seq()?, &[2, 4, 6]);
//! # Ok(())
//! # }
//! ```

pub mod assertions;

pub use assertions::*;

use crate::Pipeline;
use crate::config::PipelineOptions;

/// Check that a floating-point value is within a tolerance of the expected one.
///
/// ```
/// use ironquery::assert_approx_eq;
///
/// assert_approx_eq!(0.1_f64 + 0.2, 0.3);
/// assert_approx_eq!(1.0_f64 / 3.0, 0.333, 1e-3);
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($actual:expr, $expected:expr) => {
        $crate::assert_approx_eq!($actual, $expected, 1e-10)
    };
    ($actual:expr, $expected:expr, $epsilon:expr) => {
        let actual = $actual;
        let expected = $expected;
        let epsilon = $epsilon;
        let diff = (actual - expected).abs();
        assert!(
            diff <= epsilon,
            "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}`,\n   eps: `{:?}`",
            actual,
            expected,
            diff,
            epsilon
        );
    };
}

/// A test-focused wrapper around [`Pipeline`].
///
/// Stage tracing is switched on so that a subscriber installed by the test
/// sees the size of every blocking stage.
///
/// ```
/// use ironquery::testing::TestPipeline;
/// use ironquery::from_vec;
///
/// let p = TestPipeline::new();
/// let data = from_vec(&p, vec![1, 2, 3]);
/// assert_eq!(p.node_count(), 1);
/// ```
#[derive(Clone)]
pub struct TestPipeline {
    pipeline: Pipeline,
}

impl TestPipeline {
    #[must_use]
    pub fn new() -> Self {
        Self {
            pipeline: Pipeline::with_options(
                PipelineOptions::default().name("test").trace_stages(true),
            ),
        }
    }

    /// Number of stages currently held by live queries.
    #[must_use]
    pub fn node_count(&self) -> usize {
        let (nodes, _) = self.pipeline.snapshot();
        nodes.len()
    }

    /// Number of stage-to-stage connections currently held by live queries.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        let (_, edges) = self.pipeline.snapshot();
        edges.len()
    }

    /// Print the recorded graph, nodes in id order.
    pub fn debug_print_graph(&self) {
        let (nodes, edges) = self.pipeline.snapshot();
        let mut ids: Vec<_> = nodes.keys().copied().collect();
        ids.sort();
        println!("Pipeline Graph:");
        println!("  Nodes: {}", nodes.len());
        for id in ids {
            println!("    {id} {}", nodes[&id].kind);
        }
        println!("  Edges: {}", edges.len());
        for (from, to) in &edges {
            println!("    {from} -> {to}");
        }
    }
}

impl Default for TestPipeline {
    fn default() -> Self {
        Self::new()
    }
}

// Allow TestPipeline to be used wherever Pipeline is expected
impl std::ops::Deref for TestPipeline {
    type Target = Pipeline;

    fn deref(&self) -> &Self::Target {
        &self.pipeline
    }
}

impl AsRef<Pipeline> for TestPipeline {
    fn as_ref(&self) -> &Pipeline {
        &self.pipeline
    }
}
