//! # ironquery
//!
//! Lazy, composable query operators over finite in-memory sequences:
//! filtering and projection, grouping, stable multi-key ordering, set
//! combination, aggregation and folds.
//!
//! ## Key Features
//!
//! - **Lazy, restartable queries** - nothing runs until a terminal call, and
//!   every terminal call re-runs the chain from its source
//! - **Pluggable equivalence** - grouping and set operators take a
//!   [`Classifier`] instead of relying on raw equality
//! - **Stable multi-key ordering** - per-level direction and comparator
//! - **Checked aggregates** - overflow and empty input are errors, never
//!   silent defaults
//! - **Introspection** - [`Query::explain`] lists the stages a query runs
//!
//! ## Quick Start
//!
//! ```
//! use ironquery::*;
//! # use anyhow::Result;
//!
//! # fn main() -> Result<()> {
//! let p = Pipeline::default();
//!
//! let words = from_vec(&p, vec![
//!     "from   ".to_string(),
//!     " salt".to_string(),
//!     " earn ".to_string(),
//!     "  last   ".to_string(),
//!     " near ".to_string(),
//!     " form  ".to_string(),
//! ]);
//!
//! let anagrams = words
//!     .group_by_map(|w: &String| w.trim().to_string(), AnagramClassifier, |w: &String| w.to_uppercase())
//!     .collect_seq()?;
//!
//! assert_eq!(anagrams.len(), 3);
//! assert_eq!(anagrams[0].key(), "from");
//! assert_eq!(anagrams[0].members(), &["FROM   ".to_string(), " FORM  ".to_string()]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Core Concepts
//!
//! ### Pipeline
//!
//! A [`Pipeline`] records the stages built on top of it. It holds no data;
//! it exists so queries can be named, traced and explained.
//!
//! ### Query
//!
//! A [`Query<T>`] is a lazy sequence. Streaming stages
//! ([`map`](Query::map), [`filter`](Query::filter),
//! [`flat_map`](Query::flat_map) and friends) pass elements through one at a
//! time. Blocking stages ([`group_by`](Query::group_by),
//! [`order_by`](Query::order_by), the set operators) drain their input on
//! the first pull and then stream their result.
//!
//! ### Terminals
//!
//! [`collect_seq`](Query::collect_seq), the aggregates in [`aggregate`]
//! (`count`, `sum`, `min`, `max`, `average`, `fold`, `fold_seeded`) and the
//! quantifiers (`any`, `all`, `contains`, `sequence_equal`, `first`) force
//! evaluation and report the first failure as a [`QueryError`].
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events: a `query` span per terminal call and,
//! with [`PipelineOptions::trace_stages`], a `trace` event per blocking stage.
//! Installing a subscriber is left to the application.

pub mod aggregate;
pub mod classifier;
pub mod collection;
pub mod combiners;
pub mod config;
pub mod error;
pub mod explain;
pub mod grouping;
pub mod node;
pub mod node_id;
pub mod ordering;
pub mod pipeline;
pub mod runner;
pub mod set_ops;
pub mod testing;

// General re-exports
pub use classifier::{AnagramClassifier, CaseInsensitive, Classifier, KeyOf, Natural, key_of};
pub use collection::{QBound, Query, Stream, from_fn, from_vec};
pub use combiners::{Average, CombineFn, Count, Max, Min, Of, Sum, Summable};
pub use config::PipelineOptions;
pub use error::{QueryError, Result};
pub use explain::{Plan, PlanStep};
pub use grouping::{Group, GroupResult};
pub use node::{Node, StageKind};
pub use node_id::NodeId;
pub use ordering::{Direction, OrderSpec, compare};
pub use pipeline::Pipeline;
pub use runner::Runner;
