use crate::error::{QueryError, Result};
use crate::node::{Node, StageKind};
use crate::node_id::NodeId;
use crate::pipeline::{NodeHandle, Pipeline};
use crate::runner::{Runner, StageProbe};
use std::fmt::{Debug, Formatter, Result as FormatResult};
use std::iter;
use std::sync::Arc;

/// Bound shared by every element type flowing through a query.
pub trait QBound: 'static + Send + Sync + Clone {}
impl<T> QBound for T where T: 'static + Send + Sync + Clone {}

/// One enumeration of a query: a fallible, pull-based iterator.
pub type Stream<T> = Box<dyn Iterator<Item = Result<T>>>;

/// Restartable recipe for a [`Stream`]; calling it re-runs the whole chain.
pub(crate) type Producer<T> = Arc<dyn Fn() -> Stream<T> + Send + Sync>;

/// A lazy, restartable sequence.
///
/// Building a `Query` does no work. Each terminal call (`collect_seq`,
/// aggregates, quantifiers, `iter`) evaluates the chain from the source
/// again; results are never cached.
pub struct Query<T> {
    pub(crate) pipeline: Pipeline,
    pub(crate) id: NodeId,
    pub(crate) node: Arc<NodeHandle>,
    pub(crate) producer: Producer<T>,
}

impl<T> Clone for Query<T> {
    fn clone(&self) -> Self {
        Self {
            pipeline: self.pipeline.clone(),
            id: self.id,
            node: Arc::clone(&self.node),
            producer: Arc::clone(&self.producer),
        }
    }
}

impl<T> Debug for Query<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FormatResult {
        f.debug_struct("Query").field("id", &self.id).finish()
    }
}

/// Source over owned data. Every enumeration yields clones of `data`.
pub fn from_vec<T: QBound>(p: &Pipeline, data: Vec<T>) -> Query<T> {
    let data = Arc::new(data);
    let producer: Producer<T> = Arc::new(move || -> Stream<T> {
        let data = Arc::clone(&data);
        Box::new((0..data.len()).map(move |i| Ok(data[i].clone())))
    });
    Query::source(p, producer)
}

/// Source backed by a generator closure, invoked once per enumeration.
///
/// ```
/// use ironquery::*;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
///
/// let calls = Arc::new(AtomicUsize::new(0));
/// let seen = Arc::clone(&calls);
/// let p = Pipeline::default();
/// let q = from_fn(&p, move || {
///     seen.fetch_add(1, Ordering::SeqCst);
///     vec![1, 2, 3]
/// });
/// assert_eq!(calls.load(Ordering::SeqCst), 0);
/// q.collect_seq().unwrap();
/// q.collect_seq().unwrap();
/// assert_eq!(calls.load(Ordering::SeqCst), 2);
/// ```
pub fn from_fn<T, I, F>(p: &Pipeline, f: F) -> Query<T>
where
    T: QBound,
    I: IntoIterator<Item = T>,
    I::IntoIter: 'static,
    F: 'static + Send + Sync + Fn() -> I,
{
    let producer: Producer<T> = Arc::new(move || -> Stream<T> { Box::new(f().into_iter().map(Ok)) });
    Query::source(p, producer)
}

/// Stream that runs `f` on its first pull and then yields the result.
pub(crate) fn deferred<T, F>(f: F) -> Stream<T>
where
    T: 'static,
    F: 'static + FnOnce() -> Result<Vec<T>>,
{
    Box::new(iter::once_with(f).flat_map(|r| -> Stream<T> {
        match r {
            Ok(v) => Box::new(v.into_iter().map(Ok)),
            Err(e) => Box::new(iter::once(Err(e))),
        }
    }))
}

impl<T: QBound> Query<T> {
    fn source(p: &Pipeline, producer: Producer<T>) -> Self {
        let node = p.register(Node::new(StageKind::Source), &[]);
        Query {
            pipeline: p.clone(),
            id: node.id,
            node,
            producer,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Start a fresh enumeration from the source.
    pub fn iter(&self) -> Stream<T> {
        (self.producer)()
    }

    /// Attach a label to this stage; it shows up in [`explain`](Query::explain).
    #[must_use]
    pub fn named(self, label: impl Into<String>) -> Self {
        self.pipeline.set_label(self.id, label.into());
        self
    }

    pub(crate) fn runner(&self) -> Runner {
        Runner::new(self.pipeline.options())
    }

    /// Record a streaming stage fed by `self`.
    pub(crate) fn chain<O: QBound>(self, kind: StageKind, producer: Producer<O>) -> Query<O> {
        let node = self.pipeline.register(Node::new(kind), &[&self.node]);
        let id = node.id;
        Query {
            pipeline: self.pipeline,
            id,
            node,
            producer,
        }
    }

    /// Record a blocking stage: on first pull, drain `self` and run `f` over
    /// the materialized input.
    pub(crate) fn blocking<O, F>(self, kind: StageKind, f: F) -> Query<O>
    where
        O: QBound,
        F: 'static + Send + Sync + Fn(Vec<T>) -> Result<Vec<O>>,
    {
        let node = self.pipeline.register(Node::new(kind), &[&self.node]);
        let id = node.id;
        let probe = StageProbe::new(&self.pipeline.options(), id, kind);
        let upstream = self.producer;
        let f = Arc::new(f);
        let producer: Producer<O> = Arc::new(move || -> Stream<O> {
            let upstream = Arc::clone(&upstream);
            let f = Arc::clone(&f);
            let probe = probe.clone();
            deferred(move || {
                let input = upstream().collect::<Result<Vec<T>>>()?;
                let rows_in = input.len();
                let out = f(input)?;
                probe.materialized(rows_in, out.len());
                Ok(out)
            })
        });
        Query {
            pipeline: self.pipeline,
            id,
            node,
            producer,
        }
    }

    /// Binary form of [`blocking`](Query::blocking): both inputs are drained,
    /// left first.
    pub(crate) fn blocking_with<U, O, F>(self, other: &Query<U>, kind: StageKind, f: F) -> Query<O>
    where
        U: QBound,
        O: QBound,
        F: 'static + Send + Sync + Fn(Vec<T>, Vec<U>) -> Result<Vec<O>>,
    {
        let node = self
            .pipeline
            .register(Node::new(kind), &[&self.node, &other.node]);
        let id = node.id;
        let probe = StageProbe::new(&self.pipeline.options(), id, kind);
        let left = self.producer;
        let right = Arc::clone(&other.producer);
        let f = Arc::new(f);
        let producer: Producer<O> = Arc::new(move || -> Stream<O> {
            let left = Arc::clone(&left);
            let right = Arc::clone(&right);
            let f = Arc::clone(&f);
            let probe = probe.clone();
            deferred(move || {
                let a = left().collect::<Result<Vec<T>>>()?;
                let b = right().collect::<Result<Vec<U>>>()?;
                let rows_in = a.len() + b.len();
                let out = f(a, b)?;
                probe.materialized(rows_in, out.len());
                Ok(out)
            })
        });
        Query {
            pipeline: self.pipeline,
            id,
            node,
            producer,
        }
    }

    // ---- stateless, lazy stages ----

    pub fn map<O, F>(self, f: F) -> Query<O>
    where
        O: QBound,
        F: 'static + Send + Sync + Fn(&T) -> O,
    {
        let upstream = Arc::clone(&self.producer);
        let f = Arc::new(f);
        let producer: Producer<O> = Arc::new(move || -> Stream<O> {
            let f = Arc::clone(&f);
            Box::new(upstream().map(move |r| r.map(|t| f(&t))))
        });
        self.chain(StageKind::Map, producer)
    }

    pub fn filter<P>(self, pred: P) -> Query<T>
    where
        P: 'static + Send + Sync + Fn(&T) -> bool,
    {
        let upstream = Arc::clone(&self.producer);
        let pred = Arc::new(pred);
        let producer: Producer<T> = Arc::new(move || -> Stream<T> {
            let pred = Arc::clone(&pred);
            // errors pass through so the terminal sees them
            Box::new(upstream().filter(move |r| r.as_ref().map_or(true, |t| pred(t))))
        });
        self.chain(StageKind::Filter, producer)
    }

    pub fn flat_map<O, I, F>(self, f: F) -> Query<O>
    where
        O: QBound,
        I: IntoIterator<Item = O>,
        I::IntoIter: 'static,
        F: 'static + Send + Sync + Fn(&T) -> I,
    {
        let upstream = Arc::clone(&self.producer);
        let f = Arc::new(f);
        let producer: Producer<O> = Arc::new(move || -> Stream<O> {
            let f = Arc::clone(&f);
            Box::new(upstream().flat_map(move |r| -> Stream<O> {
                match r {
                    Ok(t) => Box::new(f(&t).into_iter().map(Ok)),
                    Err(e) => Box::new(iter::once(Err(e))),
                }
            }))
        });
        self.chain(StageKind::FlatMap, producer)
    }

    /// Projection that also receives the element's zero-based position.
    pub fn map_with_index<O, F>(self, f: F) -> Query<O>
    where
        O: QBound,
        F: 'static + Send + Sync + Fn(usize, &T) -> O,
    {
        let upstream = Arc::clone(&self.producer);
        let f = Arc::new(f);
        let producer: Producer<O> = Arc::new(move || -> Stream<O> {
            let f = Arc::clone(&f);
            Box::new(upstream().enumerate().map(move |(i, r)| r.map(|t| f(i, &t))))
        });
        self.chain(StageKind::Map, producer)
    }

    /// One-to-many projection that also receives the element's position.
    pub fn flat_map_with_index<O, I, F>(self, f: F) -> Query<O>
    where
        O: QBound,
        I: IntoIterator<Item = O>,
        I::IntoIter: 'static,
        F: 'static + Send + Sync + Fn(usize, &T) -> I,
    {
        let upstream = Arc::clone(&self.producer);
        let f = Arc::new(f);
        let producer: Producer<O> = Arc::new(move || -> Stream<O> {
            let f = Arc::clone(&f);
            Box::new(upstream().enumerate().flat_map(move |(i, r)| -> Stream<O> {
                match r {
                    Ok(t) => Box::new(f(i, &t).into_iter().map(Ok)),
                    Err(e) => Box::new(iter::once(Err(e))),
                }
            }))
        });
        self.chain(StageKind::FlatMap, producer)
    }

    /// Fallible projection. The first failure ends the enumeration with
    /// [`QueryError::Selector`].
    pub fn try_map<O, F>(self, f: F) -> Query<O>
    where
        O: QBound,
        F: 'static + Send + Sync + Fn(&T) -> anyhow::Result<O>,
    {
        let upstream = Arc::clone(&self.producer);
        let f = Arc::new(f);
        let producer: Producer<O> = Arc::new(move || -> Stream<O> {
            let f = Arc::clone(&f);
            Box::new(upstream().map(move |r| r.and_then(|t| f(&t).map_err(QueryError::from))))
        });
        self.chain(StageKind::TryMap, producer)
    }

    /// Evaluate the query and return every element in order.
    pub fn collect_seq(&self) -> Result<Vec<T>> {
        self.runner().collect(self)
    }
}
