use crate::config::PipelineOptions;
use crate::node::Node;
use crate::node_id::NodeId;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

// -------- Pipeline + nodes --------

/// Records the stages built on top of it. The graph is descriptive only: data
/// never lives here, so every terminal call re-runs its chain from the source.
///
/// A stage stays in the graph only while some [`Query`](crate::Query) built
/// on it is alive. Dropping the last handle of a chain removes its nodes and
/// edges, so a long-lived pipeline does not grow with the number of queries
/// it has served.
///
/// ```
/// use ironquery::*;
///
/// let p = Pipeline::default();
/// let q = from_vec(&p, vec![1, 2, 3]).map(|n: &i32| n + 1);
/// assert_eq!(p.snapshot().0.len(), 2);
/// drop(q);
/// assert!(p.snapshot().0.is_empty());
/// ```
pub struct Pipeline {
    pub(crate) inner: Arc<Mutex<PipelineInner>>,
}

pub(crate) struct PipelineInner {
    pub(crate) next_id: u64,
    pub(crate) nodes: HashMap<NodeId, Node>,
    pub(crate) edges: Vec<(NodeId, NodeId)>,
    pub(crate) options: PipelineOptions,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::with_options(PipelineOptions::default())
    }
}

/// Allow `Pipeline` cloning; clones share one graph.
impl Clone for Pipeline {
    fn clone(&self) -> Self {
        Pipeline {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl Pipeline {
    pub fn with_options(options: PipelineOptions) -> Self {
        Self {
            inner: Arc::new(Mutex::new(PipelineInner {
                next_id: 0,
                nodes: HashMap::new(),
                edges: Vec::new(),
                options,
            })),
        }
    }

    // The graph holds no invariants that a panicking closure could break.
    fn lock(&self) -> MutexGuard<'_, PipelineInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn options(&self) -> PipelineOptions {
        self.lock().options.clone()
    }

    /// Add a stage fed by `parents`. The stage is removed again when the
    /// returned handle and every handle downstream of it are dropped.
    pub(crate) fn register(&self, node: Node, parents: &[&Arc<NodeHandle>]) -> Arc<NodeHandle> {
        let mut g = self.lock();
        let id = NodeId::new(g.next_id);
        g.next_id += 1;
        g.nodes.insert(id, node);
        for parent in parents {
            g.edges.push((parent.id, id));
        }
        drop(g);
        Arc::new(NodeHandle {
            pipeline: self.clone(),
            id,
            _parents: parents.iter().map(|p| Arc::clone(*p)).collect(),
        })
    }

    fn remove_node(&self, id: NodeId) {
        let mut g = self.lock();
        g.nodes.remove(&id);
        g.edges.retain(|(from, to)| *from != id && *to != id);
    }

    pub(crate) fn set_label(&self, id: NodeId, label: String) {
        if let Some(node) = self.lock().nodes.get_mut(&id) {
            node.label = Some(label);
        }
    }

    /// Copy of the recorded nodes and edges.
    pub fn snapshot(&self) -> (HashMap<NodeId, Node>, Vec<(NodeId, NodeId)>) {
        let g = self.lock();
        (g.nodes.clone(), g.edges.clone())
    }

    /// Every node `terminal` depends on, sources first, `terminal` last.
    ///
    /// Binary stages contribute both parents, left branch before right.
    pub(crate) fn lineage(&self, terminal: NodeId) -> Vec<(NodeId, Node)> {
        let g = self.lock();
        let mut out: Vec<(NodeId, Node)> = Vec::new();
        let mut done: HashSet<NodeId> = HashSet::new();
        let mut stack = vec![(terminal, false)];
        while let Some((id, expanded)) = stack.pop() {
            if done.contains(&id) {
                continue;
            }
            if expanded {
                done.insert(id);
                if let Some(node) = g.nodes.get(&id) {
                    out.push((id, node.clone()));
                }
                continue;
            }
            stack.push((id, true));
            // push right parent first so the left one is visited first
            for (from, _) in g.edges.iter().rev().filter(|(_, to)| *to == id) {
                stack.push((*from, false));
            }
        }
        out
    }
}

/// Pins one stage, and through its parents the whole upstream chain, in the
/// pipeline graph. Shared by every clone of the query that owns it.
pub(crate) struct NodeHandle {
    pipeline: Pipeline,
    pub(crate) id: NodeId,
    _parents: Vec<Arc<NodeHandle>>,
}

impl Drop for NodeHandle {
    fn drop(&mut self) {
        self.pipeline.remove_node(self.id);
    }
}
