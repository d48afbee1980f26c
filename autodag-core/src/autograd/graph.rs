use crate::autograd::node_function::NodeFunction;
use crate::error::{AutodagError, Result};
use crate::nn::parameter::Parameter;
use crate::ops::Op;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Position of a node in its graph. Inputs always have a smaller id than the
/// nodes consuming them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// One unit of computation in a [`Graph`].
#[derive(Debug, Clone)]
pub struct Node {
    name: String,
    op: Op,
    inputs: Vec<NodeId>,
    direct_params: HashSet<Parameter>,
    indirect_params: HashSet<Parameter>,
}

impl Node {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn op(&self) -> &Op {
        &self.op
    }

    /// Ordered input ids (the node's reverse adjacency).
    pub fn inputs(&self) -> &[NodeId] {
        &self.inputs
    }

    pub fn is_leaf(&self) -> bool {
        self.op.is_input()
    }

    /// Parameters the node's operator references explicitly.
    pub fn direct_params(&self) -> &HashSet<Parameter> {
        &self.direct_params
    }

    /// Parameters reachable through the node's inputs. Populated by sealing.
    pub fn indirect_params(&self) -> &HashSet<Parameter> {
        &self.indirect_params
    }

    /// Every parameter the node's output can depend on.
    pub fn all_params(&self) -> HashSet<Parameter> {
        self.direct_params
            .union(&self.indirect_params)
            .cloned()
            .collect()
    }

    /// `true` if `param` is in [`all_params`](Self::all_params).
    pub fn depends_on(&self, param: &Parameter) -> bool {
        self.direct_params.contains(param) || self.indirect_params.contains(param)
    }
}

/// A computation DAG stored in topological order.
///
/// Nodes are appended with [`input`](Graph::input) and [`node`](Graph::node)
/// (or built in one go with [`from_reverse_adjacency`](Graph::from_reverse_adjacency)).
/// Before any propagation the graph must be [sealed](Graph::seal), which
/// validates its structure, computes every node's indirect parameter set and
/// builds the forward adjacency index. Appending a node unseals the graph.
///
/// The root (output) is the last node.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<Node>,
    /// For each node, the `(consumer, input position)` pairs that read it,
    /// in ascending consumer order.
    consumers: Vec<Vec<(NodeId, usize)>>,
    sealed: bool,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a leaf.
    pub fn input(&mut self, name: impl Into<String>) -> NodeId {
        self.push(name.into(), Op::input(), Vec::new())
    }

    /// Appends a node computing `op` over `inputs`.
    ///
    /// Inputs must already be in the graph, which keeps the topological
    /// ordering by construction. The input count is checked against the
    /// operator's arity when sealing.
    pub fn node(
        &mut self,
        name: impl Into<String>,
        op: Op,
        inputs: &[NodeId],
    ) -> Result<NodeId> {
        for input in inputs {
            self.check_id(*input)?;
        }
        Ok(self.push(name.into(), op, inputs.to_vec()))
    }

    /// Builds a graph from operators in index order and a map from node index
    /// to the indices of its inputs. Nodes absent from the map have no inputs
    /// and are given default names `v{index}`.
    ///
    /// # Errors
    /// `InvalidOrdering` if an input index is not strictly less than the
    /// index of the node consuming it.
    pub fn from_reverse_adjacency(
        ops: Vec<Op>,
        reverse_adj: &HashMap<usize, Vec<usize>>,
    ) -> Result<Graph> {
        let len = ops.len();
        if let Some(&bad) = reverse_adj.keys().find(|&&k| k >= len) {
            return Err(AutodagError::UnknownNode { index: bad, len });
        }
        let mut graph = Graph::new();
        for (i, op) in ops.into_iter().enumerate() {
            let inputs = reverse_adj.get(&i).cloned().unwrap_or_default();
            if let Some(&input) = inputs.iter().find(|&&j| j >= i) {
                return Err(AutodagError::InvalidOrdering { node: i, input });
            }
            let inputs: Vec<NodeId> = inputs.into_iter().map(NodeId).collect();
            graph.push(format!("v{}", i), op, inputs);
        }
        Ok(graph)
    }

    fn push(&mut self, name: String, op: Op, inputs: Vec<NodeId>) -> NodeId {
        let direct_params = op.direct_params().into_iter().collect();
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            name,
            op,
            inputs,
            direct_params,
            indirect_params: HashSet::new(),
        });
        self.sealed = false;
        id
    }

    /// Validates the graph and prepares it for propagation.
    ///
    /// * every node name must be unique (`DuplicateNodeName`);
    /// * every node must have exactly as many inputs as its operator's arity
    ///   (`ArityMismatch`), each preceding it (`InvalidOrdering`);
    /// * indirect parameter sets are computed bottom-up;
    /// * the forward adjacency index is rebuilt.
    ///
    /// Sealing twice yields the same state.
    pub fn seal(&mut self) -> Result<()> {
        if self.nodes.is_empty() {
            return Err(AutodagError::EmptyGraph);
        }
        log::debug!("sealing graph: registering {} nodes ...", self.nodes.len());

        let mut seen: HashMap<&str, usize> = HashMap::with_capacity(self.nodes.len());
        for (i, node) in self.nodes.iter().enumerate() {
            if let Some(&first) = seen.get(node.name.as_str()) {
                return Err(AutodagError::DuplicateNodeName {
                    name: node.name.clone(),
                    first,
                    second: i,
                });
            }
            seen.insert(&node.name, i);

            let arity = node.op.arity();
            if node.inputs.len() != arity {
                return Err(AutodagError::ArityMismatch {
                    name: node.name.clone(),
                    expected: arity,
                    actual: node.inputs.len(),
                });
            }
            if let Some(input) = node.inputs.iter().find(|input| input.0 >= i) {
                return Err(AutodagError::InvalidOrdering {
                    node: i,
                    input: input.0,
                });
            }
        }

        // Inputs precede consumers, so one ascending pass sees every input's
        // final set before it is needed.
        for i in 0..self.nodes.len() {
            let mut indirect = HashSet::new();
            for input in &self.nodes[i].inputs {
                let child = &self.nodes[input.0];
                indirect.extend(child.direct_params.iter().cloned());
                indirect.extend(child.indirect_params.iter().cloned());
            }
            log::trace!(
                "built indirect param set {:?} for node [{}]",
                indirect.iter().map(Parameter::name).collect::<Vec<_>>(),
                self.nodes[i].name
            );
            self.nodes[i].indirect_params = indirect;
        }

        let mut consumers = vec![Vec::new(); self.nodes.len()];
        for (i, node) in self.nodes.iter().enumerate() {
            for (position, input) in node.inputs.iter().enumerate() {
                consumers[input.0].push((NodeId(i), position));
            }
        }
        self.consumers = consumers;
        self.sealed = true;
        log::debug!("graph sealed.");
        Ok(())
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    pub(crate) fn ensure_sealed(&self) -> Result<()> {
        if self.sealed {
            Ok(())
        } else {
            Err(AutodagError::NotSealed)
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The output node (highest index).
    pub fn root(&self) -> Result<NodeId> {
        if self.nodes.is_empty() {
            Err(AutodagError::EmptyGraph)
        } else {
            Ok(NodeId(self.nodes.len() - 1))
        }
    }

    pub(crate) fn check_id(&self, id: NodeId) -> Result<()> {
        if id.0 < self.nodes.len() {
            Ok(())
        } else {
            Err(AutodagError::UnknownNode {
                index: id.0,
                len: self.nodes.len(),
            })
        }
    }

    pub fn get(&self, id: NodeId) -> Result<&Node> {
        self.check_id(id)?;
        Ok(&self.nodes[id.0])
    }

    /// Id of the node called `name`.
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.nodes.iter().position(|n| n.name == name).map(NodeId)
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// Leaves in ascending index order; leaf values are supplied in this order.
    pub fn leaves(&self) -> Vec<NodeId> {
        self.nodes()
            .filter(|(_, n)| n.is_leaf())
            .map(|(id, _)| id)
            .collect()
    }

    /// Nodes reading `id`, with the input position they read it at.
    /// Empty until the graph is sealed.
    pub fn consumers(&self, id: NodeId) -> &[(NodeId, usize)] {
        self.consumers.get(id.0).map_or(&[], Vec::as_slice)
    }

    /// Every parameter the root depends on.
    pub fn parameters(&self) -> Result<HashSet<Parameter>> {
        self.ensure_sealed()?;
        Ok(self.get(self.root()?)?.all_params())
    }

    pub(crate) fn node_at(&self, index: usize) -> &Node {
        &self.nodes[index]
    }
}

#[cfg(test)]
#[path = "graph_test.rs"]
mod tests;
