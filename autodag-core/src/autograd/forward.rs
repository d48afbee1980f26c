use crate::autograd::graph::{Graph, NodeId};
use crate::autograd::node_function::NodeFunction;
use crate::error::{AutodagError, Result};
use crate::matrix::Matrix;

/// Everything one forward pass recorded.
///
/// For each evaluated node the store keeps the input value(s) it was fed
/// (needed to re-derive local derivatives during backward propagation) and its
/// output value. A store is owned by the caller and never shared between
/// passes.
#[derive(Debug, Clone, PartialEq)]
pub struct ForwardStore {
    root: NodeId,
    names: Vec<String>,
    inputs: Vec<Vec<Matrix>>,
    values: Vec<Matrix>,
}

impl ForwardStore {
    /// The node the pass was run up to.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Value of the root.
    pub fn output(&self) -> &Matrix {
        &self.values[self.root.0]
    }

    /// Root value as a scalar, or `NonScalarRoot`.
    pub fn scalar_output(&self) -> Result<f64> {
        let out = self.output();
        out.as_scalar()
            .ok_or_else(|| AutodagError::NonScalarRoot { shape: out.shape() })
    }

    /// Number of nodes recorded (every node up to and including the root).
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The values fed into `id`. For a leaf, the single supplied value.
    pub fn inputs(&self, id: NodeId) -> Result<&[Matrix]> {
        self.inputs
            .get(id.0)
            .map(Vec::as_slice)
            .ok_or_else(|| self.missing(id))
    }

    /// The output of `id`.
    pub fn value(&self, id: NodeId) -> Result<&Matrix> {
        self.values.get(id.0).ok_or_else(|| self.missing(id))
    }

    /// Name of node `id` as recorded by the pass.
    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.names.get(id.0).map(String::as_str)
    }

    fn missing(&self, id: NodeId) -> AutodagError {
        AutodagError::MissingForwardValue(id.to_string())
    }
}

impl Graph {
    /// Evaluates the whole graph; see [`forward_from`](Graph::forward_from).
    pub fn forward(&self, leaf_values: &[Matrix]) -> Result<ForwardStore> {
        self.forward_from(self.root()?, leaf_values)
    }

    /// Evaluates every node up to and including `root` in one ascending sweep.
    ///
    /// `leaf_values` are assigned to the graph's leaves positionally, in
    /// ascending index order. Each leaf records its value verbatim; every
    /// other node records the values of its inputs and evaluates its operator
    /// on them.
    ///
    /// # Errors
    /// `NotSealed` before [`seal`](Graph::seal); `LeafCountMismatch` when the
    /// number of supplied values differs from the number of leaves; any error
    /// raised by an operator (e.g. `ShapeMismatch`).
    pub fn forward_from(&self, root: NodeId, leaf_values: &[Matrix]) -> Result<ForwardStore> {
        self.ensure_sealed()?;
        self.check_id(root)?;
        let leaves = self.leaves();
        if leaves.len() != leaf_values.len() {
            return Err(AutodagError::LeafCountMismatch {
                expected: leaves.len(),
                actual: leaf_values.len(),
            });
        }

        let count = root.0 + 1;
        let mut names = Vec::with_capacity(count);
        let mut inputs: Vec<Vec<Matrix>> = Vec::with_capacity(count);
        let mut values: Vec<Matrix> = Vec::with_capacity(count);
        let mut next_leaf = leaf_values.iter();

        for i in 0..count {
            let node = self.node_at(i);
            let node_inputs = if node.is_leaf() {
                match next_leaf.next() {
                    Some(v) => vec![v.clone()],
                    None => {
                        return Err(AutodagError::LeafCountMismatch {
                            expected: leaves.len(),
                            actual: leaf_values.len(),
                        })
                    }
                }
            } else {
                node.inputs().iter().map(|id| values[id.0].clone()).collect()
            };
            let value = node.op().evaluate(&node_inputs)?;
            log::trace!("forward: [{}] -> {:?}", node.name(), value.shape());
            names.push(node.name().to_string());
            inputs.push(node_inputs);
            values.push(value);
        }

        Ok(ForwardStore {
            root,
            names,
            inputs,
            values,
        })
    }
}
