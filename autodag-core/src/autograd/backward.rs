use crate::autograd::forward::ForwardStore;
use crate::autograd::graph::{Graph, NodeId};
use crate::autograd::jacobian::Jacobian;
use crate::autograd::node_function::NodeFunction;
use crate::error::{AutodagError, Result};
use crate::matrix::Matrix;
use crate::nn::parameter::Parameter;
use std::collections::HashMap;

/// `∂root/∂node` for every node up to the root of a forward pass.
///
/// Each entry is a `1 x numel(node)` row: the gradient of the scalar root with
/// respect to every element of the node's value.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientTable {
    root: NodeId,
    grads: Vec<Matrix>,
}

impl GradientTable {
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.grads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grads.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Option<&Matrix> {
        self.grads.get(id.0)
    }

    /// Gradient of a scalar-valued node.
    pub fn scalar(&self, id: NodeId) -> Option<f64> {
        self.get(id).and_then(Matrix::as_scalar)
    }

    /// All entries as plain numbers, if every node is scalar-valued.
    pub fn to_scalars(&self) -> Option<Vec<f64>> {
        self.grads.iter().map(Matrix::as_scalar).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Matrix)> {
        self.grads.iter().enumerate().map(|(i, g)| (NodeId(i), g))
    }
}

/// Memoization tables for one `(parameter, forward store)` backward call.
///
/// Local derivatives only depend on a node's cached inputs, and a node's β
/// only on its own subgraph, so each is computed at most once per call no
/// matter how many ancestors share the node.
#[derive(Debug, Default)]
pub(crate) struct BackwardCache {
    pub(crate) param_derivatives: HashMap<NodeId, Matrix>,
    pub(crate) jacobians: HashMap<(NodeId, usize), Jacobian>,
    pub(crate) betas: HashMap<NodeId, Matrix>,
}

fn non_scalar_root(store: &ForwardStore) -> AutodagError {
    AutodagError::NonScalarRoot {
        shape: store.output().shape(),
    }
}

impl Graph {
    /// Reverse sweep computing `∂root/∂node` for every node up to the store's root.
    ///
    /// `g[root] = 1`; walking down from `root - 1`, each node's entry is the
    /// sum, over the consumers reading it (ascending index), of the consumer's
    /// entry times the consumer's local Jacobian at that input position. A node
    /// read at several positions contributes once per position. Nodes with no
    /// path to the root get zeros.
    ///
    /// # Errors
    /// `NotSealed`, `NonScalarRoot`, or any operator error.
    pub fn backward_table(&self, store: &ForwardStore) -> Result<GradientTable> {
        self.ensure_sealed()?;
        let root = store.root();
        self.check_id(root)?;
        if store.output().numel() != 1 {
            return Err(non_scalar_root(store));
        }

        let mut grads: Vec<Matrix> = Vec::with_capacity(root.0 + 1);
        for i in 0..=root.0 {
            grads.push(Matrix::zeros(1, store.value(NodeId(i))?.numel()));
        }
        grads[root.0] = Matrix::scalar(1.0);

        for j in (0..root.0).rev() {
            let mut g_j = Matrix::zeros(1, store.value(NodeId(j))?.numel());
            for &(consumer, position) in self.consumers(NodeId(j)) {
                if consumer.0 > root.0 {
                    continue;
                }
                let local = self
                    .node_at(consumer.0)
                    .op()
                    .derivative(store.inputs(consumer)?, position)?;
                g_j.add_inplace(&local.left_mul(&grads[consumer.0])?)?;
            }
            grads[j] = g_j;
        }

        Ok(GradientTable { root, grads })
    }

    /// Gradient of the store's root with respect to `param`, one entry per
    /// parameter element.
    ///
    /// Walks depth-first from the root, only descending into inputs whose
    /// parameter set contains `param`, and accumulates
    /// `β(node) = ∂node/∂param|direct + Σ_k K(node, k) · β(input_k)`.
    /// A parameter the root does not depend on yields zeros.
    ///
    /// # Errors
    /// `NotSealed`, `NonScalarRoot`, or any operator error.
    pub fn backward_param(&self, store: &ForwardStore, param: &Parameter) -> Result<Vec<f64>> {
        self.ensure_sealed()?;
        let root = store.root();
        self.check_id(root)?;
        if store.output().numel() != 1 {
            return Err(non_scalar_root(store));
        }
        if !self.node_at(root.0).depends_on(param) {
            log::debug!(
                "backward: root does not depend on '{}', gradient is zero",
                param.name()
            );
            return Ok(vec![0.0; param.len()]);
        }

        let mut cache = BackwardCache::default();
        let beta = self.beta(root, param, store, &mut cache)?;
        if beta.rows() != 1 {
            return Err(non_scalar_root(store));
        }
        log::trace!(
            "backward on '{}': {} local jacobians, {} param derivatives",
            param.name(),
            cache.jacobians.len(),
            cache.param_derivatives.len()
        );
        Ok(beta.into_data())
    }

    /// [`backward_param`](Graph::backward_param) for several parameters, each
    /// with its own cache.
    pub fn backward_params(
        &self,
        store: &ForwardStore,
        params: &[Parameter],
    ) -> Result<Vec<(Parameter, Vec<f64>)>> {
        params
            .iter()
            .map(|p| Ok((p.clone(), self.backward_param(store, p)?)))
            .collect()
    }

    /// β accumulator of `id`: `numel(id) x param.len()`.
    ///
    /// First collects the ancestors of `id` that depend on `param` and have
    /// no cached β yet, then fills them in ascending index order. Inputs
    /// always precede their consumer, so every input's β is already cached
    /// when the consumer is reached. Runs without recursion, whatever the
    /// depth of the graph.
    pub(crate) fn beta(
        &self,
        id: NodeId,
        param: &Parameter,
        store: &ForwardStore,
        cache: &mut BackwardCache,
    ) -> Result<Matrix> {
        let mut pending = vec![false; id.0 + 1];
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if pending[current.0] || cache.betas.contains_key(&current) {
                continue;
            }
            pending[current.0] = true;
            for &child in self.node_at(current.0).inputs() {
                if self.node_at(child.0).depends_on(param) {
                    stack.push(child);
                }
            }
        }

        for index in (0..=id.0).filter(|&i| pending[i]) {
            let node_id = NodeId(index);
            let beta = self.local_beta(node_id, param, store, cache)?;
            cache.betas.insert(node_id, beta);
        }

        cache
            .betas
            .get(&id)
            .cloned()
            .ok_or_else(|| AutodagError::MissingForwardValue(id.to_string()))
    }

    /// `∂node/∂param|direct + Σ_k K(node, k) · β(input_k)`, reading the
    /// inputs' β from `cache`.
    fn local_beta(
        &self,
        id: NodeId,
        param: &Parameter,
        store: &ForwardStore,
        cache: &mut BackwardCache,
    ) -> Result<Matrix> {
        let node = self.node_at(id.0);
        let inputs = store.inputs(id)?;

        let mut beta = match cache.param_derivatives.get(&id) {
            Some(xi) => xi.clone(),
            None => {
                let xi = node.op().param_derivative(inputs, param)?;
                cache.param_derivatives.insert(id, xi.clone());
                xi
            }
        };

        for (position, &child) in node.inputs().iter().enumerate() {
            if !self.node_at(child.0).depends_on(param) {
                continue;
            }
            if !cache.jacobians.contains_key(&(id, position)) {
                let k = node.op().derivative(inputs, position)?;
                cache.jacobians.insert((id, position), k);
            }
            let (Some(k), Some(beta_child)) =
                (cache.jacobians.get(&(id, position)), cache.betas.get(&child))
            else {
                return Err(AutodagError::MissingForwardValue(child.to_string()));
            };
            beta.add_inplace(&k.mul(beta_child)?)?;
        }
        Ok(beta)
    }
}

#[cfg(test)]
#[path = "backward_test.rs"]
mod tests;
