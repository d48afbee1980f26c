use crate::error::{AutodagError, Result};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, RwLock, RwLockReadGuard};

#[derive(Debug)]
struct ParameterData {
    name: String,
    value: Vec<f64>,
}

/// A named, trainable scalar or vector value.
///
/// `Parameter` is a cheap handle (`Arc<RwLock<..>>`): every node that declares
/// the same parameter holds a clone of the same handle, and the optimizer
/// mutates it between passes. Equality and hashing use the shared allocation,
/// so two parameters with the same name are still distinct parameters.
#[derive(Clone)]
pub struct Parameter(Arc<RwLock<ParameterData>>);

/// Stable identity of a parameter, usable as a map key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParamId(usize);

impl Parameter {
    /// Creates a vector parameter.
    ///
    /// An empty `value` is replaced by a single zero and logged at `warn`; use
    /// [`try_new`](Self::try_new) to reject it instead.
    pub fn new(name: impl Into<String>, value: Vec<f64>) -> Self {
        let name = name.into();
        let value = if value.is_empty() {
            log::warn!("Parameter '{}' created with no elements, using [0.0].", name);
            vec![0.0]
        } else {
            value
        };
        Parameter(Arc::new(RwLock::new(ParameterData { name, value })))
    }

    /// Creates a vector parameter, failing with `ParameterShape` when `value`
    /// is empty.
    pub fn try_new(name: impl Into<String>, value: Vec<f64>) -> Result<Self> {
        let name = name.into();
        if value.is_empty() {
            return Err(AutodagError::ParameterShape {
                name,
                expected: 1,
                actual: 0,
            });
        }
        Ok(Self::new(name, value))
    }

    pub fn scalar(name: impl Into<String>, value: f64) -> Self {
        Self::new(name, vec![value])
    }

    fn read_data(&self) -> RwLockReadGuard<'_, ParameterData> {
        self.0.read().unwrap_or_else(|poisoned| {
            log::warn!("RwLock for parameter was poisoned on read. Recovering reader guard.");
            poisoned.into_inner()
        })
    }

    pub fn id(&self) -> ParamId {
        ParamId(Arc::as_ptr(&self.0) as usize)
    }

    pub fn name(&self) -> String {
        self.read_data().name.clone()
    }

    /// Number of elements (1 for a scalar parameter).
    pub fn len(&self) -> usize {
        self.read_data().value.len()
    }

    pub fn is_scalar(&self) -> bool {
        self.len() == 1
    }

    /// A copy of the current value.
    pub fn value(&self) -> Vec<f64> {
        self.read_data().value.clone()
    }

    /// First element; the whole value for a scalar parameter.
    pub fn scalar_value(&self) -> f64 {
        self.read_data().value[0]
    }

    /// Element `index` of the value, or `None` when out of range.
    pub fn get(&self, index: usize) -> Option<f64> {
        self.read_data().value.get(index).copied()
    }

    /// Replaces the value. The length is fixed at construction.
    pub fn set_value(&self, value: Vec<f64>) -> Result<()> {
        self.update(|current| current.copy_from_slice(&value), value.len())
    }

    /// Sets a single element.
    pub fn set_element(&self, index: usize, value: f64) -> Result<()> {
        let len = self.len();
        if index >= len {
            return Err(AutodagError::ParameterShape {
                name: self.name(),
                expected: len,
                actual: index + 1,
            });
        }
        self.update(|current| current[index] = value, len)
    }

    /// Applies `value[i] += delta[i]` for every element.
    pub fn apply_delta(&self, delta: &[f64]) -> Result<()> {
        self.update(
            |current| {
                for (v, d) in current.iter_mut().zip(delta) {
                    *v += d;
                }
            },
            delta.len(),
        )
    }

    fn update(&self, f: impl FnOnce(&mut [f64]), incoming_len: usize) -> Result<()> {
        let mut guard = self.0.write().map_err(|e| AutodagError::LockError {
            lock_type: "write".to_string(),
            reason: format!("Failed to lock parameter for update: {}", e),
        })?;
        if guard.value.len() != incoming_len {
            return Err(AutodagError::ParameterShape {
                name: guard.name.clone(),
                expected: guard.value.len(),
                actual: incoming_len,
            });
        }
        f(&mut guard.value);
        Ok(())
    }
}

impl PartialEq for Parameter {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Parameter {}

impl Hash for Parameter {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl fmt::Debug for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.read_data();
        write!(f, "Parameter({:?}, {:?})", data.name, data.value)
    }
}

#[cfg(test)]
#[path = "parameter_test.rs"]
mod tests;
