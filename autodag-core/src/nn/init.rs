//! Parameter initialization helpers.

use crate::nn::parameter::Parameter;
use rand::Rng;
use rand_distr::{Distribution, Normal, Uniform};

/// A parameter of length `len` with every element set to `value`.
pub fn constant(name: impl Into<String>, len: usize, value: f64) -> Parameter {
    Parameter::new(name, vec![value; len.max(1)])
}

/// A parameter of length `len` drawn from `U[low, high)`.
///
/// An empty or non-finite range falls back to a constant `low`.
pub fn uniform<R: Rng + ?Sized>(
    name: impl Into<String>,
    len: usize,
    low: f64,
    high: f64,
    rng: &mut R,
) -> Parameter {
    if !(low < high && (high - low).is_finite()) {
        log::warn!(
            "uniform init: invalid range [{}, {}), using constant low",
            low,
            high
        );
        return constant(name, len, low);
    }
    let dist = Uniform::new(low, high);
    let value = (0..len.max(1)).map(|_| dist.sample(rng)).collect();
    Parameter::new(name, value)
}

/// A parameter of length `len` drawn from `N(mean, std²)`.
///
/// A non-finite or negative `std` falls back to a constant `mean`.
pub fn normal<R: Rng + ?Sized>(
    name: impl Into<String>,
    len: usize,
    mean: f64,
    std: f64,
    rng: &mut R,
) -> Parameter {
    let len = len.max(1);
    match Normal::new(mean, std) {
        Ok(dist) => Parameter::new(name, (0..len).map(|_| dist.sample(rng)).collect()),
        Err(e) => {
            log::warn!("normal init: invalid std {} ({}), using constant mean", std, e);
            constant(name, len, mean)
        }
    }
}

#[cfg(test)]
#[path = "init_test.rs"]
mod tests;
