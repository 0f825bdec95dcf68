use crate::algebra::*;

/// Best known primal-dual solution.  Polishing overwrites it only
/// when an attempt improves on both residuals.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution<T> {
    /// primal solution
    pub x: Vec<T>,
    /// constraint multipliers
    pub lambda: Vec<T>,
}

impl<T> Solution<T>
where
    T: FloatT,
{
    /// Create a new `Solution` object
    pub fn new(n: usize, m: usize) -> Self {
        Self {
            x: vec![T::zero(); n],
            lambda: vec![T::zero(); m],
        }
    }
}
