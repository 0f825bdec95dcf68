use crate::algebra::*;

#[cfg(feature = "serde")]
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Approximate primal-dual point handed over by the outer iteration.
///
/// `z` stacks the primal variable and the constraint values, so that
/// `z[n..n+m]` holds the slack of each constraint row.  `u` is the
/// per-row scaling used when classifying constraints as active.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: Serialize + DeserializeOwned"))]
pub struct Iterate<T> {
    pub z: Vec<T>,
    pub u: Vec<T>,
}

impl<T> Iterate<T>
where
    T: FloatT,
{
    pub fn new(n: usize, m: usize) -> Self {
        Self {
            z: vec![T::zero(); n + m],
            u: vec![T::zero(); m],
        }
    }

    /// constraint slacks `z[n..]`
    pub fn slack(&self, n: usize) -> &[T] {
        &self.z[n..]
    }
}
