use crate::algebra::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Outcome of the most recent polish attempt
#[derive(PartialEq, Eq, Clone, Debug, Copy, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PolishStatus {
    /// No attempt has been made
    #[default]
    Unperformed,
    /// The polished point improved both residuals and was accepted
    Succeeded,
    /// The attempt completed but the polished point was not better
    Rejected,
    /// The attempt could not be completed
    Failed,
}

impl std::fmt::Display for PolishStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Best known residuals and objective, plus bookkeeping for the last
/// polish attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct PolishInfo<T> {
    /// objective value at the best known point
    pub obj_val: T,
    /// primal residual `‖Ax - Π(Ax)‖∞` at the best known point
    pub res_prim: T,
    /// dual residual `‖Px + q + A'λ‖∞` at the best known point
    pub res_dual: T,
    /// status of the last attempt
    pub polish_status: PolishStatus,
    /// wall time of the last attempt in seconds (requires `profiling`)
    pub polish_time: f64,
    /// refinement steps performed in the last attempt
    pub refine_iterations: u32,
}

impl<T> Default for PolishInfo<T>
where
    T: FloatT,
{
    // infinite residuals, so that any finite polished point is accepted
    fn default() -> Self {
        Self {
            obj_val: T::nan(),
            res_prim: T::infinity(),
            res_dual: T::infinity(),
            polish_status: PolishStatus::Unperformed,
            polish_time: 0f64,
            refine_iterations: 0,
        }
    }
}

impl<T> PolishInfo<T>
where
    T: FloatT,
{
    pub fn new() -> Self {
        Self::default()
    }
}
