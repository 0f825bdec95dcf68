//! Direct solvers for the reduced KKT system of the polishing stage.

#![allow(non_snake_case)]

use super::PolishSettings;
use crate::algebra::*;
use crate::qdldl::QDLDLError;
use thiserror::Error;

mod assembly;
mod qdldl;
pub(crate) use assembly::*;
pub use qdldl::*;

/// Error type returned by KKT factor and solve operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KKTError {
    /// The KKT matrix is numerically singular, or the solve
    /// produced a non-finite result
    #[error("KKT system is singular")]
    SingularSystem,
    /// Storage for the KKT matrix could not be reserved
    #[error("Out of memory while assembling the KKT system")]
    OutOfMemory,
    /// Matrix or vector dimensions do not agree
    #[error("KKT system dimensions are incompatible")]
    IncompatibleDimension,
    /// Any other failure reported by the linear solver
    #[error("Linear solver failure: {0}")]
    LinearSolver(QDLDLError),
}

impl From<QDLDLError> for KKTError {
    fn from(e: QDLDLError) -> Self {
        match e {
            QDLDLError::ZeroPivot => KKTError::SingularSystem,
            QDLDLError::IncompatibleDimension => KKTError::IncompatibleDimension,
            e => KKTError::LinearSolver(e),
        }
    }
}

impl From<SparseFormatError> for KKTError {
    fn from(e: SparseFormatError) -> Self {
        match e {
            SparseFormatError::OutOfMemory(_) => KKTError::OutOfMemory,
            _ => KKTError::IncompatibleDimension,
        }
    }
}

/// Regularization applied to the diagonal blocks of the KKT matrix
/// `[[P + δ_P I, Aᵀ], [A, -δ_A I]]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KKTMode<T> {
    /// `δ_P = δ_A = delta`, solved with iterative refinement against
    /// the unregularized matrix
    Polish { delta: T },
    /// `δ_P = sigma`, `δ_A = 1/rho`, solved without refinement
    Admm { sigma: T, rho: T },
}

impl<T> KKTMode<T>
where
    T: FloatT,
{
    /// diagonal shifts `(δ_P, δ_A)`
    pub fn shifts(&self) -> (T, T) {
        match *self {
            KKTMode::Polish { delta } => (delta, delta),
            KKTMode::Admm { sigma, rho } => (sigma, T::recip(rho)),
        }
    }
}

/// A factored KKT system.
///
/// The factorization is released when the value is dropped.
pub trait ReducedKKTSolver<T: FloatT>: Sized {
    /// Assembles and factors the KKT matrix for the upper triangular
    /// cost `P` (n×n) and constraints `A` (m×n).
    fn factor(
        P: &CscMatrix<T>,
        A: &CscMatrix<T>,
        settings: &PolishSettings<T>,
        mode: KKTMode<T>,
    ) -> Result<Self, KKTError>;

    /// Solves the KKT system with `rhs` (length n+m) overwritten by
    /// the solution.
    fn solve(&mut self, rhs: &mut [T]) -> Result<(), KKTError>;

    /// refinement steps performed by the most recent solve
    fn refine_iterations(&self) -> u32 {
        0
    }
}
