#![allow(non_snake_case)]

use super::SettingsError;
use crate::algebra::*;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
/// Error type returned when problem data is rejected at setup
pub enum DataError {
    /// Matrix and vector dimensions do not agree with each other
    #[error("Problem data dimensions are incompatible")]
    IncompatibleDimension,
    /// A matrix is not well formed CSC data
    #[error("Bad matrix format: {0}")]
    BadFormat(#[from] SparseFormatError),
    /// Some lower bound exceeds its upper bound
    #[error("Lower bound exceeds upper bound in row {0}")]
    InfeasibleBounds(usize),
    /// Settings failed validation
    #[error("Bad settings: {0}")]
    BadSettings(#[from] SettingsError),
}

/// QP data `min ½x'Px + q'x  s.t.  l ≤ Ax ≤ u`.
///
/// `P` is held as its upper triangle.
#[derive(Debug, Clone)]
pub struct ProblemData<T> {
    pub P: CscMatrix<T>,
    pub q: Vec<T>,
    pub A: CscMatrix<T>,
    pub l: Vec<T>,
    pub u: Vec<T>,
    pub n: usize,
    pub m: usize,
}

impl<T> ProblemData<T>
where
    T: FloatT,
{
    /// Checks and copies the problem data.  Entries of `P`
    /// below the diagonal are dropped.
    pub fn new(
        P: CscMatrixView<'_, T>,
        q: &[T],
        A: CscMatrixView<'_, T>,
        l: &[T],
        u: &[T],
    ) -> Result<Self, DataError> {
        check_dimensions(&P, q, &A, l, u)?;
        P.check_format()?;
        A.check_format()?;

        if let Some(row) = l.iter().zip(u).position(|(l, u)| l > u) {
            return Err(DataError::InfeasibleBounds(row));
        }

        let P = P.to_owned();
        let P = if P.is_triu() { P } else { P.to_triu() };

        Ok(Self {
            P,
            q: q.to_vec(),
            A: A.to_owned(),
            l: l.to_vec(),
            u: u.to_vec(),
            n: A.n,
            m: A.m,
        })
    }
}

fn check_dimensions<T: FloatT>(
    P: &CscMatrixView<'_, T>,
    q: &[T],
    A: &CscMatrixView<'_, T>,
    l: &[T],
    u: &[T],
) -> Result<(), DataError> {
    let (m, n) = (A.m, A.n);

    if P.m != n || P.n != n || q.len() != n || l.len() != m || u.len() != m {
        return Err(DataError::IncompatibleDimension);
    }
    Ok(())
}
