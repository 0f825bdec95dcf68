#![allow(non_snake_case)]

//! Quasidefinite $LDL^T$ factorization.
//!
//! Factors a symmetric quasidefinite matrix, supplied as its upper
//! triangle in CSC format, after a fill-reducing symmetric permutation.
//! Pivots are safeguarded by a sign-aware dynamic regularization so
//! that matrices of the form `[[P + δI, Aᵀ], [A, -δI]]` factor without
//! a zero pivot.

use crate::algebra::*;
use derive_builder::Builder;
use thiserror::Error;

mod numeric;
mod symbolic;
mod triangular;

use numeric::*;
use symbolic::*;
use triangular::*;

/// Error codes returnable from [`QDLDLFactorisation`](QDLDLFactorisation) factor operations

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QDLDLError {
    #[error("Matrix dimension fields are incompatible")]
    IncompatibleDimension,
    #[error("Matrix has a zero column")]
    EmptyColumn,
    #[error("Matrix is not upper triangular")]
    NotUpperTriangular,
    #[error("Matrix factorization produced a zero pivot")]
    ZeroPivot,
    #[error("Invalid permutation vector")]
    InvalidPermutation,
    #[error("Fill-reducing ordering could not be computed")]
    OrderingFailed,
}

/// Required settings for [`QDLDLFactorisation`](QDLDLFactorisation)

#[derive(Builder, Debug, Clone)]
pub struct QDLDLSettings<T: FloatT> {
    /// scaling of the AMD dense row threshold
    #[builder(default = "1.0")]
    pub amd_dense_scale: f64,
    /// user-supplied ordering.  AMD is used if `None`
    #[builder(default = "None", setter(strip_option))]
    pub perm: Option<Vec<usize>>,
    /// expected signs of the pivots, all positive if `None`
    #[builder(default = "None", setter(strip_option))]
    pub Dsigns: Option<Vec<i8>>,
    #[builder(default = "true")]
    pub regularize_enable: bool,
    #[builder(default = "(1e-12).as_T()")]
    pub regularize_eps: T,
    #[builder(default = "(1e-7).as_T()")]
    pub regularize_delta: T,
}

impl<T> Default for QDLDLSettings<T>
where
    T: FloatT,
{
    fn default() -> QDLDLSettings<T> {
        QDLDLSettingsBuilder::<T>::default().build().unwrap()
    }
}

/// Performs $LDL^T$ factorization of a symmetric quasidefinite matrix

#[derive(Debug)]
pub struct QDLDLFactorisation<T = f64> {
    // permutation vector and its inverse
    perm: Vec<usize>,
    iperm: Vec<usize>,
    // strictly lower triangular factor
    L: CscMatrix<T>,
    // D and is inverse for PAP' = LDL^T
    D: Vec<T>,
    Dinv: Vec<T>,
    // permuted rhs / solution buffer
    work: Vec<T>,
    // number of positive values in D
    positive_inertia: usize,
    // number of pivots replaced by dynamic regularization
    regularize_count: usize,
}

impl<T> QDLDLFactorisation<T>
where
    T: FloatT,
{
    /// Factors the upper triangular matrix `Ain`.
    pub fn new(
        Ain: &CscMatrix<T>,
        opts: Option<QDLDLSettings<T>>,
    ) -> Result<QDLDLFactorisation<T>, QDLDLError> {
        check_structure(Ain)?;

        let opts = opts.unwrap_or_default();
        let n = Ain.n;

        let (perm, iperm) = match opts.perm {
            Some(perm) => {
                let iperm = invperm(&perm)?;
                (perm, iperm)
            }
            None => amd_ordering(Ain, opts.amd_dense_scale)?,
        };

        // permuted upper triangle, and pivot signs in the same order
        let PAPt = permute_symmetric(Ain, &iperm);

        let mut Dsigns = vec![1_i8; n];
        if let Some(ds) = opts.Dsigns {
            if ds.len() != n {
                return Err(QDLDLError::IncompatibleDimension);
            }
            permute(&mut Dsigns, &ds, &perm);
        }

        let etree = EliminationTree::new(&PAPt);
        let mut L = CscMatrix::spalloc((n, n), etree.nnz_L());
        let mut D = vec![T::zero(); n];
        let mut Dinv = vec![T::zero(); n];

        let reg = DynamicRegularization {
            enable: opts.regularize_enable,
            eps: opts.regularize_eps,
            delta: opts.regularize_delta,
            signs: &Dsigns,
        };

        let stats = NumericFactor::new(n).factor(&PAPt, &etree, &reg, &mut L, &mut D, &mut Dinv)?;

        Ok(QDLDLFactorisation {
            perm,
            iperm,
            L,
            D,
            Dinv,
            work: vec![T::zero(); n],
            positive_inertia: stats.positive_inertia,
            regularize_count: stats.regularize_count,
        })
    }

    /// dimension of the factored matrix
    pub fn n(&self) -> usize {
        self.D.len()
    }

    /// number of positive pivots
    pub fn positive_inertia(&self) -> usize {
        self.positive_inertia
    }

    /// number of pivots replaced by the dynamic regularization
    pub fn regularize_count(&self) -> usize {
        self.regularize_count
    }

    /// the fill-reducing permutation and its inverse
    pub fn ordering(&self) -> (&[usize], &[usize]) {
        (&self.perm, &self.iperm)
    }

    /// Solves `Ax = b` using the LDL factors, with `x` replacing `b`.
    ///
    /// # Panics
    /// Panics if `b` has the wrong length.
    pub fn solve(&mut self, b: &mut [T]) {
        assert_eq!(b.len(), self.D.len());

        let tmp = &mut self.work;
        permute(tmp, b, &self.perm);
        ldl_solve(&self.L.colptr, &self.L.rowval, &self.L.nzval, &self.Dinv, tmp);
        ipermute(b, tmp, &self.perm);
    }
}

fn check_structure<T: FloatT>(A: &CscMatrix<T>) -> Result<(), QDLDLError> {
    if !A.is_square() || A.colptr.len() != A.n + 1 {
        return Err(QDLDLError::IncompatibleDimension);
    }

    if !A.is_triu() {
        return Err(QDLDLError::NotUpperTriangular);
    }

    if A.colptr.windows(2).any(|c| c[0] >= c[1]) {
        return Err(QDLDLError::EmptyColumn);
    }

    Ok(())
}
