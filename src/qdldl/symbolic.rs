#![allow(non_snake_case)]

// ordering, permutation and elimination tree computations.
// None of these look at numerical values except to move them.

use super::QDLDLError;
use crate::algebra::*;
use core::cmp::{max, min};

pub(super) const QDLDL_UNKNOWN: usize = usize::MAX;

/// Elimination tree of an upper triangular CSC matrix, with
/// the number of subdiagonal nonzeros in each column of L
pub(super) struct EliminationTree {
    pub parent: Vec<usize>,
    pub Lnz: Vec<usize>,
}

impl EliminationTree {
    pub fn new<T>(A: &CscMatrix<T>) -> Self {
        let n = A.n;
        let mut parent = vec![QDLDL_UNKNOWN; n];
        let mut Lnz = vec![0; n];
        let mut visited = vec![0; n];

        for j in 0..n {
            visited[j] = j;
            for &row in &A.rowval[A.colptr[j]..A.colptr[j + 1]] {
                // walk up the tree from each entry above the
                // diagonal until reaching a node seen for column j
                let mut i = row;
                while visited[i] != j {
                    if parent[i] == QDLDL_UNKNOWN {
                        parent[i] = j;
                    }
                    Lnz[i] += 1;
                    visited[i] = j;
                    i = parent[i];
                }
            }
        }
        Self { parent, Lnz }
    }

    // total nonzeros in L
    pub fn nnz_L(&self) -> usize {
        self.Lnz.iter().sum()
    }
}

// Construct an inverse permutation from a permutation
pub(super) fn invperm(p: &[usize]) -> Result<Vec<usize>, QDLDLError> {
    let mut b = vec![QDLDL_UNKNOWN; p.len()];

    for (i, &j) in p.iter().enumerate() {
        if j >= p.len() || b[j] != QDLDL_UNKNOWN {
            return Err(QDLDLError::InvalidPermutation);
        }
        b[j] = i;
    }
    Ok(b)
}

pub(super) fn amd_ordering<T: FloatT>(
    A: &CscMatrix<T>,
    amd_dense_scale: f64,
) -> Result<(Vec<usize>, Vec<usize>), QDLDLError> {
    // a dense scale above 1 works better for KKT systems
    let mut control = amd::Control::default();
    control.dense *= amd_dense_scale;
    let (perm, iperm, _info) = amd::order(A.n, &A.colptr, &A.rowval, &control)
        .map_err(|_| QDLDLError::OrderingFailed)?;
    Ok((perm, iperm))
}

// Given the upper triangle of a sparse symmetric matrix A, return the
// upper triangle of PAP' for the inverse permutation `iperm`.
// Entries below the diagonal of A are ignored.  Rows within each
// column of the result are not sorted, which the factorization
// does not require.
//
// following the book: Timothy Davis - Direct Methods for Sparse Linear Systems
pub(super) fn permute_symmetric<T: FloatT>(A: &CscMatrix<T>, iperm: &[usize]) -> CscMatrix<T> {
    let n = A.n;

    // count entries per column of PAP'.  An entry (r,c) of A lands
    // in column max(iperm[r], iperm[c]) of the permuted upper triangle
    let mut counts = vec![0usize; n + 1];
    for colA in 0..n {
        for &rowA in &A.rowval[A.colptr[colA]..A.colptr[colA + 1]] {
            if rowA <= colA {
                counts[max(iperm[rowA], iperm[colA]) + 1] += 1;
            }
        }
    }
    for c in 0..n {
        counts[c + 1] += counts[c];
    }

    let nnz = counts[n];
    let mut P = CscMatrix::spalloc((n, n), nnz);
    P.colptr.copy_from_slice(&counts);

    // counts[c] now tracks the next free slot in column c
    for colA in 0..n {
        let colP = iperm[colA];
        for k in A.colptr[colA]..A.colptr[colA + 1] {
            let rowA = A.rowval[k];
            if rowA > colA {
                continue;
            }
            let rowP = iperm[rowA];
            let dest_col = max(colP, rowP);
            let dest = counts[dest_col];

            P.rowval[dest] = min(colP, rowP);
            P.nzval[dest] = A.nzval[k];
            counts[dest_col] += 1;
        }
    }
    P
}
