#![allow(non_snake_case)]

use super::symbolic::{EliminationTree, QDLDL_UNKNOWN};
use super::QDLDLError;
use crate::algebra::*;

/// Sign-aware pivot safeguard.  A pivot `d` with `d*sign < eps`
/// is replaced by `delta*sign`.
pub(super) struct DynamicRegularization<'a, T> {
    pub enable: bool,
    pub eps: T,
    pub delta: T,
    pub signs: &'a [i8],
}

impl<T: FloatT> DynamicRegularization<'_, T> {
    // returns the (possibly replaced) pivot and whether it was replaced
    fn apply(&self, k: usize, d: T) -> (T, bool) {
        if !self.enable {
            return (d, false);
        }
        let sign = if self.signs[k] < 0 { -T::one() } else { T::one() };
        if d * sign < self.eps {
            (self.delta * sign, true)
        } else {
            (d, false)
        }
    }
}

pub(super) struct FactorStats {
    pub positive_inertia: usize,
    pub regularize_count: usize,
}

/// Working memory for one numeric factorization
pub(super) struct NumericFactor<T> {
    // marks entries of the current row of L already reached
    y_markers: Vec<bool>,
    // nonzero pattern of the current row of L, in elimination order
    y_idx: Vec<usize>,
    // scratch list for walking up the elimination tree
    elim_buffer: Vec<usize>,
    // next free slot in each column of L
    next_colspace: Vec<usize>,
    // dense accumulator for the current row
    y_vals: Vec<T>,
}

impl<T: FloatT> NumericFactor<T> {
    pub fn new(n: usize) -> Self {
        Self {
            y_markers: vec![false; n],
            y_idx: vec![0; n],
            elim_buffer: vec![0; n],
            next_colspace: vec![0; n],
            y_vals: vec![T::zero(); n],
        }
    }

    /// Up-looking factorization of the upper triangular `A` into
    /// `L`, `D` and `Dinv`.  `L` must be allocated to the size
    /// reported by the elimination tree.
    pub fn factor(
        &mut self,
        A: &CscMatrix<T>,
        etree: &EliminationTree,
        reg: &DynamicRegularization<T>,
        L: &mut CscMatrix<T>,
        D: &mut [T],
        Dinv: &mut [T],
    ) -> Result<FactorStats, QDLDLError> {
        let n = A.n;
        let mut stats = FactorStats {
            positive_inertia: 0,
            regularize_count: 0,
        };

        // L.colptr is the cumsum of the column counts
        L.colptr[0] = 0;
        for k in 0..n {
            L.colptr[k + 1] = L.colptr[k] + etree.Lnz[k];
        }
        self.next_colspace.copy_from_slice(&L.colptr[0..n]);
        self.y_markers.fill(false);
        self.y_vals.fill(T::zero());
        D.fill(T::zero());

        for k in 0..n {
            // Row k of L solves L(0:k,0:k) y = A(0:k,k), with the
            // diagonal entry of A(:,k) seeding D[k].  First find the
            // nonzero pattern of y by walking the elimination tree.
            let nnz_y = self.row_pattern(A, etree, k, D);

            // then compute the values, in reverse topological order
            for i in (0..nnz_y).rev() {
                let cidx = self.y_idx[i];
                let tmp_idx = self.next_colspace[cidx];
                let y_cidx = self.y_vals[cidx];

                for j in L.colptr[cidx]..tmp_idx {
                    self.y_vals[L.rowval[j]] -= L.nzval[j] * y_cidx;
                }

                L.nzval[tmp_idx] = y_cidx * Dinv[cidx];
                L.rowval[tmp_idx] = k;
                D[k] -= y_cidx * L.nzval[tmp_idx];
                self.next_colspace[cidx] += 1;

                self.y_vals[cidx] = T::zero();
                self.y_markers[cidx] = false;
            }

            let (d, replaced) = reg.apply(k, D[k]);
            D[k] = d;
            if replaced {
                stats.regularize_count += 1;
            }

            if D[k] == T::zero() || !D[k].is_finite() {
                return Err(QDLDLError::ZeroPivot);
            }
            if D[k] > T::zero() {
                stats.positive_inertia += 1;
            }
            Dinv[k] = T::recip(D[k]);
        }

        Ok(stats)
    }

    // Scatters column k of A into y_vals and D[k], and writes the
    // nonzero pattern of row k of L into y_idx.  Returns its length.
    fn row_pattern(&mut self, A: &CscMatrix<T>, etree: &EliminationTree, k: usize, D: &mut [T]) -> usize {
        let mut nnz_y = 0;

        for p in A.colptr[k]..A.colptr[k + 1] {
            let bidx = A.rowval[p];

            if bidx == k {
                D[k] = A.nzval[p];
                continue;
            }
            self.y_vals[bidx] = A.nzval[p];

            if self.y_markers[bidx] {
                continue;
            }

            // collect the unvisited path from bidx towards the root,
            // stopping at row k or at a node already on the pattern
            self.y_markers[bidx] = true;
            self.elim_buffer[0] = bidx;
            let mut nnz_e = 1;

            let mut next = etree.parent[bidx];
            while next != QDLDL_UNKNOWN && next < k && !self.y_markers[next] {
                self.y_markers[next] = true;
                self.elim_buffer[nnz_e] = next;
                next = etree.parent[next];
                nnz_e += 1;
            }

            // append the path in reverse
            for &e in self.elim_buffer[..nnz_e].iter().rev() {
                self.y_idx[nnz_y] = e;
                nnz_y += 1;
            }
        }
        nnz_y
    }
}
