#![allow(non_snake_case)]

//---------------------------------------------------------
// low-level internal utilities for counting / filling entries
// in block partitioned sparse matrices.  Assembly proceeds in
// two sweeps: first colptr accumulates per-column counts, then
// colptr is used as the next write location in each column.
//---------------------------------------------------------

use crate::algebra::{CscMatrix, FloatT, MatrixShape};
use std::iter::zip;

impl<T> CscMatrix<T>
where
    T: FloatT,
{
    // increment self.colptr by the number of nonzeros in M
    // when M is placed with its first column at initcol
    pub(crate) fn colcount_block(&mut self, M: &CscMatrix<T>, initcol: usize, shape: MatrixShape) {
        match shape {
            MatrixShape::T => {
                for &row in &M.rowval {
                    self.colptr[initcol + row] += 1;
                }
            }
            MatrixShape::N => {
                for (c, w) in M.colptr.windows(2).enumerate() {
                    self.colptr[initcol + c] += w[1] - w[0];
                }
            }
        }
    }

    // increment self.colptr by 1 for each column of a
    // square diagonal block placed on the diagonal
    pub(crate) fn colcount_diag(&mut self, initcol: usize, blockcols: usize) {
        for c in &mut self.colptr[initcol..(initcol + blockcols)] {
            *c += 1;
        }
    }

    // as colcount_diag, but only counts columns where the square
    // triu matrix M has no diagonal entry
    pub(crate) fn colcount_missing_diag(&mut self, M: &CscMatrix<T>, initcol: usize) {
        assert!(self.colptr.len() >= M.n + initcol);

        for i in 0..M.n {
            if !M.has_diagonal_entry(i) {
                self.colptr[i + initcol] += 1;
            }
        }
    }

    // convert per-column counts in colptr to starting offsets
    pub(crate) fn colcount_to_colptr(&mut self) {
        let mut currentptr = 0;
        for p in &mut self.colptr {
            let count = *p;
            *p = currentptr;
            currentptr += count;
        }
    }

    // copy entries of M into self, with M's (0,0) entry placed at
    // (initrow, initcol), or its transpose if shape == T.  The
    // destination index of each entry of M is written to MtoKKT.
    pub(crate) fn fill_block(
        &mut self,
        M: &CscMatrix<T>,
        MtoKKT: &mut [usize],
        initrow: usize,
        initcol: usize,
        shape: MatrixShape,
    ) {
        assert_eq!(MtoKKT.len(), M.nnz());

        for i in 0..M.n {
            let rng = M.colptr[i]..M.colptr[i + 1];
            let entries = zip(&M.rowval[rng.clone()], &M.nzval[rng.clone()]);

            for (k, (&Mrow, &Mval)) in zip(rng, entries) {
                let (row, col) = match shape {
                    MatrixShape::T => (i + initrow, Mrow + initcol),
                    MatrixShape::N => (Mrow + initrow, i + initcol),
                };

                let dest = self.colptr[col];
                self.rowval[dest] = row;
                self.nzval[dest] = Mval;
                self.colptr[col] += 1;
                MtoKKT[k] = dest;
            }
        }
    }

    // place structural zeros on the diagonal of columns
    // offset..offset+blockdim, recording their locations
    pub(crate) fn fill_diag(&mut self, diagtoKKT: &mut [usize], offset: usize, blockdim: usize) {
        for (i, col) in (offset..(offset + blockdim)).enumerate() {
            let dest = self.colptr[col];
            self.rowval[dest] = col;
            self.nzval[dest] = T::zero(); //structural zero
            self.colptr[col] += 1;
            diagtoKKT[i] = dest;
        }
    }

    // as fill_diag, but only where the square triu matrix M has
    // no diagonal entry.  Locations are written to diagtoKKT for
    // the missing entries only; other slots are left untouched.
    pub(crate) fn fill_missing_diag(
        &mut self,
        M: &CscMatrix<T>,
        diagtoKKT: &mut [usize],
        initcol: usize,
    ) {
        for i in 0..M.n {
            if !M.has_diagonal_entry(i) {
                let col = i + initcol;
                let dest = self.colptr[col];
                self.rowval[dest] = col;
                self.nzval[dest] = T::zero(); //structural zero
                self.colptr[col] += 1;
                diagtoKKT[i] = dest;
            }
        }
    }

    // after filling, each colptr[i] points at the start of column
    // i+1.  Shift everything back one place.
    pub(crate) fn backshift_colptrs(&mut self) {
        self.colptr.rotate_right(1);
        self.colptr[0] = 0;
    }

    // true if the last entry in column i of a triu matrix is on the diagonal
    pub(crate) fn has_diagonal_entry(&self, i: usize) -> bool {
        let (first, last) = (self.colptr[i], self.colptr[i + 1]);
        first != last && self.rowval[last - 1] == i
    }
}

#[test]
fn test_missing_diag_counts() {
    // triu with an empty column 1 and missing diagonal in column 2
    let P = CscMatrix::new(3, 3, vec![0, 1, 1, 2], vec![0, 0], vec![1., 2.]);
    let mut K: CscMatrix<f64> = CscMatrix::spalloc((5, 5), 0);
    K.colptr.fill(0);
    K.colcount_missing_diag(&P, 2);
    assert_eq!(K.colptr, vec![0, 0, 0, 1, 1, 0]);
}
