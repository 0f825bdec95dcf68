#![allow(non_snake_case)]

use crate::algebra::{CscMatrix, DenseOrder, FloatT, SparseFormatError, TripletMatrix};
use std::iter::zip;

impl<T> TripletMatrix<T>
where
    T: FloatT,
{
    /// An empty `m x n` triplet matrix
    pub fn new(m: usize, n: usize) -> Self {
        Self {
            m,
            n,
            rowval: Vec::new(),
            colval: Vec::new(),
            nzval: Vec::new(),
        }
    }

    /// Builds a triplet matrix from parallel `(row, col, value)` arrays.
    pub fn try_new(
        m: usize,
        n: usize,
        rowval: Vec<usize>,
        colval: Vec<usize>,
        nzval: Vec<T>,
    ) -> Result<Self, SparseFormatError> {
        let M = Self {
            m,
            n,
            rowval,
            colval,
            nzval,
        };
        M.check_format()?;
        Ok(M)
    }

    /// number of stored entries, counting duplicates
    pub fn nnz(&self) -> usize {
        self.nzval.len()
    }

    /// Appends an entry.  Duplicates are permitted.
    ///
    /// # Panics
    /// Panics if the index is out of bounds.
    pub fn push(&mut self, row: usize, col: usize, val: T) {
        assert!(row < self.m && col < self.n);
        self.rowval.push(row);
        self.colval.push(col);
        self.nzval.push(val);
    }

    /// Check that array lengths agree and indices are in bounds
    pub fn check_format(&self) -> Result<(), SparseFormatError> {
        if self.rowval.len() != self.nzval.len() || self.colval.len() != self.nzval.len() {
            return Err(SparseFormatError::IncompatibleDimension);
        }
        if self.rowval.iter().any(|&r| r >= self.m) {
            return Err(SparseFormatError::BadRowval);
        }
        if self.colval.iter().any(|&c| c >= self.n) {
            return Err(SparseFormatError::BadColval);
        }
        Ok(())
    }

    /// Dense conversion.  Duplicate entries are summed.
    pub fn to_dense(&self, order: DenseOrder) -> Vec<T> {
        let mut out = vec![T::zero(); self.m * self.n];
        for ((&r, &c), &v) in zip(zip(&self.rowval, &self.colval), &self.nzval) {
            out[order.index((r, c), (self.m, self.n))] += v;
        }
        out
    }

    /// Compress to CSC format.  Rows within each column are sorted
    /// and duplicate entries are summed.
    pub fn to_csc(&self) -> Result<CscMatrix<T>, SparseFormatError> {
        self.check_format()?;

        // bucket entries by column, then sort by row within each column
        let mut colptr = vec![0usize; self.n + 1];
        for &c in &self.colval {
            colptr[c + 1] += 1;
        }
        for c in 0..self.n {
            colptr[c + 1] += colptr[c];
        }

        let mut next = colptr.clone();
        let mut perm = vec![0usize; self.nnz()];
        for (k, &c) in self.colval.iter().enumerate() {
            perm[next[c]] = k;
            next[c] += 1;
        }

        let mut out = CscMatrix::try_spalloc((self.m, self.n), self.nnz())?;
        let mut ptr = 0;
        for col in 0..self.n {
            out.colptr[col] = ptr;
            let bucket = &mut perm[colptr[col]..colptr[col + 1]];
            bucket.sort_by_key(|&k| self.rowval[k]);

            let mut lastrow = None;
            for &k in bucket.iter() {
                let row = self.rowval[k];
                if lastrow == Some(row) {
                    out.nzval[ptr - 1] += self.nzval[k];
                } else {
                    out.rowval[ptr] = row;
                    out.nzval[ptr] = self.nzval[k];
                    ptr += 1;
                    lastrow = Some(row);
                }
            }
        }
        out.colptr[self.n] = ptr;
        out.rowval.truncate(ptr);
        out.nzval.truncate(ptr);

        Ok(out)
    }
}

impl<T> From<&CscMatrix<T>> for TripletMatrix<T>
where
    T: FloatT,
{
    fn from(M: &CscMatrix<T>) -> Self {
        let mut colval = Vec::with_capacity(M.nnz());
        for (col, w) in M.colptr.windows(2).enumerate() {
            colval.extend(std::iter::repeat(col).take(w[1] - w[0]));
        }
        Self {
            m: M.m,
            n: M.n,
            rowval: M.rowval.clone(),
            colval,
            nzval: M.nzval.clone(),
        }
    }
}

#[test]
fn test_triplet_to_csc_duplicates() {
    let mut M: TripletMatrix<f64> = TripletMatrix::new(3, 2);
    M.push(2, 1, 1.);
    M.push(0, 1, 2.);
    M.push(2, 1, 3.);
    M.push(1, 0, 4.);

    let A = M.to_csc().unwrap();
    assert!(A.check_format().is_ok());
    assert_eq!(A.colptr, vec![0, 1, 3]);
    assert_eq!(A.rowval, vec![1, 0, 2]);
    assert_eq!(A.nzval, vec![4., 2., 4.]);
    assert_eq!(
        A.to_dense(DenseOrder::RowMajor),
        M.to_dense(DenseOrder::RowMajor)
    );
}

#[test]
fn test_triplet_bad_index() {
    let M = TripletMatrix::try_new(2, 2, vec![0, 1], vec![0, 2], vec![1., 1.]);
    assert_eq!(M, Err(SparseFormatError::BadColval));
}
