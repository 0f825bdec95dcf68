#![allow(non_snake_case)]

use super::core::check_dimensions;
use crate::algebra::{CscMatrix, CscMatrixView, DenseOrder, FloatT, MatrixShape, ShapedMatrix, SparseFormatError};

impl<'a, T> CscMatrixView<'a, T>
where
    T: FloatT,
{
    /// Wraps caller-owned CSC buffers without copying them.
    ///
    /// Only the array lengths are checked here.  Use
    /// [`check_format`](CscMatrixView::check_format) for a full check.
    pub fn new(
        m: usize,
        n: usize,
        colptr: &'a [usize],
        rowval: &'a [usize],
        nzval: &'a [T],
    ) -> Result<Self, SparseFormatError> {
        check_dimensions(n, colptr, rowval, nzval)?;
        Ok(Self {
            m,
            n,
            colptr,
            rowval,
            nzval,
        })
    }

    /// number of nonzeros
    pub fn nnz(&self) -> usize {
        self.colptr[self.n]
    }

    /// number of rows
    pub fn nrows(&self) -> usize {
        self.m
    }

    /// number of columns
    pub fn ncols(&self) -> usize {
        self.n
    }

    /// Check that matrix data is correctly formatted.
    pub fn check_format(&self) -> Result<(), SparseFormatError> {
        check_dimensions(self.n, self.colptr, self.rowval, self.nzval)?;

        if self.colptr[0] != 0 || self.colptr.windows(2).any(|c| c[0] > c[1]) {
            return Err(SparseFormatError::BadColptr);
        }

        if !self.rowval.iter().all(|&r| r < self.m) {
            return Err(SparseFormatError::BadRowval);
        }

        for col in 0..self.n {
            let rng = self.colptr[col]..self.colptr[col + 1];
            if self.rowval[rng].windows(2).any(|c| c[0] >= c[1]) {
                return Err(SparseFormatError::BadRowOrdering);
            }
        }

        Ok(())
    }

    /// Convert to a dense array of size `m*n`.  Stored duplicates are summed.
    pub fn to_dense(&self, order: DenseOrder) -> Vec<T> {
        let mut out = vec![T::zero(); self.m * self.n];
        for col in 0..self.n {
            for ptr in self.colptr[col]..self.colptr[col + 1] {
                let idx = order.index((self.rowval[ptr], col), (self.m, self.n));
                out[idx] += self.nzval[ptr];
            }
        }
        out
    }

    /// Copies the borrowed data into an owned matrix.
    pub fn to_owned(&self) -> CscMatrix<T> {
        CscMatrix {
            m: self.m,
            n: self.n,
            colptr: self.colptr.to_vec(),
            rowval: self.rowval.to_vec(),
            nzval: self.nzval.to_vec(),
        }
    }
}

impl<'a, T> From<&'a CscMatrix<T>> for CscMatrixView<'a, T>
where
    T: FloatT,
{
    fn from(M: &'a CscMatrix<T>) -> Self {
        M.view()
    }
}

impl<T> ShapedMatrix for CscMatrixView<'_, T> {
    fn nrows(&self) -> usize {
        self.m
    }
    fn ncols(&self) -> usize {
        self.n
    }
    fn shape(&self) -> MatrixShape {
        MatrixShape::N
    }
}

#[test]
fn test_view_check_format() {
    let colptr = [0, 2, 3];
    let rowval = [1, 0, 1];
    let nzval = [1., 2., 3.];
    let A = CscMatrixView::new(2, 2, &colptr, &rowval, &nzval).unwrap();
    assert_eq!(A.check_format(), Err(SparseFormatError::BadRowOrdering));

    let rowval = [0, 2, 1];
    let A = CscMatrixView::new(2, 2, &colptr, &rowval, &nzval).unwrap();
    assert_eq!(A.check_format(), Err(SparseFormatError::BadRowval));

    let colptr = [0, 3, 2];
    assert_eq!(
        CscMatrixView::new(2, 2, &colptr, &rowval, &nzval),
        Err(SparseFormatError::IncompatibleDimension)
    );
}

#[test]
fn test_view_to_owned() {
    let A = CscMatrix::from(&[[1., 0.], [2., 4.]]);
    let B = A.view().to_owned();
    assert_eq!(A, B);
    assert_eq!(A.view().nnz(), 3);
}
