#![allow(non_snake_case)]

use crate::algebra::{
    Adjoint, CscMatrix, CscMatrixView, DenseOrder, FloatT, MatrixShape, ShapedMatrix,
    SparseFormatError, Symmetric,
};

impl<T> CscMatrix<T>
where
    T: FloatT,
{
    /// `CscMatrix` constructor.
    ///
    /// # Panics
    /// Makes rudimentary dimensional compatibility checks and panics on
    /// failure.   This constructor does __not__
    /// ensure that rows indices are all in bounds or that data is arranged
    /// such that entries within each column appear in order of increasing
    /// row index.   Responsibility for ensuring these conditions hold
    /// is left to the caller.   Use [`try_new`](CscMatrix::try_new) for
    /// a non-panicking version.
    ///

    pub fn new(m: usize, n: usize, colptr: Vec<usize>, rowval: Vec<usize>, nzval: Vec<T>) -> Self {
        assert_eq!(rowval.len(), nzval.len());
        assert_eq!(colptr.len(), n + 1);
        assert_eq!(colptr[n], rowval.len());
        CscMatrix {
            m,
            n,
            colptr,
            rowval,
            nzval,
        }
    }

    /// Fallible `CscMatrix` constructor.
    ///
    /// Returns an error rather than panicking if the array lengths are
    /// incompatible with each other or with the stated dimensions.
    pub fn try_new(
        m: usize,
        n: usize,
        colptr: Vec<usize>,
        rowval: Vec<usize>,
        nzval: Vec<T>,
    ) -> Result<Self, SparseFormatError> {
        check_dimensions(n, &colptr, &rowval, &nzval)?;
        Ok(CscMatrix {
            m,
            n,
            colptr,
            rowval,
            nzval,
        })
    }

    /// allocate space for a sparse matrix with `nnz` elements
    ///
    /// To make an m x n matrix of zeros, use
    /// ```
    /// # use qp_polish::algebra::CscMatrix;
    /// # let m = 3;
    /// # let n = 4;
    /// let A : CscMatrix<f64> = CscMatrix::spalloc((m,n),0);
    /// ```

    pub fn spalloc(size: (usize, usize), nnz: usize) -> Self {
        let (m, n) = size;
        let mut colptr = vec![0; n + 1];
        let rowval = vec![0; nnz];
        let nzval = vec![T::zero(); nnz];
        colptr[n] = nnz;

        CscMatrix::new(m, n, colptr, rowval, nzval)
    }

    /// allocate space for a sparse matrix with `nnz` elements, returning
    /// [`SparseFormatError::OutOfMemory`] if storage can't be reserved.
    pub fn try_spalloc(size: (usize, usize), nnz: usize) -> Result<Self, SparseFormatError> {
        let (m, n) = size;
        let colptr = try_filled(n + 1, 0usize, nnz)?;
        let rowval = try_filled(nnz, 0usize, nnz)?;
        let nzval = try_filled(nnz, T::zero(), nnz)?;

        let mut A = CscMatrix {
            m,
            n,
            colptr,
            rowval,
            nzval,
        };
        A.colptr[n] = nnz;
        Ok(A)
    }

    /// Identity matrix of size `n`
    pub fn identity(n: usize) -> Self {
        let colptr = (0usize..=n).collect();
        let rowval = (0usize..n).collect();
        let nzval = vec![T::one(); n];

        CscMatrix::new(n, n, colptr, rowval, nzval)
    }

    /// number of rows
    pub fn nrows(&self) -> usize {
        self.m
    }
    /// number of columns
    pub fn ncols(&self) -> usize {
        self.n
    }
    /// dimensions as `(m, n)`
    pub fn size(&self) -> (usize, usize) {
        (self.m, self.n)
    }
    /// true if `self.nrows() == self.ncols()`
    pub fn is_square(&self) -> bool {
        self.m == self.n
    }

    /// number of nonzeros
    pub fn nnz(&self) -> usize {
        self.colptr[self.n]
    }

    /// transpose
    pub fn t(&self) -> Adjoint<'_, Self> {
        Adjoint { src: self }
    }

    /// symmetric view
    pub fn sym(&self) -> Symmetric<'_, Self> {
        debug_assert!(self.is_triu());
        Symmetric { src: self }
    }

    /// borrowed view of the matrix data
    pub fn view(&self) -> CscMatrixView<'_, T> {
        CscMatrixView {
            m: self.m,
            n: self.n,
            colptr: &self.colptr,
            rowval: &self.rowval,
            nzval: &self.nzval,
        }
    }

    /// Check that matrix data is correctly formatted.
    pub fn check_format(&self) -> Result<(), SparseFormatError> {
        self.view().check_format()
    }

    /// Convert to a dense array of size `m*n` in the requested order.
    /// Entries that are not stored are zero.
    pub fn to_dense(&self, order: DenseOrder) -> Vec<T> {
        self.view().to_dense(order)
    }

    /// Allocates a new matrix containing only entries from the upper triangular part
    pub fn to_triu(&self) -> Self {
        assert_eq!(self.m, self.n);
        let (m, n) = (self.m, self.n);
        let mut colptr = vec![0; n + 1];
        let mut nnz = 0;

        //count the number of entries in the upper triangle
        //and place the totals into colptr

        for col in 0..n {
            let rows = &self.rowval[self.colptr[col]..self.colptr[col + 1]];
            colptr[col + 1] = rows.iter().filter(|&row| *row <= col).count();
            nnz += colptr[col + 1];
        }

        //allocate and copy the upper triangle entries of
        //each column into the new value vector.  Rows need not
        //be ordered within the source columns.
        let mut rowval = Vec::with_capacity(nnz);
        let mut nzval = Vec::with_capacity(nnz);

        for col in 0..n {
            let rng = self.colptr[col]..self.colptr[col + 1];
            for (&row, &val) in self.rowval[rng.clone()].iter().zip(&self.nzval[rng]) {
                if row <= col {
                    rowval.push(row);
                    nzval.push(val);
                }
            }
            colptr[col + 1] = rowval.len();
        }
        CscMatrix::new(m, n, colptr, rowval, nzval)
    }

    /// True if the matrix is upper triangular
    pub fn is_triu(&self) -> bool {
        // check lower triangle for any structural entries, regardless
        // of the values that may be assigned to them
        (0..self.n).all(|col| {
            let rows = &self.rowval[self.colptr[col]..self.colptr[col + 1]];
            rows.iter().all(|&row| row <= col)
        })
    }

    /// Returns the value at the given (row,col) index as an Option.
    /// Returns None if the given index is not a structural nonzero.
    ///
    /// # Panics
    /// Panics if the given index is out of bounds.
    pub(crate) fn get_entry(&self, idx: (usize, usize)) -> Option<T> {
        let (row, col) = idx;
        assert!(row < self.m && col < self.n);

        let first = self.colptr[col];
        let last = self.colptr[col + 1];
        self.rowval[first..last]
            .iter()
            .position(|&r| r == row)
            .map(|k| self.nzval[first + k])
    }
}

impl<T> ShapedMatrix for CscMatrix<T> {
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

/// Builds a CSC matrix from a dense 2D array, dropping zeros.
/// Mostly useful for writing tests.
impl<const M: usize, const N: usize, T> From<&[[T; N]; M]> for CscMatrix<T>
where
    T: FloatT,
{
    fn from(rows: &[[T; N]; M]) -> Self {
        let mut colptr = Vec::with_capacity(N + 1);
        let mut rowval = Vec::new();
        let mut nzval = Vec::new();

        colptr.push(0);
        for col in 0..N {
            for (row, rowdata) in rows.iter().enumerate() {
                let v = rowdata[col];
                if v != T::zero() {
                    rowval.push(row);
                    nzval.push(v);
                }
            }
            colptr.push(rowval.len());
        }
        CscMatrix::new(M, N, colptr, rowval, nzval)
    }
}

// ---------------------------------------------------------
// internal helpers shared with the borrowed view
// ---------------------------------------------------------

pub(crate) fn check_dimensions<T>(
    n: usize,
    colptr: &[usize],
    rowval: &[usize],
    nzval: &[T],
) -> Result<(), SparseFormatError> {
    if rowval.len() != nzval.len()
        || colptr.len() != n + 1
        || colptr[n] != rowval.len()
    {
        return Err(SparseFormatError::IncompatibleDimension);
    }
    Ok(())
}

fn try_filled<V: Clone>(len: usize, v: V, nnz: usize) -> Result<Vec<V>, SparseFormatError> {
    let mut out = Vec::new();
    out.try_reserve_exact(len)
        .map_err(|_| SparseFormatError::OutOfMemory(nnz))?;
    out.resize(len, v);
    Ok(out)
}
