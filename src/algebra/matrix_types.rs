#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// All internal matrix representations in the polishing stage
// are in standard compressed sparse column format, as is the API.

/// Sparse matrix in standard Compressed Sparse Column (CSC) format
///
/// __Example usage__ : To construct the 3 x 3 matrix
/// ```text
/// A = [1.  3.  5.]
///     [2.  0.  6.]
///     [0.  4.  7.]
/// ```
///
/// ```
/// use qp_polish::algebra::CscMatrix;
///
/// let A : CscMatrix<f64> = CscMatrix::new(
///    3,                                // m
///    3,                                // n
///    vec![0, 2, 4, 7],                 //colptr
///    vec![0, 1, 0, 2, 0, 1, 2],        //rowval
///    vec![1., 2., 3., 4., 5., 6., 7.], //nzval
///  );
///
/// // optional correctness check
/// assert!(A.check_format().is_ok());
///
/// ```
///
/// A `CscMatrix` owns all three of its internal buffers, which are
/// released together when the matrix is dropped.  See [`CscMatrixView`]
/// for a matrix that borrows caller-owned buffers instead.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CscMatrix<T = f64> {
    /// number of rows
    pub m: usize,
    /// number of columns
    pub n: usize,
    /// CSC format column pointer.
    ///
    /// Ths field should have length `n+1`. The last entry corresponds
    /// to the the number of nonzeros and should agree with the lengths
    /// of the `rowval` and `nzval` fields.
    pub colptr: Vec<usize>,
    /// vector of row indices
    pub rowval: Vec<usize>,
    /// vector of non-zero matrix elements
    pub nzval: Vec<T>,
}

/// Sparse matrix in CSC format over borrowed data.
///
/// The view never releases the slices it wraps; they remain the
/// property of the caller for the lifetime `'a`.
///
/// ```
/// use qp_polish::algebra::*;
///
/// let colptr = [0, 1, 2];
/// let rowval = [0, 1];
/// let nzval = [2., 3.];
///
/// let A = CscMatrixView::new(2, 2, &colptr, &rowval, &nzval).unwrap();
/// assert_eq!(A.to_dense(DenseOrder::ColMajor), vec![2., 0., 0., 3.]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CscMatrixView<'a, T = f64> {
    /// number of rows
    pub m: usize,
    /// number of columns
    pub n: usize,
    /// borrowed CSC format column pointer (length `n+1`)
    pub colptr: &'a [usize],
    /// borrowed row indices
    pub rowval: &'a [usize],
    /// borrowed non-zero matrix elements
    pub nzval: &'a [T],
}

/// Sparse matrix in unordered triplet (coordinate) format.
///
/// Entries are held as parallel `(row, col, value)` arrays in the order
/// they were pushed.  Duplicate entries are permitted and are summed on
/// conversion to CSC or dense format.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TripletMatrix<T = f64> {
    /// number of rows
    pub m: usize,
    /// number of columns
    pub n: usize,
    /// row index of each entry
    pub rowval: Vec<usize>,
    /// column index of each entry
    pub colval: Vec<usize>,
    /// value of each entry
    pub nzval: Vec<T>,
}

/// Matrix orientation marker
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum MatrixShape {
    /// Normal matrix orientation
    N,
    /// Transposed matrix orientation
    T,
}

/// Matrix shape marker for triangular matrices
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum MatrixTriangle {
    /// Upper triangular matrix
    Triu,
    /// Lower triangular matrix
    Tril,
}

/// Element ordering for dense conversions
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum DenseOrder {
    /// element `(i,j)` is stored at `i*n + j`
    RowMajor,
    /// element `(i,j)` is stored at `i + j*m`
    ColMajor,
}

impl DenseOrder {
    #[inline]
    pub(crate) fn index(&self, (row, col): (usize, usize), (m, n): (usize, usize)) -> usize {
        match self {
            DenseOrder::RowMajor => row * n + col,
            DenseOrder::ColMajor => row + col * m,
        }
    }
}

/// Adjoint of a matrix
#[derive(Debug, Clone, Copy)]
pub struct Adjoint<'a, M> {
    pub src: &'a M,
}

/// Symmetric view of a matrix.  Only the upper triangle of the source is used.
#[derive(Debug, Clone, Copy)]
pub struct Symmetric<'a, M> {
    pub src: &'a M,
}
