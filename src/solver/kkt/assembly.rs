#![allow(non_snake_case)]

use crate::algebra::*;

/// Assembles the upper triangle of `[[P + δ_P I, Aᵀ], [A, -δ_A I]]`.
///
/// Every diagonal entry is structurally present, including those
/// missing from `P`.
pub(crate) fn assemble_kkt_matrix<T: FloatT>(
    P: &CscMatrix<T>,
    A: &CscMatrix<T>,
    (δp, δa): (T, T),
) -> Result<CscMatrix<T>, SparseFormatError> {
    let (m, n) = A.size();
    if P.size() != (n, n) {
        return Err(SparseFormatError::IncompatibleDimension);
    }

    let nnz_diagP = (0..n).filter(|&i| P.has_diagonal_entry(i)).count();

    let nnzKKT = P.nnz() +      // Number of elements in P
    n -                         // Number of elements in diagonal top left block
    nnz_diagP +                 // remove double count on the diagonal if P has entries
    A.nnz() +                   // Number of nonzeros in A
    m; // Number of elements in diagonal below A'

    let mut K = CscMatrix::<T>::try_spalloc((m + n, m + n), nnzKKT)?;

    // use K.p to hold nnz entries in each
    // column of the KKT matrix
    K.colptr.fill(0);
    K.colcount_block(P, 0, MatrixShape::N);
    K.colcount_missing_diag(P, 0);
    K.colcount_block(A, n, MatrixShape::T);
    K.colcount_diag(n, m);

    // cumsum total entries to convert to K.p
    K.colcount_to_colptr();

    let mut Pmap = vec![0; P.nnz()];
    let mut Amap = vec![0; A.nnz()];
    let mut Dmap = vec![0; m];
    let mut Pdiag = vec![0; n];

    K.fill_block(P, &mut Pmap, 0, 0, MatrixShape::N);
    K.fill_missing_diag(P, &mut Pdiag, 0); // after adding P, since triu form
    K.fill_block(A, &mut Amap, 0, n, MatrixShape::T);
    K.fill_diag(&mut Dmap, n, m);

    // backshift the colptrs to recover K.p again
    K.backshift_colptrs();

    // matrix is triu, so diagonal is last in each column
    for j in 0..(n + m) {
        let d = K.colptr[j + 1] - 1;
        if j < n {
            K.nzval[d] += δp;
        } else {
            K.nzval[d] = -δa;
        }
    }

    Ok(K)
}

#[test]
fn test_kkt_assembly() {
    // P has an empty column 1 and a missing diagonal in column 2
    let P = CscMatrix::new(3, 3, vec![0, 1, 1, 2], vec![0, 0], vec![1., 4.]);
    let A = CscMatrix::from(&[
        [7., 0., 8.], //
        [0., 9., 10.],
    ]);

    let K = assemble_kkt_matrix(&P, &A, (0.5, 0.25)).unwrap();

    let Ktrue = CscMatrix::from(&[
        [1.5, 0., 4., 7., 0.],    //
        [0., 0.5, 0., 0., 9.],    //
        [0., 0., 0.5, 8., 10.],   //
        [0., 0., 0., -0.25, 0.],  //
        [0., 0., 0., 0., -0.25],  //
    ]);

    assert!(K.check_format().is_ok());
    assert!(K.is_triu());
    assert_eq!(K.to_dense(DenseOrder::ColMajor), Ktrue.to_dense(DenseOrder::ColMajor));
    assert_eq!(K.nnz(), 2 + 2 + 4 + 2);

    // diagonal is the last entry of every column
    for i in 0..5 {
        assert_eq!(K.rowval[K.colptr[i + 1] - 1], i);
    }
}

#[test]
fn test_kkt_assembly_no_constraints() {
    let P = CscMatrix::from(&[[2., 1.], [0., 3.]]);
    let A = CscMatrix::<f64>::spalloc((0, 2), 0);

    let K = assemble_kkt_matrix(&P, &A, (1.0, 1.0)).unwrap();
    assert_eq!(K.size(), (2, 2));
    assert_eq!(K.to_dense(DenseOrder::RowMajor), vec![3., 1., 0., 4.]);
    assert_eq!(K.colptr, vec![0, 1, 3]);
}

#[test]
fn test_kkt_assembly_bad_dims() {
    let P = CscMatrix::<f64>::identity(3);
    let A = CscMatrix::<f64>::identity(2);
    assert_eq!(
        assemble_kkt_matrix(&P, &A, (1.0, 1.0)).unwrap_err(),
        SparseFormatError::IncompatibleDimension
    );
}
