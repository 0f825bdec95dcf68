#![allow(non_snake_case)]
#![allow(clippy::type_complexity)]
use qp_polish::{algebra::*, solver::*};

// a collection of tests to ensure that data of
// incompatible dimension won't be accepted

fn api_dim_check_data() -> (CscMatrix<f64>, Vec<f64>, CscMatrix<f64>, Vec<f64>, Vec<f64>) {
    let P = CscMatrix::<f64>::spalloc((4, 4), 0);
    let q = vec![0.; 4];
    let A = CscMatrix::<f64>::spalloc((6, 4), 0);
    let l = vec![-1.; 6];
    let u = vec![1.; 6];
    (P, q, A, l, u)
}

fn new_workspace(
    P: &CscMatrix<f64>,
    q: &[f64],
    A: &CscMatrix<f64>,
    l: &[f64],
    u: &[f64],
) -> Result<Workspace<f64>, DataError> {
    Workspace::new(P, q, A, l, u, PolishSettings::default())
}

#[test]
fn api_dim_check_working() {
    // This example should work because dimensions are
    // all compatible.  All following checks vary one
    // of these sizes to test dimension checks

    let (P, q, A, l, u) = api_dim_check_data();
    let ws = new_workspace(&P, &q, &A, &l, &u).unwrap();
    assert_eq!((ws.n(), ws.m()), (4, 6));
}

#[test]
fn api_dim_check_bad_P() {
    let (_P, q, A, l, u) = api_dim_check_data();
    let P = CscMatrix::<f64>::spalloc((3, 3), 0);

    assert_eq!(
        new_workspace(&P, &q, &A, &l, &u).unwrap_err(),
        DataError::IncompatibleDimension
    );
}

#[test]
fn api_dim_check_nonsquare_P() {
    let (_P, q, A, l, u) = api_dim_check_data();
    let P = CscMatrix::<f64>::spalloc((5, 4), 0);

    assert_eq!(
        new_workspace(&P, &q, &A, &l, &u).unwrap_err(),
        DataError::IncompatibleDimension
    );
}

#[test]
fn api_dim_check_bad_A_cols() {
    let (P, q, _A, l, u) = api_dim_check_data();
    let A = CscMatrix::<f64>::spalloc((6, 3), 0);

    assert_eq!(
        new_workspace(&P, &q, &A, &l, &u).unwrap_err(),
        DataError::IncompatibleDimension
    );
}

#[test]
fn api_dim_check_bad_q() {
    let (P, _q, A, l, u) = api_dim_check_data();
    let q = vec![0.; 5];

    assert_eq!(
        new_workspace(&P, &q, &A, &l, &u).unwrap_err(),
        DataError::IncompatibleDimension
    );
}

#[test]
fn api_dim_check_bad_bounds() {
    let (P, q, A, l, u) = api_dim_check_data();

    assert_eq!(
        new_workspace(&P, &q, &A, &l[..5], &u).unwrap_err(),
        DataError::IncompatibleDimension
    );
    assert_eq!(
        new_workspace(&P, &q, &A, &l, &[u.as_slice(), &[1.]].concat()).unwrap_err(),
        DataError::IncompatibleDimension
    );
}

#[test]
fn api_check_infeasible_bounds() {
    let (P, q, A, mut l, u) = api_dim_check_data();
    l[3] = 2.;

    assert_eq!(
        new_workspace(&P, &q, &A, &l, &u).unwrap_err(),
        DataError::InfeasibleBounds(3)
    );
}

#[test]
fn api_check_bad_format() {
    let (P, q, _A, l, u) = api_dim_check_data();

    // rows out of order in column 0
    let A = CscMatrix::new(6, 4, vec![0, 2, 2, 2, 2], vec![3, 1], vec![1., 1.]);
    assert_eq!(
        new_workspace(&P, &q, &A, &l, &u).unwrap_err(),
        DataError::BadFormat(SparseFormatError::BadRowOrdering)
    );

    // row index out of range
    let A = CscMatrix::new(6, 4, vec![0, 1, 1, 1, 1], vec![6], vec![1.]);
    assert_eq!(
        new_workspace(&P, &q, &A, &l, &u).unwrap_err(),
        DataError::BadFormat(SparseFormatError::BadRowval)
    );
}

#[test]
fn api_check_borrowed_data() {
    // problem data supplied as views over caller buffers
    let colptr = [0, 1, 2];
    let rowval = [0, 1];
    let nzval = [1., 1.];
    let P = CscMatrixView::new(2, 2, &colptr, &rowval, &nzval).unwrap();
    let A = CscMatrixView::new(2, 2, &colptr, &rowval, &nzval).unwrap();

    let ws = Workspace::new(P, &[0., 0.], A, &[0., 0.], &[1., 1.], PolishSettings::default());
    assert!(ws.is_ok());

    // the caller's buffers are untouched and still usable
    assert_eq!(P.to_dense(DenseOrder::RowMajor), vec![1., 0., 0., 1.]);
}

#[test]
fn api_check_full_P_is_reduced_to_triu() {
    let P = CscMatrix::from(&[
        [2., 1.], //
        [1., 2.], //
    ]);
    let A = CscMatrix::<f64>::identity(2);
    let ws = new_workspace(&P, &[0., 0.], &A, &[0., 0.], &[1., 1.]).unwrap();

    assert!(ws.data.P.is_triu());
    assert_eq!(ws.data.P.nnz(), 3);
}

#[test]
fn api_dim_check_setters() {
    let (P, q, A, l, u) = api_dim_check_data();
    let mut ws = new_workspace(&P, &q, &A, &l, &u).unwrap();

    assert!(ws.set_iterate(&[0.; 10], &[0.; 6]).is_ok());
    assert_eq!(
        ws.set_iterate(&[0.; 9], &[0.; 6]),
        Err(DataError::IncompatibleDimension)
    );
    assert_eq!(
        ws.set_iterate(&[0.; 10], &[0.; 7]),
        Err(DataError::IncompatibleDimension)
    );

    assert!(ws.set_best(&[0.; 4], &[0.; 6], 1., 1., 0.).is_ok());
    assert_eq!(
        ws.set_best(&[0.; 6], &[0.; 4], 1., 1., 0.),
        Err(DataError::IncompatibleDimension)
    );
}
