#![allow(non_snake_case)]

use crate::algebra::*;
use std::iter::zip;

// All kernels operate on the borrowed view so that owned and
// borrowed matrices share a single implementation.

impl<T: FloatT> MatrixVectorMultiply for CscMatrix<T> {
    type T = T;

    fn gemv(&self, y: &mut [T], x: &[T], a: T, b: T) {
        _csc_axpby_N(&self.view(), y, x, a, b);
    }
}

impl<T: FloatT> MatrixVectorMultiply for CscMatrixView<'_, T> {
    type T = T;

    fn gemv(&self, y: &mut [T], x: &[T], a: T, b: T) {
        _csc_axpby_N(self, y, x, a, b);
    }
}

impl<T: FloatT> MatrixVectorMultiply for Adjoint<'_, CscMatrix<T>> {
    type T = T;

    fn gemv(&self, y: &mut [T], x: &[T], a: T, b: T) {
        _csc_axpby_T(&self.src.view(), y, x, a, b);
    }
}

impl<T: FloatT> MatrixVectorMultiply for Adjoint<'_, CscMatrixView<'_, T>> {
    type T = T;

    fn gemv(&self, y: &mut [T], x: &[T], a: T, b: T) {
        _csc_axpby_T(self.src, y, x, a, b);
    }
}

impl<T: FloatT> SymMatrixVectorMultiply for Symmetric<'_, CscMatrix<T>> {
    type T = T;

    fn symv(&self, y: &mut [T], x: &[T], a: T, b: T) {
        _csc_symv(&self.src.view(), y, x, a, b);
    }
}

impl<T: FloatT> SymMatrixVectorMultiply for Symmetric<'_, CscMatrixView<'_, T>> {
    type T = T;

    fn symv(&self, y: &mut [T], x: &[T], a: T, b: T) {
        _csc_symv(self.src, y, x, a, b);
    }
}

impl<T: FloatT> MatrixMath for CscMatrix<T> {
    type T = T;

    fn quad_form(&self, y: &[T], x: &[T]) -> T {
        _csc_quad_form(&self.view(), y, x)
    }
}

impl<'a, T: FloatT> CscMatrixView<'a, T> {
    /// transpose
    pub fn t(&self) -> Adjoint<'_, Self> {
        Adjoint { src: self }
    }

    /// symmetric view.  Only the upper triangle is used.
    pub fn sym(&self) -> Symmetric<'_, Self> {
        Symmetric { src: self }
    }

    /// Quadratic form `y^T*M*x` for triu `M = self`
    pub fn quad_form(&self, y: &[T], x: &[T]) -> T {
        _csc_quad_form(self, y, x)
    }
}

// y = b*y, with the common cases short-circuited
fn _scale_or_fill<T: FloatT>(y: &mut [T], b: T) {
    if b == T::zero() {
        y.fill(T::zero());
    } else if b != T::one() {
        y.iter_mut().for_each(|v| *v *= b);
    }
}

// y = a*A*x + b*y
fn _csc_axpby_N<T: FloatT>(A: &CscMatrixView<T>, y: &mut [T], x: &[T], a: T, b: T) {
    assert_eq!(x.len(), A.n);
    assert_eq!(y.len(), A.m);

    _scale_or_fill(y, b);
    if a == T::zero() {
        return;
    }

    for (col, &xj) in x.iter().enumerate() {
        let rng = A.colptr[col]..A.colptr[col + 1];
        let axj = a * xj;
        for (&row, &Aij) in zip(&A.rowval[rng.clone()], &A.nzval[rng]) {
            y[row] += Aij * axj;
        }
    }
}

// y = a*A'*x + b*y
fn _csc_axpby_T<T: FloatT>(A: &CscMatrixView<T>, y: &mut [T], x: &[T], a: T, b: T) {
    assert_eq!(x.len(), A.m);
    assert_eq!(y.len(), A.n);

    _scale_or_fill(y, b);
    if a == T::zero() {
        return;
    }

    for (col, yj) in y.iter_mut().enumerate() {
        let rng = A.colptr[col]..A.colptr[col + 1];
        let acc = zip(&A.rowval[rng.clone()], &A.nzval[rng])
            .fold(T::zero(), |acc, (&row, &Aij)| acc + Aij * x[row]);
        *yj += a * acc;
    }
}

// y = a*A*x + b*y for A symmetric, using the triu part of A only.
// Entries below the diagonal are ignored.
fn _csc_symv<T: FloatT>(A: &CscMatrixView<T>, y: &mut [T], x: &[T], a: T, b: T) {
    assert_eq!(A.n, A.m);
    assert_eq!(x.len(), A.n);
    assert_eq!(y.len(), A.n);

    _scale_or_fill(y, b);

    for (col, &xcol) in x.iter().enumerate() {
        let rng = A.colptr[col]..A.colptr[col + 1];
        for (&row, &Aij) in zip(&A.rowval[rng.clone()], &A.nzval[rng]) {
            if row > col {
                continue;
            }
            y[row] += a * Aij * xcol;
            if row != col {
                //don't double up on the diagonal
                y[col] += a * Aij * x[row];
            }
        }
    }
}

#[allow(clippy::comparison_chain)]
fn _csc_quad_form<T: FloatT>(M: &CscMatrixView<T>, y: &[T], x: &[T]) -> T {
    assert_eq!(M.n, M.m);
    assert_eq!(x.len(), M.n);
    assert_eq!(y.len(), M.n);

    let mut out = T::zero();

    for col in 0..M.n {
        let mut tmp1 = T::zero();
        let mut tmp2 = T::zero();

        let rng = M.colptr[col]..M.colptr[col + 1];

        for (&Mv, &row) in zip(&M.nzval[rng.clone()], &M.rowval[rng]) {
            if row < col {
                tmp1 += Mv * x[row];
                tmp2 += Mv * y[row];
            } else if row == col {
                out += Mv * x[col] * y[col];
            }
            // strictly lower triangular terms are ignored
        }
        out += tmp1 * y[col] + tmp2 * x[col];
    }
    out
}
