#![allow(non_snake_case)]

use crate::algebra::*;

/// Builds the `mred × n` matrix of the active rows of `A`.
///
/// Row `j` of `A` becomes row `row_to_reduced[j]`, and rows mapped to
/// `None` are dropped.  The order of entries within each column is
/// preserved, so sorted columns remain sorted when the mapping is
/// increasing over the active rows.
pub fn reduced_constraint_matrix<T: FloatT>(
    A: &CscMatrix<T>,
    row_to_reduced: &[Option<usize>],
    mred: usize,
) -> Result<CscMatrix<T>, SparseFormatError> {
    if row_to_reduced.len() != A.m {
        return Err(SparseFormatError::IncompatibleDimension);
    }

    // count pass
    let nnz = A
        .rowval
        .iter()
        .filter(|&&row| row_to_reduced[row].is_some())
        .count();

    let mut Ared = CscMatrix::try_spalloc((mred, A.n), nnz)?;

    // fill pass
    let mut ptr = 0;
    for col in 0..A.n {
        Ared.colptr[col] = ptr;
        let rng = A.colptr[col]..A.colptr[col + 1];
        for (&row, &val) in A.rowval[rng.clone()].iter().zip(&A.nzval[rng]) {
            if let Some(k) = row_to_reduced[row] {
                Ared.rowval[ptr] = k;
                Ared.nzval[ptr] = val;
                ptr += 1;
            }
        }
    }
    Ared.colptr[A.n] = ptr;

    Ok(Ared)
}
