#![allow(non_snake_case)]

// triangular solves with the unit lower triangular factor,
// plus allocation free permutation of vectors

use crate::algebra::*;
use std::iter::zip;

// Solves (L+I)x = b, with x replacing b
pub(super) fn lsolve<T: FloatT>(Lp: &[usize], Li: &[usize], Lx: &[T], x: &mut [T]) {
    for i in 0..x.len() {
        let xi = x[i];
        let rng = Lp[i]..Lp[i + 1];
        for (&Lij, &Lxj) in zip(&Li[rng.clone()], &Lx[rng]) {
            x[Lij] -= Lxj * xi;
        }
    }
}

// Solves (L+I)'x = b, with x replacing b
pub(super) fn ltsolve<T: FloatT>(Lp: &[usize], Li: &[usize], Lx: &[T], x: &mut [T]) {
    for i in (0..x.len()).rev() {
        let rng = Lp[i]..Lp[i + 1];
        let s = zip(&Li[rng.clone()], &Lx[rng]).fold(T::zero(), |s, (&Lij, &Lxj)| s + Lxj * x[Lij]);
        x[i] -= s;
    }
}

// Solves (L+I)D(L+I)'x = b given Dinv = D^{-1}, with x replacing b
pub(super) fn ldl_solve<T: FloatT>(Lp: &[usize], Li: &[usize], Lx: &[T], Dinv: &[T], b: &mut [T]) {
    lsolve(Lp, Li, Lx, b);
    zip(b.iter_mut(), Dinv).for_each(|(b, d)| *b *= *d);
    ltsolve(Lp, Li, Lx, b);
}

// x = b[p]
pub(super) fn permute<T: Copy>(x: &mut [T], b: &[T], p: &[usize]) {
    zip(p, x).for_each(|(&p, x)| *x = b[p]);
}

// x[p] = b
pub(super) fn ipermute<T: Copy>(x: &mut [T], b: &[T], p: &[usize]) {
    zip(p, b).for_each(|(&p, &b)| x[p] = b);
}
