#![allow(non_snake_case)]

use super::ProblemData;
use crate::algebra::*;
use itertools::izip;

/// Residuals and objective at a candidate point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Residuals<T> {
    pub res_prim: T,
    pub res_dual: T,
    pub obj_val: T,
}

/// Computes residuals and objective for a candidate primal-dual point.
///
/// `Ax` is the product of the full constraint matrix with `x`, and
/// `lambda` is the full length dual with zeros on free rows.
/// Implementors may use any norm, but smaller must mean better since
/// the polished point is accepted only on a strict decrease of both
/// residuals.
pub trait ResidualEvaluator<T: FloatT> {
    fn evaluate(&self, data: &ProblemData<T>, x: &[T], Ax: &[T], lambda: &[T]) -> Residuals<T>;
}

/// Infinity norm residuals
///
/// - `res_prim = ‖Ax - Π(Ax)‖∞`, with `Π` the projection onto `[l,u]`
/// - `res_dual = ‖Px + q + A'λ‖∞`
/// - `obj_val  = ½x'Px + q'x`
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultResiduals;

impl<T> ResidualEvaluator<T> for DefaultResiduals
where
    T: FloatT,
{
    fn evaluate(&self, data: &ProblemData<T>, x: &[T], Ax: &[T], lambda: &[T]) -> Residuals<T> {
        let res_prim = primal_residual(Ax, &data.l, &data.u);

        // Px + q + A'λ
        let mut r = data.q.clone();
        data.P.sym().symv(&mut r, x, T::one(), T::one());
        data.A.t().gemv(&mut r, lambda, T::one(), T::one());
        let res_dual = r.norm_inf();

        let half: T = (0.5).as_T();
        let obj_val = half * data.P.quad_form(x, x) + data.q.dot(x);

        Residuals {
            res_prim,
            res_dual,
            obj_val,
        }
    }
}

// distance from Ax to the box [l,u]
fn primal_residual<T: FloatT>(Ax: &[T], l: &[T], u: &[T]) -> T {
    let mut out = T::zero();
    for (&ax, &l, &u) in izip!(Ax, l, u) {
        let d = T::max(l - ax, ax - u);
        if d > out {
            out = d;
        }
    }
    // non-finite entries in Ax must never read as a small residual
    if Ax.is_finite() {
        out
    } else {
        T::nan()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn test_data() -> ProblemData<f64> {
        let P = CscMatrix::from(&[[2., 0.], [0., 1.]]);
        let A = CscMatrix::from(&[[1., 1.], [1., 0.]]);
        ProblemData::new(
            P.view(),
            &[1., -1.],
            A.view(),
            &[0., -1.],
            &[1., f64::INFINITY],
        )
        .unwrap()
    }

    #[test]
    fn test_residuals_feasible() {
        let data = test_data();
        let x = [0.25, 0.5];
        let mut Ax = vec![0.; 2];
        data.A.gemv(&mut Ax, &x, 1., 0.);
        assert_eq!(Ax, vec![0.75, 0.25]);

        let r = DefaultResiduals.evaluate(&data, &x, &Ax, &[0., 0.]);
        assert_eq!(r.res_prim, 0.);
        // Px + q = [1.5, -0.5]
        assert_eq!(r.res_dual, 1.5);
        // ½(2*0.0625 + 0.25) + 0.25 - 0.5
        assert!((r.obj_val - (-0.0625)).abs() < 1e-15);
    }

    #[test]
    fn test_residuals_violated() {
        let data = test_data();
        let x = [2., 0.];
        let Ax = [2., 2.];
        let lambda = [-1., 0.];

        let r = DefaultResiduals.evaluate(&data, &x, &Ax, &lambda);
        // row 0 exceeds u by 1, row 1 has no upper bound
        assert_eq!(r.res_prim, 1.);
        // Px + q + A'λ = [4+1-1, -1-1]
        assert_eq!(r.res_dual, 4.);
    }

    #[test]
    fn test_residuals_objective_f32() {
        let P = CscMatrix::<f32>::identity(2);
        let A = CscMatrix::<f32>::identity(2);
        let data = ProblemData::new(P.view(), &[1., -2.], A.view(), &[0., 0.], &[4., 4.]).unwrap();

        let x = [2.0f32, 2.0];
        let r = DefaultResiduals.evaluate(&data, &x, &x, &[0., 0.]);
        // ½(4 + 4) + 2 - 4
        assert_eq!(r.obj_val, 2.0);
        assert_eq!(r.res_prim, 0.0);
        // Px + q = [3, 0]
        assert_eq!(r.res_dual, 3.0);
    }

    #[test]
    fn test_residuals_nan() {
        let data = test_data();
        let r = DefaultResiduals.evaluate(&data, &[f64::NAN, 0.], &[f64::NAN, 0.], &[0., 0.]);
        assert!(r.res_prim.is_nan());
        assert!(r.res_dual.is_nan());
    }
}
