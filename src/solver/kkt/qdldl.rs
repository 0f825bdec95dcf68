#![allow(non_snake_case)]

use super::{assemble_kkt_matrix, KKTError, KKTMode, ReducedKKTSolver};
use crate::algebra::*;
use crate::qdldl::*;
use crate::solver::PolishSettings;

/// [`ReducedKKTSolver`] backed by the crate's QDLDL factorization.
///
/// In polish mode each solve is followed by iterative refinement
/// against the unregularized KKT matrix, which removes the bias
/// introduced by the diagonal shifts.
#[derive(Debug)]
pub struct QDLDLKKTSolver<T> {
    // factors of the regularized KKT matrix
    factors: QDLDLFactorisation<T>,

    // regularized KKT matrix (triu) and its diagonal
    // shifts relative to the unregularized one
    KKT: CscMatrix<T>,
    shifts: Vec<T>,

    refine_iter: u32,
    refine_count: u32,

    // rhs, solution and work vectors for refinement
    b: Vec<T>,
    x: Vec<T>,
    work_e: Vec<T>,
    work_dx: Vec<T>,
}

impl<T> QDLDLKKTSolver<T>
where
    T: FloatT,
{
    /// dimension of the KKT system
    pub fn dim(&self) -> usize {
        self.x.len()
    }

    fn iterative_refinement(&mut self) -> Result<(), KKTError> {
        let (x, b) = (&mut self.x, &self.b);
        let (e, dx) = (&mut self.work_e, &mut self.work_dx);
        let (K, shifts) = (&self.KKT, &self.shifts);

        //compute the initial error
        let mut norme = _get_refine_error(e, b, K, shifts, x);

        for _ in 0..self.refine_iter {
            if !norme.is_finite() {
                return Err(KKTError::SingularSystem);
            }
            if norme == T::zero() {
                break;
            }
            let lastnorme = norme;

            //make a refinement
            dx.copy_from(e);
            self.factors.solve(dx);

            //prospective solution is x + dx
            dx.axpby(T::one(), x, T::one());
            norme = _get_refine_error(e, b, K, shifts, dx);
            self.refine_count += 1;

            // keep the better of the two points and stop once
            // a step fails to make progress
            if norme < lastnorme {
                std::mem::swap(x, dx);
            } else {
                break;
            }
        }
        Ok(())
    }
}

impl<T> ReducedKKTSolver<T> for QDLDLKKTSolver<T>
where
    T: FloatT,
{
    fn factor(
        P: &CscMatrix<T>,
        A: &CscMatrix<T>,
        settings: &PolishSettings<T>,
        mode: KKTMode<T>,
    ) -> Result<Self, KKTError> {
        let (m, n) = A.size();
        let (δp, δa) = mode.shifts();

        let KKT = assemble_kkt_matrix(P, A, (δp, δa))?;

        // quasidefinite: positive pivots for the P block, negative below
        let mut Dsigns = vec![1_i8; n + m];
        Dsigns[n..].fill(-1);

        let opts = QDLDLSettings {
            amd_dense_scale: settings.amd_dense_scale,
            perm: None,
            Dsigns: Some(Dsigns),
            regularize_enable: true,
            regularize_eps: settings.dynamic_regularization_eps,
            regularize_delta: settings.dynamic_regularization_delta,
        };

        let factors = QDLDLFactorisation::new(&KKT, Some(opts))?;

        // refinement is only meaningful when the shifts
        // are a perturbation of the intended system
        let (shifts, refine_iter) = match mode {
            KKTMode::Polish { .. } => {
                let mut shifts = vec![δp; n + m];
                shifts[n..].fill(-δa);
                (shifts, settings.polish_refine_iter)
            }
            KKTMode::Admm { .. } => (vec![T::zero(); n + m], 0),
        };

        let dim = n + m;
        Ok(Self {
            factors,
            KKT,
            shifts,
            refine_iter,
            refine_count: 0,
            b: vec![T::zero(); dim],
            x: vec![T::zero(); dim],
            work_e: vec![T::zero(); dim],
            work_dx: vec![T::zero(); dim],
        })
    }

    fn solve(&mut self, rhs: &mut [T]) -> Result<(), KKTError> {
        if rhs.len() != self.dim() {
            return Err(KKTError::IncompatibleDimension);
        }

        self.refine_count = 0;
        self.b.copy_from(rhs);
        self.x.copy_from(rhs);
        self.factors.solve(&mut self.x);

        if self.refine_iter > 0 {
            self.iterative_refinement()?;
        }

        if !self.x.is_finite() {
            return Err(KKTError::SingularSystem);
        }
        rhs.copy_from(&self.x);
        Ok(())
    }

    fn refine_iterations(&self) -> u32 {
        self.refine_count
    }
}

// e = b - Kξ, where K is the regularized triu matrix
// less its diagonal shifts
fn _get_refine_error<T: FloatT>(
    e: &mut [T],
    b: &[T],
    K: &CscMatrix<T>,
    shifts: &[T],
    ξ: &[T],
) -> T {
    e.copy_from(b);
    K.sym().symv(e, ξ, -T::one(), T::one());
    for ((e, &s), &ξ) in e.iter_mut().zip(shifts).zip(ξ) {
        *e += s * ξ;
    }

    e.norm_inf()
}
