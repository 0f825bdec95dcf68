//! Solution polishing.
//!
//! Given an approximate primal-dual point, polishing guesses which
//! constraints are active, solves the equality constrained QP over
//! those constraints with a direct method, and keeps the result if
//! it improves on both residuals of the best known point.

#![allow(non_snake_case)]

use super::kkt::{KKTError, KKTMode, QDLDLKKTSolver, ReducedKKTSolver};
use super::*;
use crate::algebra::*;
use crate::timers::*;
use thiserror::Error;

mod activeset;
mod reduced;
pub use activeset::*;
pub use reduced::*;

/// Error type returned when a polish attempt can not be completed.
///
/// The best known solution is never modified by a failed attempt.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PolishError {
    /// The reduced constraint matrix could not be formed
    #[error("Failed to form the reduced constraint matrix: {0}")]
    ReducedMatrix(SparseFormatError),
    /// The reduced KKT matrix could not be factored
    #[error("Reduced KKT factorization failed: {0}")]
    Factorization(KKTError),
    /// The reduced KKT system could not be solved
    #[error("Reduced KKT solve failed: {0}")]
    Solve(KKTError),
    /// Storage for the attempt could not be reserved
    #[error("Out of memory while polishing")]
    OutOfMemory,
    /// The attempt exceeded `time_limit`
    #[error("Polish time limit exceeded")]
    Timeout,
}

impl From<SparseFormatError> for PolishError {
    fn from(e: SparseFormatError) -> Self {
        match e {
            SparseFormatError::OutOfMemory(_) => PolishError::OutOfMemory,
            e => PolishError::ReducedMatrix(e),
        }
    }
}

/// Buffers for polish attempts, sized once for the full problem and
/// reused by every attempt.  After an attempt they hold its candidate
/// point, whether or not that point was accepted.
#[derive(Debug, Clone)]
pub struct PolishWorkspace<T> {
    /// partition of the constraint rows
    pub active: ActiveSet,
    /// candidate primal point
    pub x: Vec<T>,
    /// `A*x` over the full constraint matrix
    pub Ax: Vec<T>,
    /// candidate dual, with zeros on free rows
    pub lambda: Vec<T>,
    /// multipliers of the active rows only
    pub lambda_red: Vec<T>,
    pub res_prim: T,
    pub res_dual: T,
    pub obj_val: T,
}

impl<T> PolishWorkspace<T>
where
    T: FloatT,
{
    pub fn new(n: usize, m: usize) -> Self {
        Self {
            active: ActiveSet::new(m),
            x: vec![T::zero(); n],
            Ax: vec![T::zero(); m],
            lambda: vec![T::zero(); m],
            lambda_red: Vec::with_capacity(m),
            res_prim: T::infinity(),
            res_dual: T::infinity(),
            obj_val: T::nan(),
        }
    }

    // full length dual from the multipliers of the active rows
    fn expand_dual(&mut self) {
        let (lambda, lambda_red) = (&mut self.lambda, &self.lambda_red);
        for (λ, row) in lambda.iter_mut().zip(&self.active.row_to_reduced) {
            *λ = match *row {
                Some(k) => lambda_red[k],
                None => T::zero(),
            };
        }
    }
}

impl<T> Workspace<T>
where
    T: FloatT,
{
    /// Attempts to polish the current iterate using the default QDLDL
    /// based KKT solver and infinity norm residuals.
    ///
    /// Returns `Ok(PolishStatus::Succeeded)` if the polished point was
    /// accepted, `Ok(PolishStatus::Rejected)` if it was computed but
    /// failed to improve on both best known residuals, and `Err` if no
    /// polished point could be computed.  Only an accepted point
    /// modifies `solution` and the best known residuals in `info`.
    pub fn polish(&mut self) -> Result<PolishStatus, PolishError> {
        self.polish_with::<QDLDLKKTSolver<T>, _>(&DefaultResiduals)
    }

    /// As [`polish`](Workspace::polish), with a user supplied KKT
    /// solver `K` and residual evaluator.
    pub fn polish_with<K, R>(&mut self, evaluator: &R) -> Result<PolishStatus, PolishError>
    where
        K: ReducedKKTSolver<T>,
        R: ResidualEvaluator<T>,
    {
        let mut timers = self.timers.take().unwrap_or_default();
        timers.reset();

        // an early exit can leave inner timers running, so
        // everything is stopped once the attempt returns
        timers.start_as_current("polish");
        let result = self.polish_attempt::<K, R>(evaluator, &mut timers);
        timers.stop_all();

        self.info.polish_status = match result {
            Ok(status) => status,
            Err(_) => PolishStatus::Failed,
        };

        if self.settings.profiling {
            self.info.polish_time = timers.total_time().as_secs_f64();
        }
        self.timers.replace(timers);

        if self.settings.verbose && self.info.polish_status == PolishStatus::Succeeded {
            // output is diagnostic only and must not change the outcome
            let _ = self.print_polish_summary();
        }

        result
    }

    fn polish_attempt<K, R>(
        &mut self,
        evaluator: &R,
        timers: &mut Timers,
    ) -> Result<PolishStatus, PolishError>
    where
        K: ReducedKKTSolver<T>,
        R: ResidualEvaluator<T>,
    {
        let deadline = Deadline::after_secs(self.settings.time_limit);
        let check_deadline = || match deadline.expired() {
            true => Err(PolishError::Timeout),
            false => Ok(()),
        };

        let data = &self.data;
        let work = &mut self.work;
        let n = data.n;

        self.info.refine_iterations = 0;

        timeit! {timers => "active set";
            work.active.reclassify(data, &self.iterate, self.settings.rho);
        }
        let mred = work.active.mred();
        check_deadline()?;

        let Ared;
        timeit! {timers => "reduced matrix";
            Ared = reduced_constraint_matrix(&data.A, &work.active.row_to_reduced, mred)?;
        }
        check_deadline()?;

        let mut kkt;
        timeit! {timers => "kkt factor";
            let mode = KKTMode::Polish {
                delta: self.settings.delta,
            };
            kkt = K::factor(&data.P, &Ared, &self.settings, mode)
                .map_err(PolishError::Factorization)?;
        }
        check_deadline()?;

        // rhs = [-q; b], with each active row's bound placed at its
        // reduced row.  Lower and upper rows may interleave.
        let mut rhs = Vec::new();
        rhs.try_reserve_exact(n + mred)
            .map_err(|_| PolishError::OutOfMemory)?;
        rhs.extend(data.q.iter().map(|&q| -q));
        rhs.resize(n + mred, T::zero());

        let active = &work.active;
        let bounds = active
            .ind_lower
            .iter()
            .map(|&j| (j, data.l[j]))
            .chain(active.ind_upper.iter().map(|&j| (j, data.u[j])));
        for (j, b) in bounds {
            if let Some(k) = active.row_to_reduced[j] {
                rhs[n + k] = b;
            }
        }

        timeit! {timers => "kkt solve";
            kkt.solve(&mut rhs).map_err(PolishError::Solve)?;
        }
        self.info.refine_iterations = kkt.refine_iterations();
        check_deadline()?;

        // recover the primal and reduced dual
        work.x.copy_from(&rhs[..n]);
        work.lambda_red.clear();
        work.lambda_red.extend_from_slice(&rhs[n..]);
        work.expand_dual();
        data.A.gemv(&mut work.Ax, &work.x, T::one(), T::zero());

        let r = evaluator.evaluate(data, &work.x, &work.Ax, &work.lambda);
        work.res_prim = r.res_prim;
        work.res_dual = r.res_dual;
        work.obj_val = r.obj_val;
        check_deadline()?;

        // accept only on a strict decrease of both residuals.  A NaN
        // residual compares false and is always rejected.
        let info = &mut self.info;
        if work.res_prim < info.res_prim && work.res_dual < info.res_dual {
            info.obj_val = work.obj_val;
            info.res_prim = work.res_prim;
            info.res_dual = work.res_dual;
            self.solution.x.copy_from(&work.x);
            self.solution.lambda.copy_from(&work.lambda);
            Ok(PolishStatus::Succeeded)
        } else {
            Ok(PolishStatus::Rejected)
        }
    }
}
