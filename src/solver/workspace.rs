#![allow(non_snake_case)]

use super::*;
use crate::algebra::*;
use crate::io::{ConfigurablePrintTarget, PrintTarget};
use crate::timers::*;
use std::io::Write;

/// State shared between the outer iteration and the polishing stage.
///
/// The outer iteration hands over its approximate point with
/// [`set_iterate`](Workspace::set_iterate) and its current best
/// solution and residuals with [`set_best`](Workspace::set_best).
/// A call to [`polish`](Workspace::polish) then attempts to improve
/// on them.
///
/// __Example usage__ : To polish the solution of
/// ```text
/// minimize    ½ (x₁² + x₂²)
/// subject to  x₁ + x₂ = 1
/// ```
///
/// ```
/// use qp_polish::algebra::*;
/// use qp_polish::solver::*;
///
/// let P = CscMatrix::<f64>::identity(2);
/// let A = CscMatrix::from(&[[1., 1.]]);
///
/// let settings = PolishSettings::default();
/// let mut ws = Workspace::new(&P, &[0., 0.], &A, &[1.], &[1.], settings).unwrap();
///
/// // approximate point from the outer iteration
/// ws.set_iterate(&[0.4, 0.4, 0.8], &[1.]).unwrap();
///
/// assert_eq!(ws.polish(), Ok(PolishStatus::Succeeded));
/// assert!((ws.solution.x[0] - 0.5).abs() < 1e-9);
/// ```
#[derive(Debug)]
pub struct Workspace<T: FloatT = f64> {
    pub data: ProblemData<T>,
    pub iterate: Iterate<T>,
    pub settings: PolishSettings<T>,
    pub info: PolishInfo<T>,
    pub solution: Solution<T>,
    pub work: PolishWorkspace<T>,
    pub timers: Option<Timers>,
    pub(crate) stream: PrintTarget,
}

impl<T> Workspace<T>
where
    T: FloatT,
{
    /// Creates a workspace for the problem
    /// `min ½x'Px + q'x  s.t.  l ≤ Ax ≤ u`.
    ///
    /// Only the upper triangle of `P` is used.  The iterate and the
    /// best known solution start at zero, with infinite residuals.
    pub fn new<'a>(
        P: impl Into<CscMatrixView<'a, T>>,
        q: &[T],
        A: impl Into<CscMatrixView<'a, T>>,
        l: &[T],
        u: &[T],
        settings: PolishSettings<T>,
    ) -> Result<Self, DataError> {
        settings.validate()?;

        let data = ProblemData::new(P.into(), q, A.into(), l, u)?;
        let (n, m) = (data.n, data.m);

        Ok(Self {
            data,
            iterate: Iterate::new(n, m),
            settings,
            info: PolishInfo::new(),
            solution: Solution::new(n, m),
            work: PolishWorkspace::new(n, m),
            timers: Some(Timers::default()),
            stream: PrintTarget::default(),
        })
    }

    /// number of variables
    pub fn n(&self) -> usize {
        self.data.n
    }

    /// number of constraints
    pub fn m(&self) -> usize {
        self.data.m
    }

    /// Copies the approximate point `z` (length n+m) and the row
    /// scaling `u` (length m) produced by the outer iteration.
    pub fn set_iterate(&mut self, z: &[T], u: &[T]) -> Result<(), DataError> {
        if z.len() != self.iterate.z.len() || u.len() != self.iterate.u.len() {
            return Err(DataError::IncompatibleDimension);
        }
        self.iterate.z.copy_from(z);
        self.iterate.u.copy_from(u);
        Ok(())
    }

    /// Records the best known solution and its residuals.  A polished
    /// point is only accepted if it improves on both residuals.
    pub fn set_best(
        &mut self,
        x: &[T],
        lambda: &[T],
        res_prim: T,
        res_dual: T,
        obj_val: T,
    ) -> Result<(), DataError> {
        if x.len() != self.solution.x.len() || lambda.len() != self.solution.lambda.len() {
            return Err(DataError::IncompatibleDimension);
        }
        self.solution.x.copy_from(x);
        self.solution.lambda.copy_from(lambda);
        self.info.res_prim = res_prim;
        self.info.res_dual = res_dual;
        self.info.obj_val = obj_val;
        Ok(())
    }

    /// Prints the timer tree of the most recent attempt.
    pub fn print_timers(&mut self) -> std::io::Result<()> {
        if let Some(timers) = &self.timers {
            timers.print(&mut self.stream)?;
        }
        self.stream.flush()
    }
}

impl<T> ConfigurablePrintTarget for Workspace<T>
where
    T: FloatT,
{
    fn print_to_stdout(&mut self) {
        self.stream.print_to_stdout()
    }
    fn print_to_file(&mut self, file: std::fs::File) {
        self.stream.print_to_file(file)
    }
    fn print_to_stream(&mut self, stream: Box<dyn Write + Send + Sync>) {
        self.stream.print_to_stream(stream)
    }
    fn print_to_sink(&mut self) {
        self.stream.print_to_sink()
    }
    fn print_to_buffer(&mut self) {
        self.stream.print_to_buffer()
    }
    fn get_print_buffer(&mut self) -> std::io::Result<String> {
        self.stream.get_print_buffer()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn test_workspace() -> Workspace<f64> {
        let P = CscMatrix::from(&[[1., 0.], [0., 1.]]);
        let A = CscMatrix::from(&[[1., 1.], [1., 0.], [0., 1.]]);
        Workspace::new(
            &P,
            &[0., 0.],
            &A,
            &[1., 0., 0.],
            &[1., 0.7, 0.7],
            PolishSettings::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_workspace_new() {
        let ws = test_workspace();
        assert_eq!((ws.n(), ws.m()), (2, 3));
        assert_eq!(ws.iterate.z.len(), 5);
        assert_eq!(ws.solution.lambda.len(), 3);
        assert!(ws.info.res_prim.is_infinite());
        assert_eq!(ws.info.polish_status, PolishStatus::Unperformed);
    }

    #[test]
    fn test_workspace_bad_settings() {
        let P = CscMatrix::<f64>::identity(1);
        let A = CscMatrix::<f64>::identity(1);
        let settings = PolishSettings {
            rho: 0.0,
            ..PolishSettings::default()
        };
        let ws = Workspace::new(&P, &[0.], &A, &[0.], &[1.], settings);
        assert!(matches!(ws, Err(DataError::BadSettings(_))));
    }

    #[test]
    fn test_workspace_setters() {
        let mut ws = test_workspace();

        assert_eq!(
            ws.set_iterate(&[0.; 4], &[1.; 3]),
            Err(DataError::IncompatibleDimension)
        );
        assert!(ws.set_iterate(&[0.5, 0.5, 1., 0.5, 0.5], &[1.; 3]).is_ok());
        assert_eq!(ws.iterate.slack(2), &[1., 0.5, 0.5]);

        assert_eq!(
            ws.set_best(&[0.; 2], &[0.; 2], 1., 1., 0.),
            Err(DataError::IncompatibleDimension)
        );
        assert!(ws.set_best(&[0.5; 2], &[0.; 3], 1e-3, 1e-2, 0.25).is_ok());
        assert_eq!(ws.info.res_prim, 1e-3);
        assert_eq!(ws.info.res_dual, 1e-2);
        assert_eq!(ws.solution.x, vec![0.5, 0.5]);
    }
}
