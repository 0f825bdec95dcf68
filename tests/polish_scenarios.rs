#![allow(non_snake_case)]

use qp_polish::{algebra::*, solver::*};

// minimize ½(x₁² + x₂²)  subject to  x₁ + x₂ = 1
fn equality_workspace() -> Workspace<f64> {
    let P = CscMatrix::<f64>::identity(2);
    let A = CscMatrix::from(&[[1., 1.]]);
    let mut ws = Workspace::new(&P, &[0., 0.], &A, &[1.], &[1.], PolishSettings::default()).unwrap();
    ws.set_iterate(&[0.4, 0.4, 0.8], &[1.]).unwrap();
    ws
}

// minimize ½‖x - c‖²  subject to  0 ≤ x ≤ 1.  Returns the workspace
// with an iterate at the solution, and the expected primal and dual
fn box_workspace() -> (Workspace<f64>, Vec<f64>, Vec<f64>) {
    let c: [f64; 6] = [-0.5, 0.3, 1.7, 0.9, -2.0, 0.5];
    let n = c.len();

    let P = CscMatrix::<f64>::identity(n);
    let A = CscMatrix::<f64>::identity(n);
    let q: Vec<f64> = c.iter().map(|c| -c).collect();
    let l = vec![0.; n];
    let u = vec![1.; n];

    let x: Vec<f64> = c.iter().map(|c| c.clamp(0., 1.)).collect();
    let λ: Vec<f64> = c.iter().zip(&x).map(|(c, x)| c - x).collect();

    let mut ws = Workspace::new(&P, &q, &A, &l, &u, PolishSettings::default()).unwrap();
    let z: Vec<f64> = x.iter().chain(&x).copied().collect();
    ws.set_iterate(&z, &λ).unwrap();

    (ws, x, λ)
}

#[test]
fn test_exact_match() {
    let mut ws = equality_workspace();

    let status = ws.polish().unwrap();
    assert_eq!(status, PolishStatus::Succeeded);
    assert_eq!(ws.info.polish_status, PolishStatus::Succeeded);

    // tight bounds resolve to the lower bound
    assert_eq!(ws.work.active.ind_lower, vec![0]);
    assert!(ws.work.active.ind_upper.is_empty());

    assert!(ws.solution.x.norm_inf_diff(&[0.5, 0.5]) < 1e-9);
    assert!((ws.solution.lambda[0] + 0.5).abs() < 1e-9);
    assert!(ws.info.res_prim < 1e-9);
    assert!(ws.info.res_dual < 1e-9);
    assert!((ws.info.obj_val - 0.25).abs() < 1e-9);
}

#[test]
fn test_free_constraint_excluded() {
    // minimize ½‖x‖²  s.t.  x₁ + x₂ = 1,  0 ≤ x₁ ≤ 0.7
    let P = CscMatrix::<f64>::identity(2);
    let A = CscMatrix::from(&[
        [1., 1.], //
        [1., 0.], //
    ]);
    let mut ws = Workspace::new(&P, &[0., 0.], &A, &[1., 0.], &[1., 0.7], PolishSettings::default())
        .unwrap();
    ws.set_iterate(&[0.49, 0.49, 0.98, 0.49], &[1., 1.]).unwrap();

    assert_eq!(ws.polish(), Ok(PolishStatus::Succeeded));

    let active = &ws.work.active;
    assert_eq!(active.ind_upper, vec![0]);
    assert_eq!(active.ind_free, vec![1]);
    assert_eq!(active.row_to_reduced, vec![Some(0), None]);

    // the free row is absent from the reduced matrix
    let Ared = reduced_constraint_matrix(&ws.data.A, &active.row_to_reduced, active.mred()).unwrap();
    assert_eq!(Ared.size(), (1, 2));
    assert_eq!(Ared.nnz(), 2);

    assert_eq!(ws.solution.lambda[1], 0.);
    assert!(ws.solution.x.norm_inf_diff(&[0.5, 0.5]) < 1e-9);
}

#[test]
fn test_box_constrained() {
    let (mut ws, x, λ) = box_workspace();

    assert_eq!(ws.polish(), Ok(PolishStatus::Succeeded));
    assert_eq!(ws.work.active.ind_lower, vec![0, 4]);
    assert_eq!(ws.work.active.ind_upper, vec![2]);
    assert_eq!(ws.work.active.ind_free, vec![1, 3, 5]);

    assert!(ws.solution.x.norm_inf_diff(&x) < 1e-9);
    assert!(ws.solution.lambda.norm_inf_diff(&λ) < 1e-8);
    for &j in &ws.work.active.ind_free {
        assert_eq!(ws.solution.lambda[j], 0.);
    }
}

#[test]
fn test_no_active_constraints() {
    // minimize ½x'Px + q'x with a constraint far from active
    let P = CscMatrix::from(&[
        [4., 1.], //
        [1., 2.], //
    ]);
    let A = CscMatrix::from(&[[1., 1.]]);
    let mut ws = Workspace::new(&P, &[-1., -1.], &A, &[-10.], &[10.], PolishSettings::default())
        .unwrap();
    ws.set_iterate(&[0.1, 0.4, 0.5], &[0.]).unwrap();

    assert_eq!(ws.polish(), Ok(PolishStatus::Succeeded));
    assert_eq!(ws.work.active.mred(), 0);

    // Px = -q gives x = (1/7, 3/7)
    assert!(ws.solution.x.norm_inf_diff(&[1. / 7., 3. / 7.]) < 1e-9);
    assert_eq!(ws.solution.lambda, vec![0.]);
}

#[test]
fn test_rejection_is_idempotent() {
    let mut ws = equality_workspace();

    // a best known point that can't be improved upon
    ws.set_best(&[0.5, 0.5], &[-0.5], 0., 0., 0.25).unwrap();
    let solution = ws.solution.clone();
    let (res_prim, res_dual, obj_val) = (ws.info.res_prim, ws.info.res_dual, ws.info.obj_val);

    for _ in 0..2 {
        assert_eq!(ws.polish(), Ok(PolishStatus::Rejected));
        assert_eq!(ws.info.polish_status, PolishStatus::Rejected);
        assert_eq!(ws.solution, solution);
        assert_eq!(ws.info.res_prim.to_bits(), res_prim.to_bits());
        assert_eq!(ws.info.res_dual.to_bits(), res_dual.to_bits());
        assert_eq!(ws.info.obj_val.to_bits(), obj_val.to_bits());
    }
}

#[test]
fn test_monotone_acceptance() {
    let (mut ws, _, _) = box_workspace();

    assert_eq!(ws.polish(), Ok(PolishStatus::Succeeded));
    let (res_prim, res_dual) = (ws.info.res_prim, ws.info.res_dual);
    let solution = ws.solution.clone();

    // the same attempt again can't strictly improve on itself
    assert_eq!(ws.polish(), Ok(PolishStatus::Rejected));
    assert_eq!(ws.info.res_prim, res_prim);
    assert_eq!(ws.info.res_dual, res_dual);
    assert_eq!(ws.solution, solution);
}

#[test]
fn test_partial_improvement_rejected() {
    let mut ws = equality_workspace();

    // better dual residual than any polished point, awful primal
    ws.set_best(&[0., 0.], &[0.], 1e3, 0., 0.).unwrap();
    assert_eq!(ws.polish(), Ok(PolishStatus::Rejected));
    assert_eq!(ws.solution.x, vec![0., 0.]);
    assert_eq!(ws.info.res_prim, 1e3);
}

#[test]
fn test_bad_guess_rejected() {
    let (mut ws, x, λ) = box_workspace();

    // the best known point is the true solution, and the iterate
    // wrongly has every constraint free
    ws.set_best(&x, &λ, 1e-12, 1e-12, 0.).unwrap();
    let z = vec![0.5; 12];
    let u = vec![0.; 6];
    ws.set_iterate(&z, &u).unwrap();

    assert_eq!(ws.polish(), Ok(PolishStatus::Rejected));
    assert_eq!(ws.work.active.mred(), 0);
    assert_eq!(ws.solution.x, x);
}

// a KKT solver whose factorization always fails
struct FailingKKT;

impl ReducedKKTSolver<f64> for FailingKKT {
    fn factor(
        _P: &CscMatrix<f64>,
        _A: &CscMatrix<f64>,
        _settings: &PolishSettings<f64>,
        _mode: KKTMode<f64>,
    ) -> Result<Self, KKTError> {
        Err(KKTError::SingularSystem)
    }

    fn solve(&mut self, _rhs: &mut [f64]) -> Result<(), KKTError> {
        unreachable!()
    }
}

#[test]
fn test_factorization_failure() {
    let mut ws = equality_workspace();
    ws.set_best(&[0.3, 0.3], &[1.], 1., 1., 0.).unwrap();
    let solution = ws.solution.clone();

    let result = ws.polish_with::<FailingKKT, _>(&DefaultResiduals);
    assert_eq!(
        result,
        Err(PolishError::Factorization(KKTError::SingularSystem))
    );
    assert_eq!(ws.info.polish_status, PolishStatus::Failed);
    assert_eq!(ws.solution, solution);
    assert_eq!(ws.info.res_prim, 1.);

    // a later attempt with a working solver still succeeds
    assert_eq!(ws.polish(), Ok(PolishStatus::Succeeded));
}

// residual evaluator that takes longer than the time limit
struct SlowResiduals;

impl ResidualEvaluator<f64> for SlowResiduals {
    fn evaluate(&self, data: &ProblemData<f64>, x: &[f64], Ax: &[f64], lambda: &[f64]) -> Residuals<f64> {
        std::thread::sleep(std::time::Duration::from_millis(20));
        DefaultResiduals.evaluate(data, x, Ax, lambda)
    }
}

#[test]
fn test_timeout() {
    let mut ws = equality_workspace();
    ws.settings.time_limit = 1e-3;
    let solution = ws.solution.clone();

    let result = ws.polish_with::<QDLDLKKTSolver<f64>, _>(&SlowResiduals);
    assert_eq!(result, Err(PolishError::Timeout));
    assert_eq!(ws.info.polish_status, PolishStatus::Failed);
    assert_eq!(ws.solution, solution);
    assert!(ws.info.res_prim.is_infinite());
}

// scores every point by its distance from a target
struct DistanceResiduals {
    target: Vec<f64>,
}

impl ResidualEvaluator<f64> for DistanceResiduals {
    fn evaluate(&self, _data: &ProblemData<f64>, x: &[f64], _Ax: &[f64], _lambda: &[f64]) -> Residuals<f64> {
        let d = x.norm_inf_diff(&self.target);
        Residuals {
            res_prim: d,
            res_dual: d,
            obj_val: 0.,
        }
    }
}

#[test]
fn test_custom_evaluator() {
    let mut ws = equality_workspace();
    ws.set_best(&[0., 0.], &[0.], 0.1, 0.1, 0.).unwrap();

    let near = DistanceResiduals {
        target: vec![0.5, 0.5],
    };
    let far = DistanceResiduals {
        target: vec![5., 5.],
    };

    assert_eq!(ws.polish_with::<QDLDLKKTSolver<f64>, _>(&far), Ok(PolishStatus::Rejected));
    assert_eq!(ws.polish_with::<QDLDLKKTSolver<f64>, _>(&near), Ok(PolishStatus::Succeeded));
    assert!(ws.info.res_prim < 1e-9);
}

#[test]
fn test_profiling() {
    let mut ws = equality_workspace();
    ws.settings.profiling = true;

    assert_eq!(ws.polish(), Ok(PolishStatus::Succeeded));
    assert!(ws.info.polish_time > 0.);
    assert!(ws.info.refine_iterations <= ws.settings.polish_refine_iter);

    let timers = ws.timers.as_ref().unwrap();
    assert!(timers.elapsed(&["polish"]).is_some());
    assert!(timers.elapsed(&["polish", "kkt factor"]).is_some());
    assert!(timers.elapsed(&["polish", "kkt solve"]).is_some());
}

#[test]
fn test_f32() {
    let P = CscMatrix::<f32>::identity(2);
    let A = CscMatrix::from(&[[1f32, 1f32]]);
    let mut ws = Workspace::new(&P, &[0f32, 0f32], &A, &[1f32], &[1f32], PolishSettings::default()).unwrap();
    ws.set_iterate(&[0.4, 0.4, 0.8], &[1.]).unwrap();

    assert_eq!(ws.polish(), Ok(PolishStatus::Succeeded));
    assert!(ws.solution.x.norm_inf_diff(&[0.5, 0.5]) < 1e-5);
}
