//! __qp-polish__ is the solution polishing stage of an operator-splitting
//! solver for quadratic programs of the form
//!
//! $$
//! \begin{array}{rl}
//! \text{minimize} & \frac{1}{2}x^T P x + q^T x\\\\\[2ex\]
//!  \text{subject to} & l \le Ax \le u
//!  \end{array}
//! $$
//!
//! with decision variables
//! $x \in \mathbb{R}^n$
//! and data
//! $P=P^\top \succeq 0$,
//! $q \in \mathbb{R}^n$,
//! $A \in \mathbb{R}^{m \times n}$ and
//! $l, u \in \mathbb{R}^m$.
//!
//! First-order methods converge quickly to moderate accuracy but slowly
//! beyond it.  Polishing takes the approximate point they produce,
//! guesses which constraints are active there, and solves the
//! equality constrained QP over the active constraints with a sparse
//! $LDL^T$ factorization.  The result is kept only if it improves on
//! both the primal and dual residuals of the best known point.
//!
//! # Example
//!
//! ```
//! use qp_polish::algebra::*;
//! use qp_polish::solver::*;
//!
//! // minimize ½‖x‖²  subject to  x₁ + x₂ = 1,  0 ≤ x₁ ≤ 0.7
//! let P = CscMatrix::<f64>::identity(2);
//! let A = CscMatrix::from(&[
//!     [1., 1.], //
//!     [1., 0.], //
//! ]);
//! let l = [1., 0.];
//! let u = [1., 0.7];
//!
//! let mut ws = Workspace::new(&P, &[0., 0.], &A, &l, &u, PolishSettings::default()).unwrap();
//!
//! // hand-off from the outer iteration: z = [x; Ax] and row scaling
//! ws.set_iterate(&[0.49, 0.49, 0.98, 0.49], &[1., 1.]).unwrap();
//!
//! let status = ws.polish().unwrap();
//! assert_eq!(status, PolishStatus::Succeeded);
//!
//! // the second row is inactive and has a zero multiplier
//! assert_eq!(ws.solution.lambda[1], 0.);
//! assert!((ws.solution.x[1] - 0.5).abs() < 1e-9);
//! ```
//!
//! # License
//!
//! Licensed under Apache License, Version 2.0.

//Rust hates greek characters
#![allow(confusable_idents)]

pub mod algebra;
pub mod io;
pub mod qdldl;
pub mod solver;
pub mod timers;
