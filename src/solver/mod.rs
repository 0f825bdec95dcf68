//! Polishing stage main module.
//!
//! A [`Workspace`] holds the problem data together with the approximate
//! point and best known solution handed over by the outer iteration.
//! [`Workspace::polish`] attempts to refine that point by solving the
//! equality constrained QP over the constraints it appears to hold
//! active.
//!
//! The direct solver used for the reduced KKT system and the residual
//! measure used to accept or reject the polished point are both
//! replaceable through the [`ReducedKKTSolver`] and
//! [`ResidualEvaluator`] traits.

mod info;
mod info_print;
mod iterate;
pub mod kkt;
mod polish;
mod problemdata;
mod residuals;
mod settings;
mod solution;
mod workspace;

pub use info::*;
pub use iterate::*;
pub use kkt::{KKTError, KKTMode, QDLDLKKTSolver, ReducedKKTSolver};
pub use polish::*;
pub use problemdata::*;
pub use residuals::*;
pub use settings::*;
pub use solution::*;
pub use workspace::*;

#[cfg(feature = "serde")]
mod json;
