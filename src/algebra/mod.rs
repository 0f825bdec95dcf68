//! Sparse linear algebra for the polishing stage.
//!
//! All matrix data in the crate is held in compressed sparse column (CSC)
//! format.  Owned matrices are [`CscMatrix`], while matrices wrapping
//! caller-owned buffers are [`CscMatrixView`].  Unordered data can be
//! collected in a [`TripletMatrix`] and compressed afterwards.

// first import and flatten the solver's collection
// of core numeric types and matrix / vector traits.

mod error_types;
mod floats;
mod math_traits;
mod matrix_traits;
mod matrix_types;
mod vecmath;
pub use error_types::*;
pub use floats::*;
pub use math_traits::*;
pub use matrix_traits::*;
pub use matrix_types::*;

// CSC and triplet implementations
mod csc;
mod triplet;
pub use csc::*;

#[cfg(test)]
mod tests;
