#![allow(non_snake_case)]

mod core;
pub use self::core::*;
mod view;
pub use view::*;
mod utils;
mod matrix_math;
pub use matrix_math::*;
