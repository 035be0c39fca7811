//! Hash Module
//!
//! Finite-field arithmetic and the rolling accumulator derived from it.

mod field;
mod rolling;


pub use field::{field_modulus, reduce};
pub use rolling::{combine, replay, Accumulator, INITIAL_ACCUMULATOR};
