//! Whole-number and decimal arithmetic templates.

pub mod addition;
pub mod decimal_multiplication;
pub mod division;
pub mod exponents;
pub mod multiplication;
pub mod rounding;
