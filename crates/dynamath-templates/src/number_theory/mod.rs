//! Factor and multiple templates.

pub mod gcf;
pub mod lcm;
pub mod operands;
