//! Route modules organized by concern.

pub mod cards;
pub mod generation;
pub mod health;
pub mod templates;
