//! Domain Layer
//!
//! Patterns, values, constraints and the capability validated types implement.

pub mod constraint;
pub mod outcome;
pub mod pattern;
pub mod target;
pub mod value;
